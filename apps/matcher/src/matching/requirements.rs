//! Requirement Extractor — turns raw job-description text into a structured
//! `RequirementSet` using the injected keyword taxonomy.
//!
//! Best effort by contract: empty, malformed or unusual text never fails, it just yields
//! fewer (or no) requirements. Identical input always produces an identical set.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::MatchError;
use crate::matching::taxonomy::{Bucket, Taxonomy};
use crate::matching::text::{acronyms, contains_term, normalize, sentences};
use crate::models::JobPosting;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Highest education level a posting asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EducationLevel::Associate => "Associate's degree",
            EducationLevel::Bachelor => "Bachelor's degree",
            EducationLevel::Master => "Master's degree",
            EducationLevel::Doctorate => "PhD",
        };
        f.write_str(label)
    }
}

/// Job level stated in the posting title. Feeds the zero-weight job-level diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
    Director,
    Executive,
}

impl Seniority {
    pub fn rank(self) -> i32 {
        self as i32
    }

    /// Level a candidate with `years` of experience would usually hold.
    pub fn from_years(years: f64) -> Self {
        match years {
            y if y < 2.0 => Seniority::Junior,
            y if y < 5.0 => Seniority::Mid,
            y if y < 8.0 => Seniority::Senior,
            y if y < 12.0 => Seniority::Lead,
            _ => Seniority::Principal,
        }
    }
}

/// Structured requirements parsed from one job description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSet {
    pub must_have_keywords: BTreeSet<String>,
    pub tech_keywords: BTreeSet<String>,
    pub process_keywords: BTreeSet<String>,
    pub leadership_keywords: BTreeSet<String>,
    pub npi_keywords: BTreeSet<String>,
    pub mindset_keywords: BTreeSet<String>,
    pub years_required: Option<u32>,
    pub education_required: Option<EducationLevel>,
    pub travel_required: bool,
    pub requires_relocation: bool,
    pub seniority: Option<Seniority>,
    pub remote: bool,
    pub location: Option<String>,
}

impl RequirementSet {
    pub fn bucket(&self, bucket: Bucket) -> &BTreeSet<String> {
        match bucket {
            Bucket::MustHave => &self.must_have_keywords,
            Bucket::Technical => &self.tech_keywords,
            Bucket::Process => &self.process_keywords,
            Bucket::Leadership => &self.leadership_keywords,
            Bucket::Npi => &self.npi_keywords,
            Bucket::Mindset => &self.mindset_keywords,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut BTreeSet<String> {
        match bucket {
            Bucket::MustHave => &mut self.must_have_keywords,
            Bucket::Technical => &mut self.tech_keywords,
            Bucket::Process => &mut self.process_keywords,
            Bucket::Leadership => &mut self.leadership_keywords,
            Bucket::Npi => &mut self.npi_keywords,
            Bucket::Mindset => &mut self.mindset_keywords,
        }
    }

    /// Distinct keywords across every bucket.
    pub fn all_keywords(&self) -> BTreeSet<&str> {
        Bucket::ALL
            .iter()
            .flat_map(|b| self.bucket(*b).iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        Bucket::ALL.iter().all(|b| self.bucket(*b).is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static vocabularies
// ────────────────────────────────────────────────────────────────────────────

/// Highest level first; the first level with any hit wins.
const EDUCATION_VOCABULARY: &[(EducationLevel, &[&str])] = &[
    (
        EducationLevel::Doctorate,
        &["phd", "ph.d", "doctorate", "doctoral"],
    ),
    (
        EducationLevel::Master,
        &["master's", "masters", "master", "m.s", "msc", "mba"],
    ),
    (
        EducationLevel::Bachelor,
        &["bachelor's", "bachelors", "bachelor", "bs", "b.s", "bsc", "ba", "b.a"],
    ),
    (
        EducationLevel::Associate,
        &["associate's", "associates degree", "associate degree"],
    ),
];

/// Highest level first.
const SENIORITY_VOCABULARY: &[(Seniority, &[&str])] = &[
    (Seniority::Executive, &["vp", "vice president", "chief"]),
    (Seniority::Director, &["director", "head of"]),
    (Seniority::Principal, &["principal", "distinguished"]),
    (Seniority::Lead, &["lead", "staff", "manager"]),
    (Seniority::Senior, &["senior", "sr"]),
    (Seniority::Mid, &["mid-level", "mid level", "intermediate"]),
    (Seniority::Junior, &["junior", "jr", "entry level", "entry-level", "graduate"]),
    (Seniority::Intern, &["intern", "internship"]),
];

const YEARS_PATTERN: &str = r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b";
const TRAVEL_PERCENT_PATTERN: &str =
    r"(?i)(?:(\d{1,3})\s*%\s*(?:of\s+(?:the\s+)?time\s+)?travel|travel[^.\n%]{0,30}?(\d{1,3})\s*%)";

const MAX_PLAUSIBLE_YEARS: u32 = 50;

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// Pure keyword-dictionary extractor. Cheap to share behind an `Arc`.
pub struct RequirementExtractor {
    taxonomy: Arc<Taxonomy>,
    years_pattern: Regex,
    travel_percent_pattern: Regex,
}

impl RequirementExtractor {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Result<Self, MatchError> {
        Ok(Self {
            taxonomy,
            years_pattern: Regex::new(YEARS_PATTERN)?,
            travel_percent_pattern: Regex::new(TRAVEL_PERCENT_PATTERN)?,
        })
    }

    /// Parses free text into a `RequirementSet`. Never fails.
    pub fn extract(&self, text: &str) -> RequirementSet {
        let mut set = RequirementSet::default();
        if text.trim().is_empty() {
            return set;
        }

        let normalized = normalize(text);
        let taxonomy = &self.taxonomy;

        // 1. Dictionary buckets over the whole text
        for bucket in Bucket::ALL {
            let hits: Vec<String> = taxonomy
                .bucket(bucket)
                .iter()
                .filter(|term| contains_term(&normalized, term))
                .cloned()
                .collect();
            set.bucket_mut(bucket).extend(hits);
        }

        // 2. Must-haves: "required" sentences, plus every non-optional item under a
        //    required heading ("Requirements:") up to the next heading
        let mut required_section = false;
        for line in text.lines().map(str::trim) {
            if let Some(heading) = line.strip_suffix(':') {
                required_section = self.is_required_sentence(&normalize(heading));
                continue;
            }
            for sentence in sentences(line) {
                let sentence_norm = normalize(sentence);
                let required = self.is_required_sentence(&sentence_norm)
                    || (required_section
                        && !any_term(&sentence_norm, &taxonomy.optional_markers));
                if required {
                    self.collect_must_haves(sentence, &sentence_norm, &mut set);
                }
            }
        }

        // 3. Scalar requirements
        set.years_required = self.extract_years(text);
        set.education_required = extract_education(&normalized);
        set.travel_required = self.detect_travel(text, &normalized);
        set.requires_relocation = any_term(&normalized, &taxonomy.relocation_phrases);
        set.remote = any_term(&normalized, &taxonomy.remote_phrases);
        set.seniority = sentences(text)
            .first()
            .and_then(|headline| extract_seniority(&normalize(headline)));

        debug!(
            must_have = set.must_have_keywords.len(),
            tech = set.tech_keywords.len(),
            years = ?set.years_required,
            "Extracted requirements"
        );
        set
    }

    /// Extracts a posting, then applies the structured metadata the job source already
    /// knows (years override, location).
    pub fn extract_posting(&self, posting: &JobPosting) -> RequirementSet {
        let mut set = self.extract(&posting.full_text());

        if let Some(years) = posting.years_required {
            set.years_required = Some(years);
        }
        if let Some(location) = posting.location.as_deref().map(str::trim) {
            if !location.is_empty() {
                if contains_term(&normalize(location), "remote") {
                    set.remote = true;
                }
                set.location = Some(location.to_string());
            }
        }
        set
    }

    /// Adds every dictionary term in the sentence, plus unknown acronyms.
    fn collect_must_haves(&self, sentence: &str, sentence_norm: &str, set: &mut RequirementSet) {
        let taxonomy = &self.taxonomy;
        for bucket in Bucket::ALL {
            for term in taxonomy.bucket(bucket) {
                if contains_term(sentence_norm, term) {
                    set.must_have_keywords.insert(term.clone());
                }
            }
        }
        for acronym in acronyms(sentence) {
            if !taxonomy.ignored_acronyms.contains(&acronym) && !taxonomy.knows(&acronym) {
                set.must_have_keywords.insert(acronym);
            }
        }
    }

    fn is_required_sentence(&self, sentence_norm: &str) -> bool {
        any_term(sentence_norm, &self.taxonomy.required_markers)
            && !any_term(sentence_norm, &self.taxonomy.optional_markers)
    }

    /// Maximum "N years" figure in the text.
    fn extract_years(&self, text: &str) -> Option<u32> {
        self.years_pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .filter(|years| (1..=MAX_PLAUSIBLE_YEARS).contains(years))
            .max()
    }

    fn detect_travel(&self, text: &str, normalized: &str) -> bool {
        if any_term(normalized, &self.taxonomy.no_travel_phrases) {
            return false;
        }
        if any_term(normalized, &self.taxonomy.travel_phrases) {
            return true;
        }
        self.travel_percent_pattern.captures_iter(text).any(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .is_some_and(|pct| pct > 0)
        })
    }
}

fn any_term<'a>(haystack: &str, terms: impl IntoIterator<Item = &'a String>) -> bool {
    terms.into_iter().any(|t| contains_term(haystack, t))
}

fn extract_education(normalized: &str) -> Option<EducationLevel> {
    EDUCATION_VOCABULARY
        .iter()
        .find(|(_, words)| words.iter().any(|w| contains_term(normalized, w)))
        .map(|(level, _)| *level)
}

fn extract_seniority(headline_norm: &str) -> Option<Seniority> {
    SENIORITY_VOCABULARY
        .iter()
        .find(|(_, words)| words.iter().any(|w| contains_term(headline_norm, w)))
        .map(|(level, _)| *level)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // JD fixture: manufacturing engineering role
    const MANUFACTURING_JD: &str = r#"
        Senior Manufacturing Engineer — Medical Devices
        Requirements: 7+ years in regulated manufacturing, GMP and FMEA required.
        Bachelor's degree in Mechanical Engineering; Master's preferred.
        Lead new product introduction from prototype to launch with a continuous improvement mindset.
        Nice to have: Six Sigma, SolidWorks.
        Travel up to 25% between sites. Relocation assistance available.
    "#;

    // JD fixture: remote software role
    const SOFTWARE_JD: &str = r#"
        Backend Engineer (Remote)
        Must have 3 years of Python and PostgreSQL experience.
        Kubernetes is a plus. We practice Scrum.
    "#;

    fn extractor() -> RequirementExtractor {
        RequirementExtractor::new(Arc::new(Taxonomy::default())).unwrap()
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let set = extractor().extract("   \n\t ");
        assert!(set.is_empty());
        assert_eq!(set.years_required, None);
        assert_eq!(set, RequirementSet::default());
    }

    #[test]
    fn test_scenario_text_must_haves_and_years() {
        let set = extractor().extract("5+ years Python, Docker, AWS required");
        let must: Vec<&str> = set.must_have_keywords.iter().map(String::as_str).collect();
        assert_eq!(must, vec!["aws", "docker", "python"]);
        assert_eq!(set.years_required, Some(5));
        assert!(set.tech_keywords.contains("aws"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let ex = extractor();
        assert_eq!(ex.extract(MANUFACTURING_JD), ex.extract(MANUFACTURING_JD));
    }

    #[test]
    fn test_manufacturing_jd_buckets() {
        let set = extractor().extract(MANUFACTURING_JD);
        assert!(set.process_keywords.contains("gmp"));
        assert!(set.process_keywords.contains("fmea"));
        assert!(set.npi_keywords.contains("new product introduction"));
        assert!(set.mindset_keywords.contains("continuous improvement"));
        assert!(set.must_have_keywords.contains("gmp"));
        assert!(set.must_have_keywords.contains("fmea"));
        // Only mentioned in a nice-to-have sentence
        assert!(!set.must_have_keywords.contains("solidworks"));
        assert!(set.tech_keywords.contains("solidworks"));
    }

    #[test]
    fn test_manufacturing_jd_scalars() {
        let set = extractor().extract(MANUFACTURING_JD);
        assert_eq!(set.years_required, Some(7));
        assert_eq!(set.education_required, Some(EducationLevel::Master));
        assert!(set.travel_required);
        assert!(set.requires_relocation);
        assert_eq!(set.seniority, Some(Seniority::Senior));
        assert!(!set.remote);
    }

    #[test]
    fn test_software_jd_remote_and_optional_markers() {
        let set = extractor().extract(SOFTWARE_JD);
        assert!(set.remote);
        assert_eq!(set.years_required, Some(3));
        assert!(set.must_have_keywords.contains("python"));
        assert!(set.must_have_keywords.contains("postgresql"));
        assert!(!set.must_have_keywords.contains("kubernetes"));
        assert!(set.process_keywords.contains("scrum"));
        assert!(!set.travel_required);
        assert_eq!(set.education_required, None);
    }

    #[test]
    fn test_years_takes_maximum() {
        let set = extractor().extract("2+ years SQL. 10 years of industry experience overall.");
        assert_eq!(set.years_required, Some(10));
    }

    #[test]
    fn test_implausible_years_ignored() {
        let set = extractor().extract("Founded 150 years ago.");
        assert_eq!(set.years_required, None);
    }

    #[test]
    fn test_education_highest_level_wins() {
        let set = extractor().extract("Bachelor's required, PhD a plus, Associate degree considered");
        assert_eq!(set.education_required, Some(EducationLevel::Doctorate));
    }

    #[test]
    fn test_travel_percentage_pattern() {
        assert!(extractor().extract("This role involves 30% travel.").travel_required);
        assert!(!extractor().extract("0% travel expected.").travel_required);
        assert!(!extractor().extract("No travel. Travel up to 10% in theory.").travel_required);
    }

    #[test]
    fn test_unknown_acronym_in_required_sentence_is_must_have() {
        let set = extractor().extract("CSWP certification required. EOE employer.");
        assert!(set.must_have_keywords.contains("cswp"));
        assert!(!set.must_have_keywords.contains("eoe"));
    }

    #[test]
    fn test_items_under_requirements_heading_are_must_have() {
        let set = extractor().extract(
            "Process Engineer\nRequirements:\n- Python\n- FMEA experience\n\
             - CSWP certification\n- Kaizen is a plus\nNice to have:\n- Docker",
        );
        assert!(set.must_have_keywords.contains("python"));
        assert!(set.must_have_keywords.contains("fmea"));
        assert!(set.must_have_keywords.contains("cswp"));
        // Optional marker inside the section, then a non-required heading
        assert!(!set.must_have_keywords.contains("kaizen"));
        assert!(!set.must_have_keywords.contains("docker"));
        assert!(set.tech_keywords.contains("docker"));
    }

    #[test]
    fn test_synthetic_taxonomy_is_honoured() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{"technical": ["cobol"], "required_markers": ["required"]}"#,
        )
        .unwrap();
        let ex = RequirementExtractor::new(Arc::new(taxonomy)).unwrap();
        let set = ex.extract("COBOL required. Python welcome.");
        assert!(set.tech_keywords.contains("cobol"));
        assert!(set.must_have_keywords.contains("cobol"));
        assert!(!set.tech_keywords.contains("python"));
    }

    #[test]
    fn test_extract_posting_applies_overrides() {
        let posting = JobPosting {
            title: Some("Principal Engineer".to_string()),
            location: Some("Remote".to_string()),
            years_required: Some(12),
            ..JobPosting::from_description("3+ years Rust required.")
        };
        let set = extractor().extract_posting(&posting);
        assert_eq!(set.years_required, Some(12));
        assert!(set.remote);
        assert_eq!(set.location.as_deref(), Some("Remote"));
        assert_eq!(set.seniority, Some(Seniority::Principal));
        assert!(set.must_have_keywords.contains("rust"));
    }

    #[test]
    fn test_seniority_from_years_bands() {
        assert_eq!(Seniority::from_years(0.5), Seniority::Junior);
        assert_eq!(Seniority::from_years(3.0), Seniority::Mid);
        assert_eq!(Seniority::from_years(6.0), Seniority::Senior);
        assert_eq!(Seniority::from_years(9.0), Seniority::Lead);
        assert_eq!(Seniority::from_years(20.0), Seniority::Principal);
    }

    #[test]
    fn test_requirement_set_serde_roundtrip_keeps_order() {
        let set = extractor().extract(SOFTWARE_JD);
        let json = serde_json::to_string(&set).unwrap();
        let back: RequirementSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
