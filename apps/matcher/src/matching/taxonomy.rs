//! Keyword taxonomy — the dictionaries the extractor, engine and ranker match against.
//!
//! Passed around as `Arc<Taxonomy>`; never global. `Taxonomy::default()` carries a seed
//! list suitable for engineering and manufacturing roles; deployments can load their own
//! from JSON. All terms are normalised when the taxonomy is built, so lookups compare
//! like with like.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::MatchError;
use crate::matching::text::normalize_term;

/// Requirement bucket a dictionary term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    MustHave,
    Technical,
    Process,
    Leadership,
    Npi,
    Mindset,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::MustHave,
        Bucket::Technical,
        Bucket::Process,
        Bucket::Leadership,
        Bucket::Npi,
        Bucket::Mindset,
    ];
}

/// Raw on-disk shape. A file replaces the built-in seed lists entirely; keys it omits
/// are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomySource {
    pub must_have: Vec<String>,
    pub technical: Vec<String>,
    pub process: Vec<String>,
    pub leadership: Vec<String>,
    pub npi: Vec<String>,
    pub mindset: Vec<String>,
    pub leadership_verbs: Vec<String>,
    pub action_verbs: Vec<String>,
    pub required_markers: Vec<String>,
    pub optional_markers: Vec<String>,
    pub travel_phrases: Vec<String>,
    pub no_travel_phrases: Vec<String>,
    pub relocation_phrases: Vec<String>,
    pub remote_phrases: Vec<String>,
    pub ignored_acronyms: Vec<String>,
}

/// Normalised, immutable dictionaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub must_have: BTreeSet<String>,
    pub technical: BTreeSet<String>,
    pub process: BTreeSet<String>,
    pub leadership: BTreeSet<String>,
    pub npi: BTreeSet<String>,
    pub mindset: BTreeSet<String>,
    pub leadership_verbs: BTreeSet<String>,
    pub action_verbs: BTreeSet<String>,
    pub required_markers: BTreeSet<String>,
    pub optional_markers: BTreeSet<String>,
    pub travel_phrases: BTreeSet<String>,
    pub no_travel_phrases: BTreeSet<String>,
    pub relocation_phrases: BTreeSet<String>,
    pub remote_phrases: BTreeSet<String>,
    pub ignored_acronyms: BTreeSet<String>,
}

fn normalized_set(terms: &[String]) -> BTreeSet<String> {
    terms
        .iter()
        .map(|t| normalize_term(t))
        .filter(|t| !t.is_empty())
        .collect()
}

impl From<TaxonomySource> for Taxonomy {
    fn from(src: TaxonomySource) -> Self {
        Self {
            must_have: normalized_set(&src.must_have),
            technical: normalized_set(&src.technical),
            process: normalized_set(&src.process),
            leadership: normalized_set(&src.leadership),
            npi: normalized_set(&src.npi),
            mindset: normalized_set(&src.mindset),
            leadership_verbs: normalized_set(&src.leadership_verbs),
            action_verbs: normalized_set(&src.action_verbs),
            required_markers: normalized_set(&src.required_markers),
            optional_markers: normalized_set(&src.optional_markers),
            travel_phrases: normalized_set(&src.travel_phrases),
            no_travel_phrases: normalized_set(&src.no_travel_phrases),
            relocation_phrases: normalized_set(&src.relocation_phrases),
            remote_phrases: normalized_set(&src.remote_phrases),
            ignored_acronyms: normalized_set(&src.ignored_acronyms),
        }
    }
}

impl Taxonomy {
    pub fn from_json_str(json: &str) -> Result<Self, MatchError> {
        let source: TaxonomySource = serde_json::from_str(json)
            .map_err(|e| MatchError::Taxonomy(format!("invalid taxonomy JSON: {e}")))?;
        Ok(source.into())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MatchError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MatchError::Taxonomy(format!("cannot read {}: {e}", path.display()))
        })?;
        let taxonomy = Self::from_json_str(&raw)?;
        debug!(
            "Loaded taxonomy from {} ({} dictionary terms)",
            path.display(),
            taxonomy.term_count()
        );
        Ok(taxonomy)
    }

    pub fn bucket(&self, bucket: Bucket) -> &BTreeSet<String> {
        match bucket {
            Bucket::MustHave => &self.must_have,
            Bucket::Technical => &self.technical,
            Bucket::Process => &self.process,
            Bucket::Leadership => &self.leadership,
            Bucket::Npi => &self.npi,
            Bucket::Mindset => &self.mindset,
        }
    }

    /// Number of keyword terms across all buckets.
    pub fn term_count(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    /// True if `term` is known to any bucket.
    pub fn knows(&self, term: &str) -> bool {
        Bucket::ALL.iter().any(|b| self.bucket(*b).contains(term))
    }
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl TaxonomySource {
    /// Built-in dictionaries used when no taxonomy file is configured.
    pub fn seed() -> Self {
        Self {
            must_have: owned(&[
                "security clearance",
                "pmp",
                "six sigma black belt",
                "professional engineer",
                "cpa",
                "driver's license",
                "us citizenship",
            ]),
            technical: owned(&[
                "python", "java", "rust", "go", "golang", "c++", "c#", "javascript",
                "typescript", "sql", "docker", "kubernetes", "aws", "azure", "gcp",
                "terraform", "linux", "react", "node.js", "spark", "kafka", "postgresql",
                "matlab", "labview", "solidworks", "autocad", "cad", "plc", "sap",
                "tableau", "power bi", "machine learning", "microservices", "ci cd",
                "git", "rest api", "embedded", "fpga",
            ]),
            process: owned(&[
                "agile", "scrum", "kanban", "lean", "six sigma", "dmaic", "iso 9001",
                "gmp", "fmea", "root cause analysis", "spc", "8d", "kaizen", "5s",
                "design of experiments", "doe", "change management", "itil", "devops",
                "capa", "validation", "stage-gate",
            ]),
            leadership: owned(&[
                "lead", "leadership", "manage", "management", "mentor", "mentoring",
                "coach", "supervise", "direct reports", "people management",
                "cross-functional", "stakeholder management", "team building",
            ]),
            npi: owned(&[
                "new product introduction", "npi", "product development", "prototyping",
                "prototype", "innovation", "launch", "commercialization", "r&d",
                "design transfer", "scale-up", "patent", "pilot",
            ]),
            mindset: owned(&[
                "growth mindset", "continuous improvement", "adaptability", "adaptable",
                "curiosity", "ownership", "resilience", "learning agility",
                "self-starter", "bias for action", "collaborative",
            ]),
            leadership_verbs: owned(&[
                "led", "managed", "directed", "mentored", "supervised", "coached",
                "headed", "oversaw",
            ]),
            action_verbs: owned(&[
                "led", "managed", "directed", "mentored", "supervised", "built",
                "designed", "developed", "launched", "delivered", "reduced", "increased",
                "improved", "implemented", "created", "drove", "architected",
                "spearheaded", "established", "optimized", "automated", "streamlined",
                "negotiated", "achieved", "accelerated", "transformed", "shipped",
            ]),
            required_markers: owned(&[
                "required", "requirement", "requirements", "must", "must have",
                "minimum", "mandatory", "essential",
            ]),
            optional_markers: owned(&[
                "preferred", "nice to have", "a plus", "bonus", "desired", "optional",
                "ideally",
            ]),
            travel_phrases: owned(&[
                "travel required", "willing to travel", "ability to travel",
                "travel up to", "frequent travel", "requires travel", "domestic travel",
                "international travel",
            ]),
            no_travel_phrases: owned(&["no travel", "travel not required"]),
            relocation_phrases: owned(&[
                "relocation", "relocate", "must be located", "on-site only",
            ]),
            remote_phrases: owned(&[
                "remote", "fully remote", "work from home", "remote-first",
            ]),
            ignored_acronyms: owned(&[
                "us", "usa", "eoe", "or", "it", "ai", "hr", "ceo", "cto", "vp", "ok",
                "etc", "faq", "bs", "ba", "ms", "ma", "phd", "mba", "ii", "iii",
            ]),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        TaxonomySource::seed().into()
    }
}
