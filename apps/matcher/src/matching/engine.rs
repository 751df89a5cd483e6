//! Matching Engine — scores a candidate feature view against a parsed requirement set.
//!
//! Seven weighted factors plus a zero-weight job-level diagnostic. Pure, synchronous and
//! deterministic; all inputs are borrowed and nothing is retained between calls.
//!
//! Algorithm:
//! 1. must-have: share of must-have keywords found anywhere in the profile, halved by
//!    the experience gate when years fall short. A bucket the posting never mentions
//!    counts as met, unless nothing at all was extracted
//! 2. tech / process: share of bucket keywords covered by technical / methodology skills
//! 3. leadership: bullets with a leadership verb against a baseline of three
//! 4. npi / mindset: share of bucket keywords in experience text / narrative
//! 5. logistics: 100 minus location, relocation and travel deductions
//! 6. overall = Σ weight × score, clamped to [0, 100]

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::MatchError;
use crate::matching::features::CandidateFeatureView;
use crate::matching::requirements::{RequirementSet, Seniority};
use crate::matching::taxonomy::Taxonomy;
use crate::matching::text::contains_term;
use crate::matching::weights::{CategoryScores, MatchWeights};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Full match result returned to callers. Every score is in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub overall: f64,
    pub must_have: f64,
    pub tech: f64,
    pub process: f64,
    pub leadership: f64,
    pub npi: f64,
    pub mindset: f64,
    pub logistics: f64,
    /// Diagnostic only; carries a 0% weight.
    pub job_level: f64,
    pub gaps: Vec<String>,
    pub competitive_advantages: Vec<String>,
}

/// Gap threshold for the coverage-based factors.
const COVERAGE_GAP_THRESHOLD: f64 = 50.0;
/// Coverage above which a category counts as a competitive advantage.
const ADVANTAGE_THRESHOLD: f64 = 80.0;
/// Leadership bullets that count as full marks.
const LEADERSHIP_BASELINE: usize = 3;
const EXPERIENCE_GATE_FACTOR: f64 = 0.5;
const LOCATION_PENALTY: f64 = 30.0;
const RELOCATION_PENALTY: f64 = 40.0;
const TRAVEL_PENALTY: f64 = 30.0;
const JOB_LEVEL_STEP_PENALTY: f64 = 25.0;
/// Years above the requirement worth calling out.
const EXPERIENCE_SURPLUS_YEARS: f64 = 3.0;
const MAX_LISTED_MISSING: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

pub struct MatchingEngine {
    taxonomy: Arc<Taxonomy>,
    weights: MatchWeights,
}

impl MatchingEngine {
    pub fn new(taxonomy: Arc<Taxonomy>, weights: MatchWeights) -> Result<Self, MatchError> {
        weights.validate()?;
        Ok(Self { taxonomy, weights })
    }

    /// Computes the eight-factor breakdown, gaps and competitive advantages.
    pub fn compute_match(
        &self,
        candidate: &CandidateFeatureView,
        requirements: &RequirementSet,
    ) -> MatchBreakdown {
        let mut gaps = Vec::new();
        let mut advantages = Vec::new();
        let empty_bucket = if requirements.is_empty() { 0.0 } else { 100.0 };

        // 1. Must-have with experience gate
        let must = coverage(&requirements.must_have_keywords, empty_bucket, &|t| {
            candidate.mentions(t)
        });
        let mut must_have = must.score;
        match requirements.years_required {
            Some(required) if candidate.years_experience < required as f64 => {
                must_have *= EXPERIENCE_GATE_FACTOR;
                gaps.push(format!(
                    "Insufficient years of experience: posting asks for {required}+ years, profile shows {}",
                    format_years(candidate.years_experience)
                ));
            }
            Some(required)
                if candidate.years_experience - required as f64 >= EXPERIENCE_SURPLUS_YEARS =>
            {
                advantages.push(format!(
                    "Experience exceeds the requirement ({} years vs {required}+)",
                    format_years(candidate.years_experience)
                ));
            }
            _ => {}
        }
        must.report("must-have requirements", must_have, &mut gaps, &mut advantages);

        // 2. Technical skills
        let tech = coverage(&requirements.tech_keywords, empty_bucket, &|t| {
            candidate.has_technical_skill(t)
        });
        tech.report("technical skills", tech.score, &mut gaps, &mut advantages);

        // 3. Process / methodology skills
        let process = coverage(&requirements.process_keywords, empty_bucket, &|t| {
            candidate.has_methodology_skill(t)
        });
        process.report("process methodologies", process.score, &mut gaps, &mut advantages);

        // 4. Leadership evidence
        let leadership = self.leadership_score(candidate);
        if leadership == 0.0 {
            gaps.push(
                "No leadership evidence: no achievement shows leading, managing, directing, mentoring or supervising"
                    .to_string(),
            );
        } else if leadership > ADVANTAGE_THRESHOLD {
            advantages.push("Demonstrated leadership across multiple achievements".to_string());
        }

        // 5. NPI / innovation
        let npi = coverage(&requirements.npi_keywords, empty_bucket, &|t| {
            candidate.experience_mentions(t)
        });
        npi.report_presence("new product introduction / innovation", &mut gaps, &mut advantages);

        // 6. Mindset
        let mindset = coverage(&requirements.mindset_keywords, empty_bucket, &|t| {
            candidate.narrative_mentions(t) || candidate.has_soft_skill(t)
        });
        mindset.report_presence("mindset", &mut gaps, &mut advantages);

        // 7. Logistics
        let logistics = logistics_score(candidate, requirements, &mut gaps);

        // 8. Job level (diagnostic)
        let job_level = job_level_score(candidate, requirements);

        let scores = CategoryScores {
            must_have,
            tech: tech.score,
            process: process.score,
            leadership,
            npi: npi.score,
            mindset: mindset.score,
            logistics,
            job_level,
        };
        let overall = self.weights.combine(&scores);

        if overall < COVERAGE_GAP_THRESHOLD && gaps.is_empty() {
            gaps.push(if requirements.is_empty() {
                format!("No recognisable requirements found in this posting ({overall:.0}% overall)")
            } else {
                format!("Low overall alignment with this posting ({overall:.0}%)")
            });
        }

        debug!(
            overall,
            gaps = gaps.len(),
            "Computed match breakdown"
        );

        MatchBreakdown {
            overall,
            must_have: scores.must_have,
            tech: scores.tech,
            process: scores.process,
            leadership: scores.leadership,
            npi: scores.npi,
            mindset: scores.mindset,
            logistics: scores.logistics,
            job_level: scores.job_level,
            gaps,
            competitive_advantages: advantages,
        }
    }

    /// Bullets containing a leadership verb, normalised against the baseline.
    fn leadership_score(&self, candidate: &CandidateFeatureView) -> f64 {
        let count = candidate
            .bullets()
            .filter(|b| {
                self.taxonomy
                    .leadership_verbs
                    .iter()
                    .any(|verb| contains_term(&b.normalized, verb))
            })
            .count();
        (count as f64 / LEADERSHIP_BASELINE as f64 * 100.0).min(100.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Factor helpers
// ────────────────────────────────────────────────────────────────────────────

/// Keyword coverage of one bucket.
struct Coverage<'a> {
    score: f64,
    total: usize,
    missing: Vec<&'a str>,
}

/// `empty_score` applies when the bucket has no keywords.
fn coverage<'a>(
    keywords: &'a BTreeSet<String>,
    empty_score: f64,
    is_covered: &dyn Fn(&str) -> bool,
) -> Coverage<'a> {
    if keywords.is_empty() {
        return Coverage {
            score: empty_score,
            total: 0,
            missing: Vec::new(),
        };
    }
    let missing: Vec<&str> = keywords
        .iter()
        .map(String::as_str)
        .filter(|t| !is_covered(t))
        .collect();
    let matched = keywords.len() - missing.len();
    Coverage {
        score: matched as f64 / keywords.len() as f64 * 100.0,
        total: keywords.len(),
        missing,
    }
}

impl Coverage<'_> {
    /// Gap below the threshold, advantage above 80%. `score` is the (possibly gated)
    /// sub-score; advantages look at raw coverage.
    fn report(&self, label: &str, score: f64, gaps: &mut Vec<String>, advantages: &mut Vec<String>) {
        if self.total == 0 {
            return;
        }
        if score < COVERAGE_GAP_THRESHOLD && !self.missing.is_empty() {
            gaps.push(format!(
                "Limited coverage of {label} ({score:.0}%): missing {}",
                self.listed_missing()
            ));
        }
        if self.score > ADVANTAGE_THRESHOLD {
            advantages.push(format!(
                "Strong coverage of {label} ({:.0}% of {} listed)",
                self.score, self.total
            ));
        }
    }

    /// Gap only when nothing in the bucket is covered.
    fn report_presence(&self, label: &str, gaps: &mut Vec<String>, advantages: &mut Vec<String>) {
        if self.total == 0 {
            return;
        }
        if self.score == 0.0 {
            gaps.push(format!(
                "No {label} evidence for: {}",
                self.listed_missing()
            ));
        } else if self.score > ADVANTAGE_THRESHOLD {
            advantages.push(format!(
                "Strong {label} alignment ({:.0}% of {} listed)",
                self.score, self.total
            ));
        }
    }

    fn listed_missing(&self) -> String {
        let mut listed = self
            .missing
            .iter()
            .take(MAX_LISTED_MISSING)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if self.missing.len() > MAX_LISTED_MISSING {
            listed.push_str(&format!(" (+{} more)", self.missing.len() - MAX_LISTED_MISSING));
        }
        listed
    }
}

/// 100 minus location, relocation and travel deductions, floored at 0.
fn logistics_score(
    candidate: &CandidateFeatureView,
    requirements: &RequirementSet,
    gaps: &mut Vec<String>,
) -> f64 {
    let mut score = 100.0_f64;

    if !requirements.remote {
        if let (Some(job), Some(home)) = (
            requirements.location.as_deref(),
            candidate.location.as_deref(),
        ) {
            if !same_location(job, home) {
                score -= LOCATION_PENALTY;
                gaps.push(format!(
                    "Location mismatch: role is based in {job}, profile is in {home}"
                ));
            }
        }
    }

    if requirements.requires_relocation && !candidate.willing_to_relocate {
        score -= RELOCATION_PENALTY;
        gaps.push("Role requires relocation and the profile is not open to relocating".to_string());
    }

    if requirements.travel_required && !candidate.willing_to_travel {
        score -= TRAVEL_PENALTY;
        gaps.push("Role requires travel and the profile is not open to travel".to_string());
    }

    score.max(0.0)
}

/// Case-insensitive comparison on the city part (text before the first comma).
fn same_location(a: &str, b: &str) -> bool {
    let city = |s: &str| s.split(',').next().unwrap_or(s).trim().to_lowercase();
    city(a) == city(b)
}

/// 100 when the candidate's inferred level meets the stated one, minus 25 per level short.
fn job_level_score(candidate: &CandidateFeatureView, requirements: &RequirementSet) -> f64 {
    let Some(required) = requirements.seniority else {
        return 100.0;
    };
    let held = Seniority::from_years(candidate.years_experience);
    let shortfall = (required.rank() - held.rank()).max(0) as f64;
    (100.0 - shortfall * JOB_LEVEL_STEP_PENALTY).max(0.0)
}

fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        format!("{years:.1}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::requirements::RequirementExtractor;
    use crate::models::{ExperienceEntry, Profile, Skill, SkillCategory};

    const SCENARIO_JD: &str = "5+ years Python, Docker, AWS required";

    fn engine() -> MatchingEngine {
        MatchingEngine::new(Arc::new(Taxonomy::default()), MatchWeights::default()).unwrap()
    }

    fn extract(text: &str) -> RequirementSet {
        RequirementExtractor::new(Arc::new(Taxonomy::default()))
            .unwrap()
            .extract(text)
    }

    fn skill(name: &str, category: SkillCategory) -> Skill {
        Skill {
            name: name.to_string(),
            category,
        }
    }

    fn make_profile(years: f64, skills: Vec<Skill>, achievements: &[&str]) -> Profile {
        Profile {
            name: "Alex".to_string(),
            summary: String::new(),
            years_experience: years,
            location: Some("Phoenix, AZ".to_string()),
            willing_to_relocate: false,
            willing_to_travel: false,
            skills,
            experiences: vec![ExperienceEntry {
                id: "exp-1".to_string(),
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                achievements: achievements.iter().map(|s| s.to_string()).collect(),
            }],
        }
    }

    fn view(profile: &Profile) -> CandidateFeatureView {
        CandidateFeatureView::from_profile(profile).unwrap()
    }

    fn python_docker(years: f64) -> Profile {
        make_profile(
            years,
            vec![
                skill("Python", SkillCategory::Technical),
                skill("Docker", SkillCategory::Technical),
            ],
            &[],
        )
    }

    #[test]
    fn test_invalid_weights_rejected_at_construction() {
        let weights = MatchWeights {
            tech: 0,
            ..MatchWeights::default()
        };
        assert!(MatchingEngine::new(Arc::new(Taxonomy::default()), weights).is_err());
    }

    #[test]
    fn test_scenario_a_two_of_three_must_haves() {
        let breakdown = engine().compute_match(&view(&python_docker(8.0)), &extract(SCENARIO_JD));
        assert!(
            (breakdown.must_have - 200.0 / 3.0).abs() < 1e-9,
            "Expected ~67, got {}",
            breakdown.must_have
        );
        assert!(!breakdown.gaps.iter().any(|g| g.contains("years of experience")));
        assert!(breakdown
            .competitive_advantages
            .iter()
            .any(|a| a.contains("Experience exceeds")));
    }

    #[test]
    fn test_scenario_b_experience_gate_halves_must_have() {
        let req = extract(SCENARIO_JD);
        let a = engine().compute_match(&view(&python_docker(8.0)), &req);
        let b = engine().compute_match(&view(&python_docker(2.0)), &req);

        assert!((b.must_have - a.must_have * 0.5).abs() < 1e-9);
        assert!(b
            .gaps
            .iter()
            .any(|g| g.starts_with("Insufficient years of experience")));
        assert!(b.overall < a.overall);
    }

    #[test]
    fn test_experience_gate_skipped_without_requirement() {
        let req = extract("Python, Docker, AWS required");
        assert_eq!(req.years_required, None);
        let breakdown = engine().compute_match(&view(&python_docker(0.0)), &req);
        assert!((breakdown.must_have - 200.0 / 3.0).abs() < 1e-9);
        assert!(!breakdown.gaps.iter().any(|g| g.contains("years of experience")));
    }

    #[test]
    fn test_scenario_c_remote_job_no_location_penalty() {
        let mut req = extract("Python developer");
        req.location = Some("Remote".to_string());
        req.remote = true;
        let breakdown = engine().compute_match(&view(&python_docker(5.0)), &req);
        assert_eq!(breakdown.logistics, 100.0);
        assert!(!breakdown.gaps.iter().any(|g| g.contains("Location")));
    }

    #[test]
    fn test_location_mismatch_deducts_30() {
        let mut req = RequirementSet::default();
        req.location = Some("Austin, TX".to_string());
        let breakdown = engine().compute_match(&view(&python_docker(5.0)), &req);
        assert_eq!(breakdown.logistics, 70.0);
        assert!(breakdown.gaps.iter().any(|g| g.starts_with("Location mismatch")));
    }

    #[test]
    fn test_same_city_different_state_format_matches() {
        let mut req = RequirementSet::default();
        req.location = Some("phoenix, Arizona".to_string());
        let breakdown = engine().compute_match(&view(&python_docker(5.0)), &req);
        assert_eq!(breakdown.logistics, 100.0);
    }

    #[test]
    fn test_logistics_compounds_and_floors_at_zero() {
        let mut req = RequirementSet::default();
        req.location = Some("Austin, TX".to_string());
        req.requires_relocation = true;
        req.travel_required = true;
        let breakdown = engine().compute_match(&view(&python_docker(5.0)), &req);
        assert_eq!(breakdown.logistics, 0.0);
        let logistics_gaps = breakdown
            .gaps
            .iter()
            .filter(|g| g.contains("Location") || g.contains("relocation") || g.contains("travel"))
            .count();
        assert_eq!(logistics_gaps, 3);
    }

    #[test]
    fn test_willing_candidate_avoids_relocation_and_travel_penalties() {
        let mut profile = python_docker(5.0);
        profile.willing_to_relocate = true;
        profile.willing_to_travel = true;
        let mut req = RequirementSet::default();
        req.requires_relocation = true;
        req.travel_required = true;
        let breakdown = engine().compute_match(&view(&profile), &req);
        assert_eq!(breakdown.logistics, 100.0);
    }

    #[test]
    fn test_tech_matches_against_technical_skills_only() {
        let profile = make_profile(
            5.0,
            vec![skill("Kubernetes", SkillCategory::Methodology)],
            &["Deployed Docker containers"],
        );
        let req = extract("We use Docker and Kubernetes");
        let breakdown = engine().compute_match(&view(&profile), &req);
        assert_eq!(breakdown.tech, 0.0);
        assert!(breakdown
            .gaps
            .iter()
            .any(|g| g.contains("technical skills") && g.contains("docker")));
    }

    #[test]
    fn test_process_matches_methodology_skills() {
        let profile = make_profile(
            5.0,
            vec![
                skill("Lean", SkillCategory::Methodology),
                skill("Kaizen", SkillCategory::Methodology),
            ],
            &[],
        );
        let req = extract("Experience with Lean and Kaizen events");
        let breakdown = engine().compute_match(&view(&profile), &req);
        assert_eq!(breakdown.process, 100.0);
        assert!(breakdown
            .competitive_advantages
            .iter()
            .any(|a| a.contains("process methodologies")));
    }

    #[test]
    fn test_leadership_baseline_and_cap() {
        let one = make_profile(5.0, vec![], &["Led a team of four"]);
        let many = make_profile(
            5.0,
            vec![],
            &[
                "Led a plant team",
                "Managed budgets",
                "Mentored interns",
                "Supervised operators",
            ],
        );
        let req = RequirementSet::default();
        let one_score = engine().compute_match(&view(&one), &req).leadership;
        let many_score = engine().compute_match(&view(&many), &req).leadership;
        assert!((one_score - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(many_score, 100.0);
    }

    #[test]
    fn test_zero_leadership_is_a_gap() {
        let breakdown =
            engine().compute_match(&view(&python_docker(5.0)), &RequirementSet::default());
        assert_eq!(breakdown.leadership, 0.0);
        assert!(breakdown.gaps.iter().any(|g| g.starts_with("No leadership evidence")));
    }

    #[test]
    fn test_npi_and_mindset_presence_gaps() {
        let req = extract("Drive new product introduction with a growth mindset");
        let breakdown = engine().compute_match(&view(&python_docker(5.0)), &req);
        assert_eq!(breakdown.npi, 0.0);
        assert_eq!(breakdown.mindset, 0.0);
        assert!(breakdown
            .gaps
            .iter()
            .any(|g| g.contains("new product introduction / innovation")));
        assert!(breakdown.gaps.iter().any(|g| g.starts_with("No mindset evidence")));
    }

    #[test]
    fn test_npi_found_in_achievements() {
        let profile = make_profile(
            5.0,
            vec![],
            &["Owned new product introduction for three product lines"],
        );
        let req = extract("Drive new product introduction");
        let breakdown = engine().compute_match(&view(&profile), &req);
        assert_eq!(breakdown.npi, 100.0);
    }

    #[test]
    fn test_empty_requirements_still_valid_breakdown() {
        let breakdown =
            engine().compute_match(&view(&python_docker(5.0)), &RequirementSet::default());
        assert!(breakdown.overall >= 0.0 && breakdown.overall <= 100.0);
        assert!(breakdown.overall < 50.0);
        assert!(!breakdown.gaps.is_empty());
    }

    #[test]
    fn test_low_overall_always_has_gap() {
        // Leadership present, so the only gap comes from the nothing-extracted fallback.
        let profile = make_profile(
            5.0,
            vec![],
            &["Led a team", "Managed a line", "Directed a program"],
        );
        let breakdown = engine().compute_match(&view(&profile), &RequirementSet::default());
        assert!(breakdown.overall < 50.0);
        assert_eq!(breakdown.gaps.len(), 1);
        assert!(breakdown.gaps[0].starts_with("No recognisable requirements"));
    }

    #[test]
    fn test_unmentioned_buckets_count_as_met() {
        let profile = make_profile(
            5.0,
            vec![skill("Python", SkillCategory::Technical)],
            &["Led a team", "Managed a line", "Directed a program"],
        );
        let req = extract("Python developer");
        assert!(req.must_have_keywords.is_empty());

        let breakdown = engine().compute_match(&view(&profile), &req);
        assert_eq!(breakdown.must_have, 100.0);
        assert_eq!(breakdown.process, 100.0);
        assert_eq!(breakdown.npi, 100.0);
        assert_eq!(breakdown.mindset, 100.0);
        assert_eq!(breakdown.overall, 100.0);
        assert!(breakdown.gaps.is_empty(), "gaps: {:?}", breakdown.gaps);
        // Only the tech bucket was listed, so it is the only coverage advantage
        assert!(!breakdown
            .competitive_advantages
            .iter()
            .any(|a| a.contains("process methodologies") || a.contains("mindset")));
        assert_eq!(
            crate::notifications::Priority::from_score(breakdown.overall),
            crate::notifications::Priority::High
        );
    }

    #[test]
    fn test_mindset_covered_by_soft_skill() {
        let profile = make_profile(
            5.0,
            vec![skill("Growth Mindset", SkillCategory::Soft)],
            &[],
        );
        let req = extract("Python developer with a growth mindset");
        let breakdown = engine().compute_match(&view(&profile), &req);
        assert_eq!(breakdown.mindset, 100.0);
        assert!(!breakdown.gaps.iter().any(|g| g.starts_with("No mindset evidence")));
    }

    #[test]
    fn test_overall_bounded_for_strong_candidate() {
        let mut profile = make_profile(
            12.0,
            vec![
                skill("Python", SkillCategory::Technical),
                skill("Docker", SkillCategory::Technical),
                skill("AWS", SkillCategory::Technical),
                skill("Scrum", SkillCategory::Methodology),
            ],
            &[
                "Led launch of a new analytics platform, cutting costs 30%",
                "Managed 6 engineers with a growth mindset",
                "Mentored 4 juniors",
            ],
        );
        profile.willing_to_travel = true;
        let req = extract(
            "Senior engineer. 5+ years Python, Docker, AWS required. Scrum. Launch new products. Growth mindset.",
        );
        let breakdown = engine().compute_match(&view(&profile), &req);
        assert!(breakdown.overall > 80.0, "Expected > 80, got {}", breakdown.overall);
        assert!(breakdown.overall <= 100.0);
        for score in [
            breakdown.must_have,
            breakdown.tech,
            breakdown.process,
            breakdown.leadership,
            breakdown.npi,
            breakdown.mindset,
            breakdown.logistics,
            breakdown.job_level,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_job_level_diagnostic() {
        let req = extract("Principal Engineer\nPython");
        let junior = engine().compute_match(&view(&python_docker(1.0)), &req);
        let senior = engine().compute_match(&view(&python_docker(15.0)), &req);
        // Principal (5) vs Junior (1) → four levels short
        assert_eq!(junior.job_level, 0.0);
        assert_eq!(senior.job_level, 100.0);
    }

    #[test]
    fn test_missing_list_truncated() {
        let req = extract("Python, Java, Rust, Go, SQL, Docker and Kafka required");
        let breakdown = engine().compute_match(&view(&make_profile(5.0, vec![], &[])), &req);
        let gap = breakdown
            .gaps
            .iter()
            .find(|g| g.contains("must-have"))
            .unwrap();
        assert!(gap.contains("(+2 more)"), "got {gap}");
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(8.0), "8");
        assert_eq!(format_years(2.5), "2.5");
    }
}
