//! Candidate Feature View — a read-only, pre-normalised projection of a `Profile`,
//! built once per scoring call and shared by the engine and the ranker.

use std::collections::HashSet;

use crate::errors::MatchError;
use crate::matching::text::{contains_term, normalize, normalize_term};
use crate::models::{Profile, SkillCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct BulletView {
    /// Position in the original achievement list.
    pub index: usize,
    pub text: String,
    pub normalized: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceView {
    pub id: String,
    pub title: String,
    pub company: String,
    pub bullets: Vec<BulletView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFeatureView {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub methodology_skills: Vec<String>,
    pub years_experience: f64,
    pub location: Option<String>,
    pub willing_to_relocate: bool,
    pub willing_to_travel: bool,
    pub experiences: Vec<ExperienceView>,
    /// Skills, summary and every achievement.
    corpus: String,
    /// Titles and achievements.
    experience_text: String,
    /// Summary and achievements.
    narrative: String,
}

impl CandidateFeatureView {
    /// Validates and projects a profile. Fails only on caller-contract violations.
    pub fn from_profile(profile: &Profile) -> Result<Self, MatchError> {
        if !profile.years_experience.is_finite() || profile.years_experience < 0.0 {
            return Err(MatchError::InvalidProfile(format!(
                "years_experience must be a non-negative number, got {}",
                profile.years_experience
            )));
        }

        let mut seen = HashSet::new();
        for experience in &profile.experiences {
            let id = experience.id.trim();
            if id.is_empty() {
                return Err(MatchError::InvalidProfile(format!(
                    "experience '{}' at '{}' has an empty id",
                    experience.title, experience.company
                )));
            }
            if !seen.insert(id) {
                return Err(MatchError::InvalidProfile(format!(
                    "duplicate experience id '{id}'"
                )));
            }
        }

        let skills_of = |category: SkillCategory| -> Vec<String> {
            profile
                .skills_in(category)
                .map(|s| normalize_term(&s.name))
                .filter(|s| !s.is_empty())
                .collect()
        };

        let experiences: Vec<ExperienceView> = profile
            .experiences
            .iter()
            .map(|e| ExperienceView {
                id: e.id.trim().to_string(),
                title: e.title.clone(),
                company: e.company.clone(),
                bullets: e
                    .achievements
                    .iter()
                    .enumerate()
                    .map(|(index, text)| BulletView {
                        index,
                        text: text.clone(),
                        normalized: normalize(text),
                    })
                    .collect(),
            })
            .collect();

        let summary = normalize(&profile.summary);
        let achievements: String = experiences
            .iter()
            .flat_map(|e| e.bullets.iter().map(|b| b.normalized.as_str()))
            .collect();
        let titles: String = experiences.iter().map(|e| normalize(&e.title)).collect();
        let skills: String = profile.skills.iter().map(|s| normalize(&s.name)).collect();

        Ok(Self {
            technical_skills: skills_of(SkillCategory::Technical),
            soft_skills: skills_of(SkillCategory::Soft),
            methodology_skills: skills_of(SkillCategory::Methodology),
            years_experience: profile.years_experience,
            location: profile
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            willing_to_relocate: profile.willing_to_relocate,
            willing_to_travel: profile.willing_to_travel,
            corpus: format!("{skills}{summary}{achievements}"),
            experience_text: format!("{titles}{achievements}"),
            narrative: format!("{summary}{achievements}"),
            experiences,
        })
    }

    /// Term appears in skills, summary or any achievement.
    pub fn mentions(&self, term: &str) -> bool {
        contains_term(&self.corpus, term)
    }

    /// Term appears in a job title or achievement.
    pub fn experience_mentions(&self, term: &str) -> bool {
        contains_term(&self.experience_text, term)
    }

    /// Term appears in the summary or an achievement.
    pub fn narrative_mentions(&self, term: &str) -> bool {
        contains_term(&self.narrative, term)
    }

    pub fn has_technical_skill(&self, term: &str) -> bool {
        self.technical_skills.iter().any(|s| skill_matches(s, term))
    }

    pub fn has_methodology_skill(&self, term: &str) -> bool {
        self.methodology_skills.iter().any(|s| skill_matches(s, term))
    }

    pub fn has_soft_skill(&self, term: &str) -> bool {
        self.soft_skills.iter().any(|s| skill_matches(s, term))
    }

    pub fn bullets(&self) -> impl Iterator<Item = &BulletView> {
        self.experiences.iter().flat_map(|e| e.bullets.iter())
    }
}

/// A skill covers a term when either contains the other on word boundaries, so
/// "AWS Lambda" covers "aws" and "Docker" covers "docker".
fn skill_matches(skill: &str, term: &str) -> bool {
    contains_term(&format!(" {skill} "), term) || contains_term(&format!(" {term} "), skill)
}
