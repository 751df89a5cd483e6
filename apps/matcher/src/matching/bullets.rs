//! Bullet Ranker — orders each experience's achievement bullets by relevance to a posting.
//!
//! Scoring per bullet:
//! - +10 per distinct requirement keyword (any bucket) in the bullet
//! - +15 for a quantified metric (digit, `%`, `$`, `€`, `£`)
//! - +10 when it opens with a strong action verb
//! - +5 for 15–30 words, −10 above 35 words
//!
//! Ties keep the original bullet order.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::features::{BulletView, CandidateFeatureView};
use crate::matching::requirements::RequirementSet;
use crate::matching::taxonomy::Taxonomy;
use crate::matching::text::{contains_term, first_word, word_count};

pub const DEFAULT_MAX_BULLETS: usize = 6;

const KEYWORD_POINTS: i32 = 10;
const METRIC_POINTS: i32 = 15;
const ACTION_VERB_POINTS: i32 = 10;
const NARRATIVE_LENGTH_POINTS: i32 = 5;
const OVERLONG_PENALTY: i32 = -10;
const PREFERRED_WORDS: std::ops::RangeInclusive<usize> = 15..=30;
const OVERLONG_WORDS: usize = 35;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedBullet {
    /// Position in the experience's original achievement list.
    pub index: usize,
    pub text: String,
    pub score: i32,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRanking {
    pub experience_id: String,
    pub bullets: Vec<RankedBullet>,
}

/// Experience id → relevance-ordered bullets, in profile order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedBullets {
    pub experiences: Vec<ExperienceRanking>,
}

impl RankedBullets {
    pub fn get(&self, experience_id: &str) -> Option<&[RankedBullet]> {
        self.experiences
            .iter()
            .find(|e| e.experience_id == experience_id)
            .map(|e| e.bullets.as_slice())
    }

    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ranker
// ────────────────────────────────────────────────────────────────────────────

pub struct BulletRanker {
    taxonomy: Arc<Taxonomy>,
}

impl BulletRanker {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Ranks every experience's bullets and keeps the top `max_per_experience`.
    /// `0` yields an empty list for every experience.
    pub fn rank_bullets(
        &self,
        candidate: &CandidateFeatureView,
        requirements: &RequirementSet,
        max_per_experience: usize,
    ) -> RankedBullets {
        let keywords = requirements.all_keywords();

        let experiences = candidate
            .experiences
            .iter()
            .map(|experience| {
                let mut bullets: Vec<RankedBullet> = experience
                    .bullets
                    .iter()
                    .map(|bullet| self.score_bullet(bullet, &keywords))
                    .collect();

                // Stable: equal scores keep chronological order
                bullets.sort_by(|a, b| b.score.cmp(&a.score));
                bullets.truncate(max_per_experience);

                ExperienceRanking {
                    experience_id: experience.id.clone(),
                    bullets,
                }
            })
            .collect();

        RankedBullets { experiences }
    }

    fn score_bullet(&self, bullet: &BulletView, keywords: &BTreeSet<&str>) -> RankedBullet {
        let matched_keywords: Vec<String> = keywords
            .iter()
            .filter(|kw| contains_term(&bullet.normalized, kw))
            .map(|kw| kw.to_string())
            .collect();

        let mut score = KEYWORD_POINTS * matched_keywords.len() as i32;

        if has_metric(&bullet.text) {
            score += METRIC_POINTS;
        }

        if first_word(&bullet.text).is_some_and(|w| self.taxonomy.action_verbs.contains(&w)) {
            score += ACTION_VERB_POINTS;
        }

        let words = word_count(&bullet.text);
        if PREFERRED_WORDS.contains(&words) {
            score += NARRATIVE_LENGTH_POINTS;
        } else if words > OVERLONG_WORDS {
            score += OVERLONG_PENALTY;
        }

        RankedBullet {
            index: bullet.index,
            text: bullet.text.clone(),
            score,
            matched_keywords,
        }
    }
}

fn has_metric(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
