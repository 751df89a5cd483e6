//! Match Service — runs the full evaluation pipeline for one profile and one posting.
//!
//! Flow: feature view → requirements (cached) → match breakdown → bullet ranking →
//!       publish `MatchComputedEvent` → return outcome.
//!
//! Publishing is fire-and-forget: a rejected event is logged and the outcome is still
//! returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::MatchError;
use crate::matching::bullets::{BulletRanker, RankedBullets};
use crate::matching::cache::{RequirementCache, DEFAULT_CACHE_CAPACITY};
use crate::matching::engine::{MatchBreakdown, MatchingEngine};
use crate::matching::features::CandidateFeatureView;
use crate::matching::requirements::{RequirementExtractor, RequirementSet};
use crate::matching::taxonomy::Taxonomy;
use crate::matching::weights::MatchWeights;
use crate::models::{JobPosting, Profile};
use crate::notifications::{MatchComputedEvent, NotificationBus, Priority};

/// Everything one evaluation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub requirements: RequirementSet,
    pub breakdown: MatchBreakdown,
    pub ranked_bullets: RankedBullets,
    pub priority: Priority,
}

pub struct MatchService {
    extractor: RequirementExtractor,
    engine: MatchingEngine,
    ranker: BulletRanker,
    cache: RequirementCache,
    bus: Arc<NotificationBus>,
    max_bullets_per_experience: usize,
}

impl MatchService {
    pub fn new(
        taxonomy: Arc<Taxonomy>,
        weights: MatchWeights,
        bus: Arc<NotificationBus>,
        max_bullets_per_experience: usize,
    ) -> Result<Self, MatchError> {
        Self::with_cache_capacity(
            taxonomy,
            weights,
            bus,
            max_bullets_per_experience,
            DEFAULT_CACHE_CAPACITY,
        )
    }

    /// Like `new`, with a bound on how many postings the requirement cache keeps.
    pub fn with_cache_capacity(
        taxonomy: Arc<Taxonomy>,
        weights: MatchWeights,
        bus: Arc<NotificationBus>,
        max_bullets_per_experience: usize,
        cache_capacity: usize,
    ) -> Result<Self, MatchError> {
        Ok(Self {
            extractor: RequirementExtractor::new(Arc::clone(&taxonomy))?,
            engine: MatchingEngine::new(Arc::clone(&taxonomy), weights)?,
            ranker: BulletRanker::new(taxonomy),
            cache: RequirementCache::with_capacity(cache_capacity),
            bus,
            max_bullets_per_experience,
        })
    }

    pub fn cache(&self) -> &RequirementCache {
        &self.cache
    }

    /// Steps:
    /// 1. validate and project the profile (the only fallible step)
    /// 2. extract requirements, reusing a cached set for a repeated posting
    /// 3. compute the breakdown
    /// 4. rank bullets per experience
    /// 5. publish the event for subscribers
    pub fn evaluate(
        &self,
        profile: &Profile,
        posting: &JobPosting,
        application_id: Option<Uuid>,
    ) -> Result<MatchOutcome, MatchError> {
        // Step 1: Feature view
        let view = CandidateFeatureView::from_profile(profile)?;

        // Step 2: Requirements
        let requirements = self.cache.get_or_extract(&self.extractor, posting);
        info!(
            keywords = requirements.all_keywords().len(),
            years_required = ?requirements.years_required,
            "Requirements ready"
        );

        // Step 3: Match
        let breakdown = self.engine.compute_match(&view, &requirements);
        let priority = Priority::from_score(breakdown.overall);

        // Step 4: Bullets
        let ranked_bullets =
            self.ranker
                .rank_bullets(&view, &requirements, self.max_bullets_per_experience);

        info!(
            overall = breakdown.overall,
            %priority,
            gaps = breakdown.gaps.len(),
            advantages = breakdown.competitive_advantages.len(),
            "Match evaluated"
        );

        // Step 5: Notify
        let event = MatchComputedEvent::new(application_id, breakdown.overall)
            .with_posting(posting.title.clone(), posting.company.clone());
        if let Err(err) = self.bus.publish(event) {
            warn!(error = %err, "Match event not published");
        }

        Ok(MatchOutcome {
            requirements: RequirementSet::clone(&requirements),
            breakdown,
            ranked_bullets,
            priority,
        })
    }
}
