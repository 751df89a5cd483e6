// Matching core: requirement extraction, candidate projection, scoring and bullet ranking.
// Everything here is synchronous and pure; side effects go through notifications.

pub mod bullets;
pub mod cache;
pub mod engine;
pub mod features;
pub mod requirements;
pub mod service;
pub mod taxonomy;
pub mod text;
pub mod weights;

pub use bullets::{BulletRanker, RankedBullet, RankedBullets, DEFAULT_MAX_BULLETS};
pub use engine::{MatchBreakdown, MatchingEngine};
pub use features::CandidateFeatureView;
pub use requirements::{RequirementExtractor, RequirementSet};
pub use service::{MatchOutcome, MatchService};
pub use taxonomy::Taxonomy;
pub use weights::MatchWeights;
