use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::applications::{ApplicationTracker, ScoreRecorder};
use crate::config::Config;
use crate::matching::{MatchService, MatchWeights, Taxonomy};
use crate::notifications::{AnalyticsSubscriber, LoggingSubscriber, NotificationBus};

/// Shared application state: the match pipeline plus everything subscribed to it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<MatchService>,
    pub bus: Arc<NotificationBus>,
    pub tracker: Arc<ApplicationTracker>,
    /// Running aggregate of every match the bus has delivered.
    pub analytics: Arc<AnalyticsSubscriber>,
}

impl AppState {
    /// Loads the taxonomy, builds the pipeline and registers the built-in subscribers.
    /// The bus is left stopped.
    pub fn build(config: Config) -> Result<Self> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => Taxonomy::from_json_file(path)
                .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
            None => Taxonomy::default(),
        };
        info!(terms = taxonomy.term_count(), "Taxonomy loaded");

        let bus = Arc::new(NotificationBus::new(config.bus_config()));
        let tracker = Arc::new(ApplicationTracker::new());
        let analytics = Arc::new(AnalyticsSubscriber::new());

        bus.subscribe(Arc::new(LoggingSubscriber));
        bus.subscribe(analytics.clone());
        bus.subscribe(Arc::new(ScoreRecorder::new(Arc::clone(&tracker))));

        let service = MatchService::with_cache_capacity(
            Arc::new(taxonomy),
            MatchWeights::default(),
            Arc::clone(&bus),
            config.max_bullets_per_experience,
            config.requirement_cache_capacity,
        )
        .context("Failed to build match service")?;

        Ok(Self {
            config,
            service: Arc::new(service),
            bus,
            tracker,
            analytics,
        })
    }
}
