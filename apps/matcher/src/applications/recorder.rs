use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::applications::tracker::ApplicationTracker;
use crate::notifications::{MatchComputedEvent, MatchSubscriber};

/// Writes each event's score and priority onto the tracked application.
/// Events without an application id are ignored.
pub struct ScoreRecorder {
    tracker: Arc<ApplicationTracker>,
}

impl ScoreRecorder {
    pub fn new(tracker: Arc<ApplicationTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl MatchSubscriber for ScoreRecorder {
    fn name(&self) -> &str {
        "score_recorder"
    }

    async fn on_match(&self, event: Arc<MatchComputedEvent>) -> anyhow::Result<()> {
        let Some(id) = event.application_id else {
            return Ok(());
        };

        self.tracker
            .record_match(id, event.overall_score, event.priority)
            .with_context(|| format!("Failed to record match score for application {id}"))?;

        debug!(application_id = %id, score = event.overall_score, "Match score recorded");
        Ok(())
    }
}
