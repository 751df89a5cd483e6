//! Built-in bus subscribers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::notifications::bus::MatchSubscriber;
use crate::notifications::events::{MatchComputedEvent, Priority};

/// Emits one structured log line per completed match.
#[derive(Debug, Default)]
pub struct LoggingSubscriber;

#[async_trait]
impl MatchSubscriber for LoggingSubscriber {
    fn name(&self) -> &str {
        "logging"
    }

    async fn on_match(&self, event: Arc<MatchComputedEvent>) -> anyhow::Result<()> {
        info!(
            application_id = ?event.application_id,
            score = event.overall_score,
            priority = %event.priority,
            job_title = event.job_title.as_deref().unwrap_or("-"),
            company = event.company.as_deref().unwrap_or("-"),
            "Match computed"
        );
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analytics
// ────────────────────────────────────────────────────────────────────────────

/// Point-in-time aggregate over every event seen so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub matches: u64,
    pub mean_score: Option<f64>,
    pub best_score: Option<f64>,
    pub by_priority: HashMap<Priority, u64>,
}

#[derive(Default)]
struct Totals {
    matches: u64,
    score_sum: f64,
    best_score: Option<f64>,
    by_priority: HashMap<Priority, u64>,
}

#[derive(Default)]
pub struct AnalyticsSubscriber {
    totals: Mutex<Totals>,
}

impl AnalyticsSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let totals = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        AnalyticsSnapshot {
            matches: totals.matches,
            mean_score: (totals.matches > 0).then(|| totals.score_sum / totals.matches as f64),
            best_score: totals.best_score,
            by_priority: totals.by_priority.clone(),
        }
    }
}

#[async_trait]
impl MatchSubscriber for AnalyticsSubscriber {
    fn name(&self) -> &str {
        "analytics"
    }

    async fn on_match(&self, event: Arc<MatchComputedEvent>) -> anyhow::Result<()> {
        let mut totals = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        totals.matches += 1;
        totals.score_sum += event.overall_score;
        totals.best_score = Some(
            totals
                .best_score
                .map_or(event.overall_score, |best| best.max(event.overall_score)),
        );
        *totals.by_priority.entry(event.priority).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_analytics_aggregates_scores() {
        let analytics = AnalyticsSubscriber::new();
        for score in [90.0, 70.0, 20.0, 40.0] {
            analytics
                .on_match(Arc::new(MatchComputedEvent::new(None, score)))
                .await
                .unwrap();
        }

        let snapshot = analytics.snapshot();
        assert_eq!(snapshot.matches, 4);
        assert_eq!(snapshot.mean_score, Some(55.0));
        assert_eq!(snapshot.best_score, Some(90.0));
        assert_eq!(snapshot.by_priority.get(&Priority::High), Some(&1));
        assert_eq!(snapshot.by_priority.get(&Priority::Medium), Some(&1));
        assert_eq!(snapshot.by_priority.get(&Priority::Low), Some(&2));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = AnalyticsSubscriber::new().snapshot();
        assert_eq!(snapshot.matches, 0);
        assert!(snapshot.mean_score.is_none());
        assert!(snapshot.best_score.is_none());
    }

    #[tokio::test]
    async fn test_logging_subscriber_never_fails() {
        let event = MatchComputedEvent::new(None, 12.0)
            .with_posting(Some("Engineer".to_string()), Some("Acme".to_string()));
        assert!(LoggingSubscriber.on_match(Arc::new(event)).await.is_ok());
    }
}
