use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const HIGH_PRIORITY_THRESHOLD: f64 = 80.0;
const MEDIUM_PRIORITY_THRESHOLD: f64 = 60.0;

/// Follow-up urgency derived from the overall match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// High ≥ 80, Medium ≥ 60, Low otherwise.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_PRIORITY_THRESHOLD {
            Priority::High
        } else if score >= MEDIUM_PRIORITY_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published once per completed match. Subscribers receive it behind an `Arc`
/// and cannot mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchComputedEvent {
    pub application_id: Option<Uuid>,
    pub overall_score: f64,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    pub job_title: Option<String>,
    pub company: Option<String>,
}

impl MatchComputedEvent {
    pub fn new(application_id: Option<Uuid>, overall_score: f64) -> Self {
        Self {
            application_id,
            overall_score,
            priority: Priority::from_score(overall_score),
            timestamp: Utc::now(),
            job_title: None,
            company: None,
        }
    }

    pub fn with_posting(mut self, job_title: Option<String>, company: Option<String>) -> Self {
        self.job_title = job_title;
        self.company = company;
        self
    }
}
