use thiserror::Error;
use uuid::Uuid;

use crate::applications::ApplicationStatus;

/// Library-level error type.
///
/// Only caller-contract violations surface here. Malformed job text never produces an
/// error; it degrades to a partial `RequirementSet` instead.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid weights: categories sum to {0}%, expected 100%")]
    InvalidWeights(u32),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Application not found: {0}")]
    ApplicationNotFound(Uuid),

    #[error("Invalid status transition for application {id}: {from} -> {to}")]
    InvalidTransition {
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Notification bus error: {0}")]
    Bus(#[from] BusError),
}

/// Errors raised by the notification bus lifecycle and publish path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("Queue full ({capacity} events pending)")]
    QueueFull { capacity: usize },

    #[error("Bus is already running")]
    AlreadyRunning,

    #[error("Bus is not running")]
    NotRunning,

    #[error("Bus worker failed: {0}")]
    WorkerFailed(String),
}
