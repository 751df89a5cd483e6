//! Application Tracker — in-memory lifecycle of job applications.
//!
//! Saved → Applied → Screening → Interviewing → Offer → Accepted. Any non-terminal
//! status may also move to Rejected or Withdrawn. Accepted, Rejected and Withdrawn
//! are terminal.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::MatchError;
use crate::notifications::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Saved,
    Applied,
    Screening,
    Interviewing,
    Offer,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "saved",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }

    /// The single forward step along the pipeline, if any.
    fn next(self) -> Option<ApplicationStatus> {
        match self {
            ApplicationStatus::Saved => Some(ApplicationStatus::Applied),
            ApplicationStatus::Applied => Some(ApplicationStatus::Screening),
            ApplicationStatus::Screening => Some(ApplicationStatus::Interviewing),
            ApplicationStatus::Interviewing => Some(ApplicationStatus::Offer),
            ApplicationStatus::Offer => Some(ApplicationStatus::Accepted),
            _ => None,
        }
    }

    pub fn can_transition_to(self, to: ApplicationStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(to, ApplicationStatus::Rejected | ApplicationStatus::Withdrawn)
            || self.next() == Some(to)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub match_score: Option<f64>,
    pub priority: Option<Priority>,
    pub history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tracker
// ────────────────────────────────────────────────────────────────────────────

/// Thread-safe store of applications keyed by id. Reads return clones.
#[derive(Default)]
pub struct ApplicationTracker {
    applications: RwLock<HashMap<Uuid, Application>>,
}

impl ApplicationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, company: impl Into<String>, role: impl Into<String>) -> Application {
        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            company: company.into(),
            role: role.into(),
            status: ApplicationStatus::Saved,
            match_score: None,
            priority: None,
            history: vec![],
            created_at: now,
            updated_at: now,
        };

        info!(
            application_id = %application.id,
            company = %application.company,
            role = %application.role,
            "Application created"
        );
        self.write()
            .insert(application.id, application.clone());
        application
    }

    pub fn get(&self, id: Uuid) -> Option<Application> {
        self.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn transition(&self, id: Uuid, to: ApplicationStatus) -> Result<Application, MatchError> {
        let mut applications = self.write();
        let application = applications
            .get_mut(&id)
            .ok_or(MatchError::ApplicationNotFound(id))?;

        let from = application.status;
        if !from.can_transition_to(to) {
            return Err(MatchError::InvalidTransition { id, from, to });
        }

        let at = Utc::now();
        application.status = to;
        application.history.push(StatusChange { from, to, at });
        application.updated_at = at;

        info!(application_id = %id, %from, %to, "Application status changed");
        Ok(application.clone())
    }

    /// Stores the latest match result on an application.
    pub fn record_match(&self, id: Uuid, score: f64, priority: Priority) -> Result<(), MatchError> {
        let mut applications = self.write();
        let application = applications
            .get_mut(&id)
            .ok_or(MatchError::ApplicationNotFound(id))?;

        application.match_score = Some(score);
        application.priority = Some(priority);
        application.updated_at = Utc::now();
        Ok(())
    }

    /// Applications in `status`, oldest first.
    pub fn list_by_status(&self, status: ApplicationStatus) -> Vec<Application> {
        let mut matching: Vec<Application> = self
            .read()
            .values()
            .filter(|a| a.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.created_at);
        matching
    }

    /// Non-terminal applications, best match first. Unscored ones sort last.
    pub fn active(&self) -> Vec<Application> {
        let mut active: Vec<Application> = self
            .read()
            .values()
            .filter(|a| !a.status.is_terminal())
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            let a_score = a.match_score.unwrap_or(f64::NEG_INFINITY);
            let b_score = b.match_score.unwrap_or(f64::NEG_INFINITY);
            b_score
                .total_cmp(&a_score)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        active
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Application>> {
        self.applications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Application>> {
        self.applications
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
