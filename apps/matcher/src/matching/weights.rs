use serde::{Deserialize, Serialize};

use crate::errors::MatchError;

/// Category weights in whole percentages, so the sum is exact.
///
/// `job_level` is a diagnostic factor and is expected to stay at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub must_have: u32,
    pub tech: u32,
    pub process: u32,
    pub leadership: u32,
    pub npi: u32,
    pub mindset: u32,
    pub logistics: u32,
    pub job_level: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            must_have: 30,
            tech: 20,
            process: 15,
            leadership: 15,
            npi: 10,
            mindset: 5,
            logistics: 5,
            job_level: 0,
        }
    }
}

impl MatchWeights {
    pub fn total(&self) -> u32 {
        self.must_have
            + self.tech
            + self.process
            + self.leadership
            + self.npi
            + self.mindset
            + self.logistics
            + self.job_level
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        match self.total() {
            100 => Ok(()),
            other => Err(MatchError::InvalidWeights(other)),
        }
    }

    /// Weighted sum of sub-scores (each 0–100), clamped to [0, 100].
    pub fn combine(&self, scores: &CategoryScores) -> f64 {
        let weighted = self.must_have as f64 * scores.must_have
            + self.tech as f64 * scores.tech
            + self.process as f64 * scores.process
            + self.leadership as f64 * scores.leadership
            + self.npi as f64 * scores.npi
            + self.mindset as f64 * scores.mindset
            + self.logistics as f64 * scores.logistics
            + self.job_level as f64 * scores.job_level;
        (weighted / 100.0).clamp(0.0, 100.0)
    }
}

/// The eight sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryScores {
    pub must_have: f64,
    pub tech: f64,
    pub process: f64,
    pub leadership: f64,
    pub npi: f64,
    pub mindset: f64,
    pub logistics: f64,
    pub job_level: f64,
}
