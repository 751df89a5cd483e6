use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::matching::bullets::DEFAULT_MAX_BULLETS;
use crate::matching::cache::DEFAULT_CACHE_CAPACITY;
use crate::notifications::BusConfig;

const DEFAULT_DRAIN_TIMEOUT_MS: u64 = 2_000;

/// Runtime configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup with context.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON taxonomy file. Falls back to the built-in seed dictionaries when unset.
    pub taxonomy_path: Option<PathBuf>,
    pub max_bullets_per_experience: usize,
    /// Postings whose requirements are kept; `0` disables the cache.
    pub requirement_cache_capacity: usize,
    pub bus_queue_capacity: Option<usize>,
    pub bus_drain_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            taxonomy_path: optional_env("TAXONOMY_PATH").map(PathBuf::from),
            max_bullets_per_experience: parse_env("MAX_BULLETS_PER_EXPERIENCE")?
                .unwrap_or(DEFAULT_MAX_BULLETS),
            requirement_cache_capacity: parse_env("REQUIREMENT_CACHE_CAPACITY")?
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
            bus_queue_capacity: parse_env("BUS_QUEUE_CAPACITY")?,
            bus_drain_timeout: Duration::from_millis(
                parse_env("BUS_DRAIN_TIMEOUT_MS")?.unwrap_or(DEFAULT_DRAIN_TIMEOUT_MS),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn bus_config(&self) -> BusConfig {
        BusConfig {
            queue_capacity: self.bus_queue_capacity,
            drain_timeout: self.bus_drain_timeout,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
        })
        .transpose()
}
