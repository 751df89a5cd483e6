use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::config::Config;
use matcher::models::{JobPosting, Profile};
use matcher::state::AppState;

const USAGE: &str = "usage: matcher <profile.json> <job-description.txt>";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let (profile_path, job_path) = parse_args()?;
    let profile = load_profile(&profile_path)?;
    let posting = JobPosting::from_description(
        std::fs::read_to_string(&job_path)
            .with_context(|| format!("Failed to read job description {}", job_path.display()))?,
    );

    // Build app state and start delivering events
    let state = AppState::build(config)?;
    state.bus.start()?;

    let application = state.tracker.create(
        posting.company.clone().unwrap_or_default(),
        job_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );
    let outcome = state
        .service
        .evaluate(&profile, &posting, Some(application.id))?;

    state.bus.stop().await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    let analytics = state.analytics.snapshot();
    info!(
        matches = analytics.matches,
        best_score = ?analytics.best_score,
        dropped_events = state.bus.dropped(),
        "Done"
    );
    Ok(())
}

fn parse_args() -> Result<(PathBuf, PathBuf)> {
    let mut args = std::env::args_os().skip(1);
    match (args.next(), args.next(), args.next()) {
        (Some(profile), Some(job), None) => Ok((PathBuf::from(profile), PathBuf::from(job))),
        _ => bail!(USAGE),
    }
}

fn load_profile(path: &Path) -> Result<Profile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid profile JSON in {}", path.display()))
}
