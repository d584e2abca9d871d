// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitQuest session runner
//!
//! Loads the group snapshot from the API and reports the yearly leaderboard
//! and the active user's workout consistency, plus the recent group chat.

use fitquest::{config::Config, sync::SnapshotClient, time_utils::format_utc_rfc3339, WorkoutSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        reference_year = config.reference_year,
        "Starting FitQuest session"
    );

    let client = SnapshotClient::new(&config.api_url);
    match client.health().await {
        Ok(true) => tracing::info!("Snapshot API healthy"),
        Ok(false) => tracing::warn!("Snapshot API reported unhealthy"),
        Err(e) => tracing::warn!(error = %e, "Snapshot API unreachable, working locally"),
    }

    let session = WorkoutSession::load(client, config.session_context()).await;
    tracing::info!(
        today = %session.reference_key(),
        reference_date = %format_utc_rfc3339(session.reference_date()),
        "Reference date"
    );

    for (place, standing) in session.leaderboard().iter().enumerate() {
        tracing::info!(
            place = place + 1,
            name = %standing.user.name,
            year_count = standing.year_count,
            total = standing.user.total,
            streak = standing.user.streak,
            badges = standing.user.badges,
            "Leaderboard"
        );
    }

    let active = session.active_user();
    let grid = session.consistency_grid(&active.name)?;
    let done_days: usize = grid.iter().map(|month| month.done_days()).sum();
    let tracked_days: usize = grid.iter().map(|month| month.days().count()).sum();
    tracing::info!(
        user = %active.name,
        year = config.reference_year,
        done_days,
        tracked_days,
        "Workout consistency"
    );

    match session.messages().await {
        Ok(messages) => tracing::info!(count = messages.len(), "Recent chat messages"),
        Err(e) => tracing::warn!(error = %e, code = e.error_code(), "Chat unavailable"),
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fitquest=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
