// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily Goals API Server
//!
//! Serves goal tracking, streaks, the public feed, and the leaderboard
//! over a Firestore (or in-memory) goal store.

use daily_goals::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, GoalStore, MemoryDb},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        store = ?config.store_backend,
        "Starting Daily Goals API"
    );

    match config.store_backend {
        StoreBackend::Firestore => {
            let db = FirestoreDb::new(&config.gcp_project_id).await?;
            serve(config, db).await
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory goal store; data will not survive a restart");
            serve(config, MemoryDb::new()).await
        }
    }
}

async fn serve<S: GoalStore>(config: Config, db: S) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("0.0.0.0:{}", config.port);

    // Build shared state and router
    let state = Arc::new(AppState::new(config, db));
    let app = daily_goals::routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("daily_goals=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
