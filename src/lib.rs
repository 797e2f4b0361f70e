// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily Goals: per-day goals, streaks, and a community leaderboard
//!
//! This crate provides the backend API: goal CRUD for signed-in users,
//! streak tracking on goal completion, the public goal feed, and the
//! streak leaderboard.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::GoalStore;
use services::{FeedService, GoalService, ProfileService};

/// Shared application state.
pub struct AppState<S> {
    pub config: Config,
    pub db: Arc<S>,
    pub goal_service: GoalService<S>,
    pub profile_service: ProfileService<S>,
    pub feed_service: FeedService<S>,
}

impl<S: GoalStore> AppState<S> {
    pub fn new(config: Config, db: S) -> Self {
        let db = Arc::new(db);
        Self {
            config,
            goal_service: GoalService::new(db.clone()),
            profile_service: ProfileService::new(db.clone()),
            feed_service: FeedService::new(db.clone()),
            db,
        }
    }
}
