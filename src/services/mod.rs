// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod feed;
pub mod goals;
pub mod leaderboard;
pub mod profiles;
pub mod streak;

pub use feed::FeedService;
pub use goals::{CompletionResult, GoalService};
pub use profiles::ProfileService;
