// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod feed;
pub mod goal;
pub mod profile;
pub mod stats;

pub use feed::PublicGoal;
pub use goal::{Goal, GoalField, GoalFilter};
pub use profile::{ProfileIdentity, UserProfile, ANONYMOUS_NAME};
pub use stats::{CommunityStats, DaySummary, HistoryStats};
