// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community routes: the public goal feed and the streak leaderboard.

use crate::db::GoalStore;
use crate::error::Result;
use crate::models::{CommunityStats, PublicGoal};
use crate::routes::api::DateQuery;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes<S: GoalStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/api/feed", get(get_feed::<S>))
        .route("/api/leaderboard", get(get_leaderboard::<S>))
}

// ─── Public Feed ─────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FeedResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Newest first
    pub goals: Vec<PublicGoal>,
    pub stats: CommunityStats,
}

async fn get_feed<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<DateQuery>,
) -> Result<Json<FeedResponse>> {
    let date = params.resolve()?;
    let (goals, stats) = state.feed_service.community(date).await?;

    Ok(Json(FeedResponse { date, goals, stats }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub streak: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

async fn get_leaderboard<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<LeaderboardResponse>> {
    let ranked = state.profile_service.leaderboard().await?;

    let entries = ranked
        .into_iter()
        .zip(1u32..)
        .map(|(profile, rank)| LeaderboardEntry {
            rank,
            user_id: profile.user_id,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            streak: profile.streak,
        })
        .collect();

    Ok(Json(LeaderboardResponse { entries }))
}
