// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for a signed-in user's profile and goals.

use crate::db::GoalStore;
use crate::error::{AppError, Result};
use crate::models::{DaySummary, Goal, HistoryStats, UserProfile};
use crate::session::Session;
use crate::time_utils::{parse_date, today_utc};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes<S: GoalStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/api/session", post(sign_in::<S>))
        .route("/api/me", get(get_me::<S>))
        .route("/api/goals", get(list_goals::<S>).post(create_goal::<S>))
        .route("/api/goals/{id}", delete(delete_goal::<S>))
        .route("/api/goals/{id}/completion", put(set_completion::<S>))
        .route("/api/goals/{id}/text", put(update_text::<S>))
        .route("/api/goals/{id}/visibility", put(update_visibility::<S>))
        .route("/api/history", get(get_history::<S>))
}

/// Optional `?date=YYYY-MM-DD` parameter; defaults to today (UTC).
#[derive(Deserialize)]
pub struct DateQuery {
    date: Option<String>,
}

impl DateQuery {
    pub fn resolve(&self) -> Result<NaiveDate> {
        resolve_date(self.date.as_deref())
    }
}

pub fn resolve_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => parse_date(raw).map_err(|_| {
            AppError::BadRequest("Invalid 'date' parameter: must be YYYY-MM-DD".to_string())
        }),
        None => Ok(today_utc()),
    }
}

// ─── Profile ─────────────────────────────────────────────────

/// Refresh the profile from the identity token (called after login).
async fn sign_in<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
) -> Result<Json<UserProfile>> {
    let profile = state.profile_service.sign_in(&session).await?;
    Ok(Json(profile))
}

/// Get current user profile.
async fn get_me<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
) -> Result<Json<UserProfile>> {
    let profile = state.profile_service.profile(&session).await?;
    Ok(Json(profile))
}

// ─── Goals ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalsResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub goals: Vec<Goal>,
}

/// Get the user's goals for a day, oldest first.
async fn list_goals<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
    Query(params): Query<DateQuery>,
) -> Result<Json<GoalsResponse>> {
    let date = params.resolve()?;
    let goals = state.goal_service.goals_for_date(&session, date).await?;
    Ok(Json(GoalsResponse { date, goals }))
}

#[derive(Deserialize, Validate)]
struct CreateGoalRequest {
    #[validate(length(min = 1))]
    text: String,
    /// Defaults to today (UTC)
    date: Option<String>,
    #[serde(default)]
    is_public: bool,
}

async fn create_goal<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
    Json(body): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>)> {
    body.validate()?;
    let date = resolve_date(body.date.as_deref())?;

    let goal = state
        .goal_service
        .add_goal(&session, &body.text, date, body.is_public)
        .await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

#[derive(Deserialize)]
struct CompletionRequest {
    completed: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletionResponse {
    pub goal: Goal,
    /// New streak, present when this change advanced it
    pub streak: Option<u32>,
}

async fn set_completion<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
    Path(goal_id): Path<String>,
    Json(body): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>> {
    let result = state
        .goal_service
        .set_completion(&session, &goal_id, body.completed)
        .await?;

    Ok(Json(CompletionResponse {
        goal: result.goal,
        streak: result.profile.map(|p| p.streak),
    }))
}

#[derive(Deserialize, Validate)]
struct TextRequest {
    #[validate(length(min = 1))]
    text: String,
}

async fn update_text<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
    Path(goal_id): Path<String>,
    Json(body): Json<TextRequest>,
) -> Result<Json<Goal>> {
    body.validate()?;
    let goal = state
        .goal_service
        .update_text(&session, &goal_id, &body.text)
        .await?;
    Ok(Json(goal))
}

#[derive(Deserialize)]
struct VisibilityRequest {
    is_public: bool,
}

async fn update_visibility<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
    Path(goal_id): Path<String>,
    Json(body): Json<VisibilityRequest>,
) -> Result<Json<Goal>> {
    let goal = state
        .goal_service
        .update_visibility(&session, &goal_id, body.is_public)
        .await?;
    Ok(Json(goal))
}

async fn delete_goal<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
    Path(goal_id): Path<String>,
) -> Result<StatusCode> {
    state.goal_service.delete_goal(&session, &goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── History ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryResponse {
    pub stats: HistoryStats,
    /// One entry per day with goals, newest first
    pub days: Vec<DaySummary>,
}

async fn get_history<S: GoalStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(session): Extension<Session>,
) -> Result<Json<HistoryResponse>> {
    let (stats, days) = state.goal_service.history(&session).await?;

    tracing::debug!(
        user_id = %session.user_id,
        total_days = stats.total_days,
        total_goals = stats.total_goals,
        "Fetched history"
    );

    Ok(Json(HistoryResponse { stats, days }))
}
