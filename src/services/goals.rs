// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal service.
//!
//! Handles a user's own goals:
//! 1. Listing a day's goals and the dates that have any
//! 2. Creating, editing, and deleting goals
//! 3. Toggling completion, which advances the owner's streak
//!
//! The goal write and the profile write are not transactional. Two
//! completions racing on the same profile both read the old streak and the
//! last write wins.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::GoalStore;
use crate::error::{AppError, Result};
use crate::models::{DaySummary, Goal, GoalField, GoalFilter, HistoryStats, UserProfile};
use crate::services::streak;
use crate::session::Session;

/// Longest goal label accepted, in characters.
pub const MAX_GOAL_TEXT_CHARS: usize = 500;

pub struct GoalService<S> {
    db: Arc<S>,
}

impl<S> Clone for GoalService<S> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

/// Outcome of a completion toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub goal: Goal,
    /// The profile as written by the streak update, if one ran and succeeded
    pub profile: Option<UserProfile>,
}

/// Trim a goal label and check it is usable.
pub fn normalize_text(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Goal text must not be empty".to_string()));
    }
    if text.chars().count() > MAX_GOAL_TEXT_CHARS {
        return Err(AppError::BadRequest(format!(
            "Goal text must be at most {} characters",
            MAX_GOAL_TEXT_CHARS
        )));
    }
    Ok(text.to_string())
}

impl<S: GoalStore> GoalService<S> {
    pub fn new(db: Arc<S>) -> Self {
        Self { db }
    }

    /// The session user's goals on `date`, oldest first.
    pub async fn goals_for_date(&self, session: &Session, date: NaiveDate) -> Result<Vec<Goal>> {
        let mut goals = self
            .db
            .query_goals(&GoalFilter::owner(&session.user_id).on(date))
            .await?;
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        tracing::debug!(user_id = %session.user_id, %date, count = goals.len(), "Fetched goals");
        Ok(goals)
    }

    /// Create an incomplete goal for the session user.
    pub async fn add_goal(
        &self,
        session: &Session,
        text: &str,
        date: NaiveDate,
        is_public: bool,
    ) -> Result<Goal> {
        let text = normalize_text(text)?;
        let goal = Goal::new(&session.user_id, &text, date, is_public);
        self.db.insert_goal(&goal).await?;

        tracing::info!(
            user_id = %session.user_id,
            goal_id = %goal.id,
            %date,
            is_public,
            "Goal created"
        );
        Ok(goal)
    }

    /// Set a goal's completion flag.
    ///
    /// Only an incomplete to complete transition advances the streak.
    /// Un-completing never touches the profile. The streak update is
    /// best-effort: if it fails, the goal stays completed and the error is
    /// logged, not returned.
    pub async fn set_completion(
        &self,
        session: &Session,
        goal_id: &str,
        completed: bool,
    ) -> Result<CompletionResult> {
        let mut goal = self.owned_goal(session, goal_id).await?;
        let was_completed = goal.completed;

        self.db
            .update_goal_field(goal_id, GoalField::Completed(completed))
            .await?;
        goal.completed = completed;

        tracing::info!(
            user_id = %session.user_id,
            goal_id,
            completed,
            "Goal completion updated"
        );

        let profile = if completed && !was_completed {
            match self.advance_streak(&goal.owner_id, goal.date).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        user_id = %goal.owner_id,
                        goal_id,
                        "Streak update not applied"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(CompletionResult { goal, profile })
    }

    /// Read, advance, and write back the owner's streak.
    async fn advance_streak(&self, user_id: &str, completion_date: NaiveDate) -> Result<UserProfile> {
        let current = self.db.get_profile(user_id).await?;
        let previous = current.as_ref().map(|p| p.streak);

        let updated = streak::advance_streak(user_id, current, completion_date);
        self.db.upsert_profile(&updated).await?;

        tracing::info!(
            user_id,
            previous_streak = ?previous,
            streak = updated.streak,
            %completion_date,
            "Streak updated"
        );
        Ok(updated)
    }

    pub async fn update_text(&self, session: &Session, goal_id: &str, text: &str) -> Result<Goal> {
        let text = normalize_text(text)?;
        let mut goal = self.owned_goal(session, goal_id).await?;

        let field = GoalField::Text(text);
        self.db.update_goal_field(goal_id, field.clone()).await?;
        field.apply(&mut goal);
        Ok(goal)
    }

    pub async fn update_visibility(
        &self,
        session: &Session,
        goal_id: &str,
        is_public: bool,
    ) -> Result<Goal> {
        let mut goal = self.owned_goal(session, goal_id).await?;

        self.db
            .update_goal_field(goal_id, GoalField::IsPublic(is_public))
            .await?;
        goal.is_public = is_public;
        Ok(goal)
    }

    /// Delete a goal. The owner's streak is left as is.
    pub async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<()> {
        self.owned_goal(session, goal_id).await?;
        self.db.delete_goal(goal_id).await?;

        tracing::info!(user_id = %session.user_id, goal_id, "Goal deleted");
        Ok(())
    }

    /// Distinct dates with at least one goal, newest first.
    pub async fn goal_dates(&self, session: &Session) -> Result<Vec<NaiveDate>> {
        let goals = self
            .db
            .query_goals(&GoalFilter::owner(&session.user_id))
            .await?;

        let mut dates: Vec<NaiveDate> = goals.iter().map(|g| g.date).collect();
        dates.sort_by(|a, b| b.cmp(a));
        dates.dedup();
        Ok(dates)
    }

    /// Overall completion stats plus a per-day breakdown, newest day first.
    pub async fn history(&self, session: &Session) -> Result<(HistoryStats, Vec<DaySummary>)> {
        let goals = self
            .db
            .query_goals(&GoalFilter::owner(&session.user_id))
            .await?;
        Ok(HistoryStats::from_goals(&goals))
    }

    /// Fetch a goal owned by the session user.
    ///
    /// Goals owned by someone else are reported as missing.
    async fn owned_goal(&self, session: &Session, goal_id: &str) -> Result<Goal> {
        self.db
            .get_goal(goal_id)
            .await?
            .filter(|g| g.owner_id == session.user_id)
            .ok_or_else(|| AppError::NotFound(format!("Goal {} not found", goal_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;

    fn setup() -> (GoalService<MemoryDb>, Arc<MemoryDb>, Session) {
        let db = Arc::new(MemoryDb::new());
        (GoalService::new(db.clone()), db, Session::new("u1"))
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Run 5k ").unwrap(), "Run 5k");
        assert!(normalize_text("   ").is_err());
        assert!(normalize_text(&"x".repeat(MAX_GOAL_TEXT_CHARS + 1)).is_err());
        assert!(normalize_text(&"é".repeat(MAX_GOAL_TEXT_CHARS)).is_ok());
    }

    #[tokio::test]
    async fn test_goals_for_date_sorted_by_creation() {
        let (svc, db, session) = setup();
        let day = date("2024-01-10");

        let mut later = Goal::new("u1", "later", day, false);
        later.created_at = "2024-01-10T12:00:00Z".parse().unwrap();
        let mut earlier = Goal::new("u1", "earlier", day, false);
        earlier.created_at = "2024-01-10T08:00:00Z".parse().unwrap();
        db.insert_goal(&later).await.unwrap();
        db.insert_goal(&earlier).await.unwrap();

        svc.add_goal(&session, "other day", date("2024-01-11"), false)
            .await
            .unwrap();
        svc.add_goal(&Session::new("u2"), "not mine", day, true)
            .await
            .unwrap();

        let goals = svc.goals_for_date(&session, day).await.unwrap();
        let texts: Vec<_> = goals.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["earlier", "later"]);
    }

    #[tokio::test]
    async fn test_completion_advances_streak() {
        let (svc, db, session) = setup();
        let mut profile = UserProfile::new("u1", "Al", None);
        profile.streak = 3;
        profile.last_completion_date = Some(date("2024-01-10"));
        db.upsert_profile(&profile).await.unwrap();

        let goal = svc
            .add_goal(&session, "Read", date("2024-01-11"), false)
            .await
            .unwrap();
        let result = svc.set_completion(&session, &goal.id, true).await.unwrap();

        assert!(result.goal.completed);
        let stored = db.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(stored.streak, 4);
        assert_eq!(stored.last_completion_date, Some(date("2024-01-11")));
        assert_eq!(result.profile, Some(stored));
    }

    #[tokio::test]
    async fn test_completion_creates_missing_profile() {
        let (svc, db, session) = setup();
        let goal = svc
            .add_goal(&session, "Read", date("2024-03-01"), false)
            .await
            .unwrap();

        svc.set_completion(&session, &goal.id, true).await.unwrap();

        let stored = db.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(stored.streak, 1);
        assert_eq!(stored.last_completion_date, Some(date("2024-03-01")));
    }

    #[tokio::test]
    async fn test_uncomplete_leaves_streak() {
        let (svc, db, session) = setup();
        let goal = svc
            .add_goal(&session, "Read", date("2024-03-01"), false)
            .await
            .unwrap();
        svc.set_completion(&session, &goal.id, true).await.unwrap();
        let before = db.get_profile("u1").await.unwrap().unwrap();

        let result = svc.set_completion(&session, &goal.id, false).await.unwrap();

        assert!(!result.goal.completed);
        assert!(result.profile.is_none());
        assert_eq!(db.get_profile("u1").await.unwrap().unwrap(), before);
        assert!(!db.get_goal(&goal.id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_recompleting_does_not_advance() {
        let (svc, db, session) = setup();
        let goal = svc
            .add_goal(&session, "Read", date("2024-03-01"), false)
            .await
            .unwrap();
        svc.set_completion(&session, &goal.id, true).await.unwrap();

        // Move the profile back a day so a second advance would be visible.
        let mut profile = db.get_profile("u1").await.unwrap().unwrap();
        profile.last_completion_date = Some(date("2024-02-29"));
        db.upsert_profile(&profile).await.unwrap();

        let result = svc.set_completion(&session, &goal.id, true).await.unwrap();
        assert!(result.profile.is_none());
        assert_eq!(db.get_profile("u1").await.unwrap().unwrap().streak, 1);
    }

    #[tokio::test]
    async fn test_text_and_visibility_edits_leave_streak() {
        let (svc, db, session) = setup();
        let goal = svc
            .add_goal(&session, "Read", date("2024-03-01"), false)
            .await
            .unwrap();

        let edited = svc.update_text(&session, &goal.id, " Read more ").await.unwrap();
        assert_eq!(edited.text, "Read more");
        let shared = svc.update_visibility(&session, &goal.id, true).await.unwrap();
        assert!(shared.is_public);

        let stored = db.get_goal(&goal.id).await.unwrap().unwrap();
        assert_eq!(stored.text, "Read more");
        assert!(stored.is_public);
        assert!(db.get_profile("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_users_goal_is_not_found() {
        let (svc, db, session) = setup();
        let goal = svc
            .add_goal(&Session::new("u2"), "Theirs", date("2024-03-01"), false)
            .await
            .unwrap();

        let err = svc.set_completion(&session, &goal.id, true).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = svc.delete_goal(&session, &goal.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(db.get_goal(&goal.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_keeps_profile() {
        let (svc, db, session) = setup();
        let goal = svc
            .add_goal(&session, "Read", date("2024-03-01"), false)
            .await
            .unwrap();
        svc.set_completion(&session, &goal.id, true).await.unwrap();

        svc.delete_goal(&session, &goal.id).await.unwrap();

        assert!(db.get_goal(&goal.id).await.unwrap().is_none());
        assert_eq!(db.get_profile("u1").await.unwrap().unwrap().streak, 1);
    }

    #[tokio::test]
    async fn test_goal_dates_distinct_newest_first() {
        let (svc, _, session) = setup();
        for d in ["2024-01-10", "2024-01-12", "2024-01-10", "2024-01-11"] {
            svc.add_goal(&session, "g", date(d), false).await.unwrap();
        }

        let dates = svc.goal_dates(&session).await.unwrap();
        assert_eq!(
            dates,
            vec![date("2024-01-12"), date("2024-01-11"), date("2024-01-10")]
        );
    }
}
