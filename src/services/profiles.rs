// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile service: sign-in refresh, profile reads, and the leaderboard.

use std::sync::Arc;

use crate::db::GoalStore;
use crate::error::{AppError, Result};
use crate::models::{ProfileIdentity, UserProfile};
use crate::services::leaderboard;
use crate::session::Session;

pub struct ProfileService<S> {
    db: Arc<S>,
}

impl<S> Clone for ProfileService<S> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<S: GoalStore> ProfileService<S> {
    pub fn new(db: Arc<S>) -> Self {
        Self { db }
    }

    /// Refresh the session user's display fields, creating the profile on
    /// first sign-in.
    ///
    /// Only the display fields are written to an existing profile, so a
    /// completion landing concurrently keeps its streak.
    pub async fn sign_in(&self, session: &Session) -> Result<UserProfile> {
        let display_name = session.display_name_or_anonymous();
        let identity = ProfileIdentity::new(display_name, session.avatar_url.clone());

        match self.db.update_profile_identity(&session.user_id, &identity).await {
            Ok(()) => {}
            Err(AppError::NotFound(_)) => {
                let fresh =
                    UserProfile::new(&session.user_id, display_name, session.avatar_url.clone());
                if self.db.create_profile(&fresh).await? {
                    tracing::info!(user_id = %session.user_id, "Created profile on first sign-in");
                    return Ok(fresh);
                }
                // Created by a first completion in the meantime.
                self.db
                    .update_profile_identity(&session.user_id, &identity)
                    .await?;
            }
            Err(e) => return Err(e),
        }

        self.profile(session).await
    }

    /// The session user's profile.
    pub async fn profile(&self, session: &Session) -> Result<UserProfile> {
        self.db
            .get_profile(&session.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", session.user_id)))
    }

    /// Every profile, ranked for display.
    pub async fn leaderboard(&self) -> Result<Vec<UserProfile>> {
        let profiles = self.db.list_profiles().await?;
        let ranked = leaderboard::rank(&profiles);

        tracing::debug!(users = ranked.len(), "Leaderboard ranked");
        Ok(ranked)
    }
}
