// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Public feed item: a goal joined with its owner's identity.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::{Goal, UserProfile, ANONYMOUS_NAME};

/// A public goal with denormalized owner fields.
///
/// The owner fields are a read-side copy and are never written back to the
/// profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicGoal {
    #[serde(flatten)]
    pub goal: Goal,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub user_streak: u32,
}

impl PublicGoal {
    /// Join a goal with its owner's profile. An empty stored name shows as
    /// anonymous.
    pub fn from_owner(goal: Goal, owner: &UserProfile) -> Self {
        let user_name = if owner.display_name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            owner.display_name.clone()
        };

        Self {
            goal,
            user_name,
            user_avatar: owner.avatar_url.clone(),
            user_streak: owner.streak,
        }
    }

    /// Placeholder identity for an owner that could not be resolved.
    pub fn anonymous(goal: Goal) -> Self {
        Self {
            goal,
            user_name: ANONYMOUS_NAME.to_string(),
            user_avatar: None,
            user_streak: 0,
        }
    }
}
