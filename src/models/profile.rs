// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Display name used when the identity provider has none, and for feed
/// entries whose owner cannot be resolved.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// User profile stored in Firestore (document ID = user ID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Identity provider subject
    pub user_id: String,
    /// Copied from the identity provider on sign-in
    pub display_name: String,
    /// Copied from the identity provider on sign-in
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Consecutive days with at least one completed goal, ending on
    /// `last_completion_date`
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_completion_date: Option<NaiveDate>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh profile with no completions.
    pub fn new(user_id: &str, display_name: &str, avatar_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            avatar_url,
            streak: 0,
            last_completion_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the display fields, leaving streak state alone.
    pub fn apply_identity(&mut self, identity: &ProfileIdentity) {
        self.display_name = identity.display_name.clone();
        self.avatar_url = identity.avatar_url.clone();
        self.updated_at = identity.updated_at;
    }
}

/// The identity-provider fields of a profile, refreshed on sign-in.
///
/// Written as a partial update so a concurrent streak write is never undone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileIdentity {
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileIdentity {
    /// Stored field names, in the order they are written.
    pub const FIELDS: [&'static str; 3] = ["display_name", "avatar_url", "updated_at"];

    pub fn new(display_name: &str, avatar_url: Option<String>) -> Self {
        Self {
            display_name: display_name.to_string(),
            avatar_url,
            updated_at: Utc::now(),
        }
    }
}
