// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Goal model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A single per-day goal stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Goal {
    /// Goal ID (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub owner_id: String,
    /// Free-form label
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Whether the goal shows up in the community feed
    #[serde(default)]
    pub is_public: bool,
    /// Calendar day the goal belongs to (YYYY-MM-DD)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Creation time, used for display ordering only
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Build a new, incomplete goal with a fresh ID.
    pub fn new(owner_id: &str, text: &str, date: NaiveDate, is_public: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            text: text.to_string(),
            completed: false,
            is_public,
            date,
            created_at: Utc::now(),
        }
    }
}

/// Mutable goal fields that can be written individually.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalField {
    Completed(bool),
    Text(String),
    IsPublic(bool),
}

impl GoalField {
    /// Stored field name.
    pub fn name(&self) -> &'static str {
        match self {
            GoalField::Completed(_) => "completed",
            GoalField::Text(_) => "text",
            GoalField::IsPublic(_) => "is_public",
        }
    }

    /// Apply this field to an in-memory goal.
    pub fn apply(&self, goal: &mut Goal) {
        match self {
            GoalField::Completed(v) => goal.completed = *v,
            GoalField::Text(v) => goal.text = v.clone(),
            GoalField::IsPublic(v) => goal.is_public = *v,
        }
    }
}

/// Equality filter for goal queries. `None` fields are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    pub owner_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_public: Option<bool>,
}

impl GoalFilter {
    /// Goals owned by `owner_id`.
    pub fn owner(owner_id: &str) -> Self {
        Self {
            owner_id: Some(owner_id.to_string()),
            ..Default::default()
        }
    }

    /// Restrict to a single calendar day.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Public goals on `date`.
    pub fn public_on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            is_public: Some(true),
            ..Default::default()
        }
    }

    pub fn matches(&self, goal: &Goal) -> bool {
        self.owner_id.as_deref().is_none_or(|o| o == goal.owner_id)
            && self.date.is_none_or(|d| d == goal.date)
            && self.is_public.is_none_or(|p| p == goal.is_public)
    }
}
