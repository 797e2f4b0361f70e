//! Database layer: the goal store contract and its backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use std::future::Future;

use crate::error::AppError;
use crate::models::{Goal, GoalField, GoalFilter, ProfileIdentity, UserProfile};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const GOALS: &str = "goals";
}

/// Document store holding goals and user profiles.
///
/// Queries return every match in no particular order; callers sort.
/// There is no cross-document transaction: each call is an independent
/// write or read.
pub trait GoalStore: Send + Sync + 'static {
    // ── Profiles ──────────────────────────────────────────────────

    fn get_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, AppError>> + Send;

    /// Create the profile, or fully replace it if it exists.
    fn upsert_profile(
        &self,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Create the profile only if none exists yet.
    ///
    /// Returns `false`, writing nothing, when the profile is already there.
    fn create_profile(
        &self,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Write only the display fields of an existing profile.
    ///
    /// Returns `NotFound` if the profile does not exist.
    fn update_profile_identity(
        &self,
        user_id: &str,
        identity: &ProfileIdentity,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn list_profiles(&self) -> impl Future<Output = Result<Vec<UserProfile>, AppError>> + Send;

    // ── Goals ─────────────────────────────────────────────────────

    fn get_goal(
        &self,
        goal_id: &str,
    ) -> impl Future<Output = Result<Option<Goal>, AppError>> + Send;

    fn insert_goal(&self, goal: &Goal) -> impl Future<Output = Result<(), AppError>> + Send;

    fn query_goals(
        &self,
        filter: &GoalFilter,
    ) -> impl Future<Output = Result<Vec<Goal>, AppError>> + Send;

    /// Write a single field of an existing goal.
    ///
    /// Returns `NotFound` if the goal does not exist.
    fn update_goal_field(
        &self,
        goal_id: &str,
        field: GoalField,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn delete_goal(&self, goal_id: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}
