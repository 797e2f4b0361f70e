//! In-process goal store backed by concurrent maps.
//!
//! Used for local development (`GOAL_STORE=memory`) and tests. Contents are
//! lost on restart.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::db::GoalStore;
use crate::error::AppError;
use crate::models::{Goal, GoalField, GoalFilter, ProfileIdentity, UserProfile};

#[derive(Clone, Default)]
pub struct MemoryDb {
    profiles: Arc<DashMap<String, UserProfile>>,
    goals: Arc<DashMap<String, Goal>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GoalStore for MemoryDb {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.get(user_id).map(|p| p.value().clone()))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn create_profile(&self, profile: &UserProfile) -> Result<bool, AppError> {
        match self.profiles.entry(profile.user_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(true)
            }
        }
    }

    async fn update_profile_identity(
        &self,
        user_id: &str,
        identity: &ProfileIdentity,
    ) -> Result<(), AppError> {
        let mut profile = self
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user_id)))?;
        profile.value_mut().apply_identity(identity);
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        Ok(self.profiles.iter().map(|p| p.value().clone()).collect())
    }

    async fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>, AppError> {
        Ok(self.goals.get(goal_id).map(|g| g.value().clone()))
    }

    async fn insert_goal(&self, goal: &Goal) -> Result<(), AppError> {
        self.goals.insert(goal.id.clone(), goal.clone());
        Ok(())
    }

    async fn query_goals(&self, filter: &GoalFilter) -> Result<Vec<Goal>, AppError> {
        Ok(self
            .goals
            .iter()
            .filter(|g| filter.matches(g.value()))
            .map(|g| g.value().clone())
            .collect())
    }

    async fn update_goal_field(&self, goal_id: &str, field: GoalField) -> Result<(), AppError> {
        let mut goal = self
            .goals
            .get_mut(goal_id)
            .ok_or_else(|| AppError::NotFound(format!("Goal {} not found", goal_id)))?;
        field.apply(goal.value_mut());
        Ok(())
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<(), AppError> {
        self.goals.remove(goal_id);
        Ok(())
    }
}
