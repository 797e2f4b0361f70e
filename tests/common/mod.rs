// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use daily_goals::config::Config;
use daily_goals::db::{FirestoreDb, GoalStore, MemoryDb};
use daily_goals::error::AppError;
use daily_goals::middleware::auth::create_jwt;
use daily_goals::models::{Goal, GoalField, GoalFilter, ProfileIdentity, UserProfile};
use daily_goals::routes::create_router;
use daily_goals::AppState;
use std::collections::HashSet;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Generate a unique ID for test isolation.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// In-memory store whose profile operations fail for selected users, or for
/// everyone when `all_profiles` is set.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FlakyDb {
    pub inner: MemoryDb,
    pub broken_users: HashSet<String>,
    pub all_profiles: bool,
}

impl FlakyDb {
    #[allow(dead_code)]
    fn check(&self, user_id: &str) -> Result<(), AppError> {
        if self.all_profiles || self.broken_users.contains(user_id) {
            return Err(AppError::Database("profile store unavailable".to_string()));
        }
        Ok(())
    }
}

impl GoalStore for FlakyDb {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.check(user_id)?;
        self.inner.get_profile(user_id).await
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.check(&profile.user_id)?;
        self.inner.upsert_profile(profile).await
    }

    async fn create_profile(&self, profile: &UserProfile) -> Result<bool, AppError> {
        self.check(&profile.user_id)?;
        self.inner.create_profile(profile).await
    }

    async fn update_profile_identity(
        &self,
        user_id: &str,
        identity: &ProfileIdentity,
    ) -> Result<(), AppError> {
        self.check(user_id)?;
        self.inner.update_profile_identity(user_id, identity).await
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        self.inner.list_profiles().await
    }

    async fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>, AppError> {
        self.inner.get_goal(goal_id).await
    }

    async fn insert_goal(&self, goal: &Goal) -> Result<(), AppError> {
        self.inner.insert_goal(goal).await
    }

    async fn query_goals(&self, filter: &GoalFilter) -> Result<Vec<Goal>, AppError> {
        self.inner.query_goals(filter).await
    }

    async fn update_goal_field(&self, goal_id: &str, field: GoalField) -> Result<(), AppError> {
        self.inner.update_goal_field(goal_id, field).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<(), AppError> {
        self.inner.delete_goal(goal_id).await
    }
}

/// Create a test app over any store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with<S: GoalStore>(db: S) -> (axum::Router, Arc<AppState<S>>) {
    let state = Arc::new(AppState::new(Config::test_default(), db));
    (create_router(state.clone()), state)
}

/// Create a test app over an empty in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState<MemoryDb>>) {
    create_test_app_with(MemoryDb::new())
}

/// Create a session token for `user_id` signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, name: Option<&str>, signing_key: &[u8]) -> String {
    create_jwt(user_id, name, None, signing_key).unwrap()
}

/// Build an authenticated request with an optional JSON body.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
