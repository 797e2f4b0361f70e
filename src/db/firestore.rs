// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the [`GoalStore`] operations over two collections:
//! - Users (profiles, keyed by user ID)
//! - Goals (keyed by goal ID)

use crate::db::{collections, GoalStore};
use crate::error::AppError;
use crate::models::{Goal, GoalField, GoalFilter, ProfileIdentity, UserProfile};
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }
}

impl GoalStore for FirestoreDb {
    // ─── Profile Operations ──────────────────────────────────────

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn create_profile(&self, profile: &UserProfile) -> Result<bool, AppError> {
        let result: Result<(), FirestoreError> = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(false))
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await;

        match result {
            Ok(()) => Ok(true),
            Err(FirestoreError::DataConflictError(_)) => Ok(false),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    async fn update_profile_identity(
        &self,
        user_id: &str,
        identity: &ProfileIdentity,
    ) -> Result<(), AppError> {
        // Masked to the display fields so streak state written by a
        // concurrent completion survives.
        let result: Result<(), FirestoreError> = self
            .client
            .fluent()
            .update()
            .fields(ProfileIdentity::FIELDS)
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(user_id)
            .object(identity)
            .execute()
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(FirestoreError::DataNotFoundError(_)) => {
                Err(AppError::NotFound(format!("Profile {} not found", user_id)))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Goal Operations ─────────────────────────────────────────

    async fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::GOALS)
            .obj()
            .one(goal_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_goal(&self, goal: &Goal) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::GOALS)
            .document_id(&goal.id)
            .object(goal)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn query_goals(&self, filter: &GoalFilter) -> Result<Vec<Goal>, AppError> {
        let filter = filter.clone();

        self.client
            .fluent()
            .select()
            .from(collections::GOALS)
            .filter(move |q| {
                q.for_all([
                    filter
                        .owner_id
                        .clone()
                        .and_then(|owner_id| q.field("owner_id").eq(owner_id)),
                    filter
                        .date
                        .and_then(|date| q.field("date").eq(date.to_string())),
                    filter
                        .is_public
                        .and_then(|is_public| q.field("is_public").eq(is_public)),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_goal_field(&self, goal_id: &str, field: GoalField) -> Result<(), AppError> {
        let name = field.name();
        let value = match &field {
            GoalField::Completed(v) | GoalField::IsPublic(v) => serde_json::json!(v),
            GoalField::Text(v) => serde_json::json!(v),
        };
        let patch = serde_json::json!({ name: value });

        // The existence precondition keeps a field write from creating a
        // partial goal document.
        let result: Result<(), FirestoreError> = self
            .client
            .fluent()
            .update()
            .fields([name])
            .in_col(collections::GOALS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(goal_id)
            .object(&patch)
            .execute()
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(FirestoreError::DataNotFoundError(_)) => {
                Err(AppError::NotFound(format!("Goal {} not found", goal_id)))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(collections::GOALS)
            .document_id(goal_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
