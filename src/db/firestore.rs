// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed favorite-city operations.
//!
//! Each favorite is one document in `favorite_cities`, keyed by
//! owner and city name so the pair is unique at the store level.

use crate::db::{collections, favorite_doc_id, InsertOutcome};
use crate::error::AppError;
use crate::models::FavoriteCity;
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
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

        Ok(Self {
            client: Some(client),
        })
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

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Favorite City Operations ────────────────────────────────

    /// Get all favorites owned by `owner_id`, oldest first.
    pub async fn list_favorites(&self, owner_id: &str) -> Result<Vec<FavoriteCity>, AppError> {
        let owner = owner_id.to_string();

        let mut favorites: Vec<FavoriteCity> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITE_CITIES)
            .filter(move |q| q.for_all([q.field("owner_id").eq(owner.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Sorted here rather than in the query to avoid a composite index
        favorites.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(favorites)
    }

    /// Get a single favorite by its `(owner, city)` key.
    pub async fn get_favorite(
        &self,
        owner_id: &str,
        city_name: &str,
    ) -> Result<Option<FavoriteCity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FAVORITE_CITIES)
            .obj()
            .one(&favorite_doc_id(owner_id, city_name))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a favorite unless its `(owner, city)` key already exists.
    ///
    /// Uses create-only semantics; an already-exists conflict resolves to the
    /// stored record. If that record is removed between the conflict and the
    /// read, the insert is retried once.
    pub async fn insert_favorite(&self, favorite: &FavoriteCity) -> Result<InsertOutcome, AppError> {
        let doc_id = favorite_doc_id(&favorite.owner_id, &favorite.city_name);

        for _ in 0..2 {
            let result: Result<FavoriteCity, FirestoreError> = self
                .get_client()?
                .fluent()
                .insert()
                .into(collections::FAVORITE_CITIES)
                .document_id(&doc_id)
                .object(favorite)
                .execute()
                .await;

            match result {
                Ok(created) => return Ok(InsertOutcome::Created(created)),
                Err(FirestoreError::DataConflictError(_)) => {
                    if let Some(existing) = self
                        .get_favorite(&favorite.owner_id, &favorite.city_name)
                        .await?
                    {
                        return Ok(InsertOutcome::Existing(existing));
                    }
                    tracing::debug!(
                        owner_id = %favorite.owner_id,
                        city = %favorite.city_name,
                        "Favorite vanished after insert conflict, retrying"
                    );
                }
                Err(e) => return Err(AppError::Database(e.to_string())),
            }
        }

        Err(AppError::Database(format!(
            "Favorite {} changed concurrently during insert",
            doc_id
        )))
    }

    /// Delete a favorite. Returns `false` if it did not exist.
    pub async fn delete_favorite(&self, owner_id: &str, city_name: &str) -> Result<bool, AppError> {
        let result = self
            .get_client()?
            .fluent()
            .delete()
            .from(collections::FAVORITE_CITIES)
            .document_id(favorite_doc_id(owner_id, city_name))
            .precondition(FirestoreWritePrecondition::Exists(true))
            .execute()
            .await;

        match result {
            Ok(()) => Ok(true),
            Err(FirestoreError::DataNotFoundError(_)) => Ok(false),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }
}
