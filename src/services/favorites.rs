// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite-city operations scoped to an authenticated identity.
//!
//! Stateless between calls: all state lives in the Favorites Store, whose
//! `(owner, city)` uniqueness resolves concurrent adds. A duplicate add
//! succeeds without effect and yields the record already stored.

use crate::db::{FavoritesStore, InsertOutcome};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{normalize_city_name, FavoriteCity};
use crate::services::weather::{WeatherClient, WeatherError};
use crate::time_utils::now_rfc3339;

/// Mediates all reads and mutations of a user's favorite cities.
#[derive(Clone)]
pub struct FavoritesService {
    store: FavoritesStore,
    /// When set, new favorites are resolved to the provider's canonical name.
    city_resolver: Option<WeatherClient>,
}

impl FavoritesService {
    pub fn new(store: FavoritesStore) -> Self {
        Self {
            store,
            city_resolver: None,
        }
    }

    /// Verify city names against the weather provider before storing them.
    pub fn with_city_resolver(mut self, weather: WeatherClient) -> Self {
        self.city_resolver = Some(weather);
        self
    }

    /// All favorites owned by `identity`, oldest first.
    pub async fn list(&self, identity: Option<&AuthUser>) -> Result<Vec<FavoriteCity>> {
        let user = require_identity(identity)?;
        self.store.list_favorites(&user.user_id).await
    }

    /// Add a city to the user's favorites.
    ///
    /// Adding a city that is already a favorite is not an error; the existing
    /// record is returned as [`InsertOutcome::Existing`].
    pub async fn add(&self, identity: Option<&AuthUser>, city_name: &str) -> Result<InsertOutcome> {
        let user = require_identity(identity)?;
        let mut city = normalize_city_name(city_name)?;

        if let Some(weather) = &self.city_resolver {
            city = resolve_city(weather, &city).await?;
        }

        let favorite = FavoriteCity::new(&user.user_id, &city, now_rfc3339())?;
        let outcome = self.store.insert_favorite(&favorite).await?;

        if outcome.is_created() {
            tracing::info!(owner_id = %user.user_id, city = %city, "Favorite added");
        } else {
            tracing::debug!(owner_id = %user.user_id, city = %city, "Favorite already present");
        }

        Ok(outcome)
    }

    /// Remove a city from the user's favorites.
    pub async fn remove(&self, identity: Option<&AuthUser>, city_name: &str) -> Result<()> {
        let user = require_identity(identity)?;
        let city = normalize_city_name(city_name)?;

        if !self.store.delete_favorite(&user.user_id, &city).await? {
            return Err(AppError::NotFound(format!("Favorite city '{}'", city)));
        }

        tracing::info!(owner_id = %user.user_id, city = %city, "Favorite removed");
        Ok(())
    }
}

fn require_identity(identity: Option<&AuthUser>) -> Result<&AuthUser> {
    identity
        .filter(|user| !user.user_id.trim().is_empty())
        .ok_or(AppError::Unauthorized)
}

/// Map a user-entered name to the provider's canonical city name.
async fn resolve_city(weather: &WeatherClient, city: &str) -> Result<String> {
    match weather.current(city).await {
        Ok(current) => normalize_city_name(&current.name),
        Err(WeatherError::CityNotFound(_)) => Err(AppError::BadRequest(format!(
            "'{}' is not a known city",
            city
        ))),
        Err(e) => Err(e.into()),
    }
}
