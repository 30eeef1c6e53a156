// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite city model for storage and API.

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest accepted city name, in characters.
pub const MAX_CITY_NAME_LEN: usize = 100;

/// A favorite city stored in the Favorites Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    /// Opaque identifier assigned at creation
    pub id: String,
    /// Identity that owns this record
    pub owner_id: String,
    /// Display name, as resolved by the weather provider when verification is on
    pub city_name: String,
    /// When the favorite was added (RFC3339, millisecond precision)
    pub created_at: String,
}

impl FavoriteCity {
    /// Build a new record with a fresh random id.
    pub fn new(owner_id: &str, city_name: &str, created_at: String) -> Result<Self, AppError> {
        Ok(Self {
            id: generate_id()?,
            owner_id: owner_id.to_string(),
            city_name: city_name.to_string(),
            created_at,
        })
    }
}

/// Public view of a favorite: `{ id, cityName }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoriteSummary {
    pub id: String,
    pub city_name: String,
}

impl From<FavoriteCity> for FavoriteSummary {
    fn from(favorite: FavoriteCity) -> Self {
        Self {
            id: favorite.id,
            city_name: favorite.city_name,
        }
    }
}

/// Trim a user-supplied city name and check it is storable.
///
/// Comparison after trimming is exact and case-sensitive.
pub fn normalize_city_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(AppError::BadRequest("cityName must not be empty".to_string()));
    }
    if name.chars().count() > MAX_CITY_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "cityName must be at most {} characters",
            MAX_CITY_NAME_LEN
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(AppError::BadRequest(
            "cityName must not contain control characters".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// 128 random bits, hex encoded.
fn generate_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System randomness unavailable")))?;
    Ok(hex::encode(bytes))
}
