// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite-city API routes (require authentication).

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{normalize_city_name, FavoriteSummary};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Favorites routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/favorites",
        get(list_favorites)
            .post(add_favorite)
            .delete(remove_favorite),
    )
}

/// Request body for add and remove: `{ "cityName": "..." }`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CityRequest {
    #[validate(custom(function = "validate_city_name"))]
    pub city_name: String,
}

fn validate_city_name(value: &str) -> std::result::Result<(), ValidationError> {
    normalize_city_name(value).map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("city_name");
        if let AppError::BadRequest(msg) = e {
            err.message = Some(msg.into());
        }
        err
    })
}

/// Reject malformed bodies before any store access.
fn parse_city_request(
    payload: std::result::Result<Json<CityRequest>, JsonRejection>,
) -> Result<CityRequest> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(request)
}

/// Response for favorite removal.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RemoveFavoriteResponse {
    pub success: bool,
}

/// List the current user's favorites.
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<FavoriteSummary>>> {
    let favorites = state.favorites.list(Some(&user)).await?;

    tracing::debug!(
        owner_id = %user.user_id,
        count = favorites.len(),
        "Listed favorites"
    );

    Ok(Json(favorites.into_iter().map(Into::into).collect()))
}

/// Add a city. 201 when created, 200 when it was already a favorite.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteSummary>)> {
    let request = parse_city_request(payload)?;
    let outcome = state.favorites.add(Some(&user), &request.city_name).await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.into_favorite().into())))
}

/// Remove a city.
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CityRequest>, JsonRejection>,
) -> Result<Json<RemoveFavoriteResponse>> {
    let request = parse_city_request(payload)?;
    state
        .favorites
        .remove(Some(&user), &request.city_name)
        .await?;

    Ok(Json(RemoveFavoriteResponse { success: true }))
}
