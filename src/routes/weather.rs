// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public weather lookup route.

use crate::error::{AppError, Result};
use crate::models::normalize_city_name;
use crate::services::WeatherReport;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/weather", get(get_weather))
}

#[derive(Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

/// Current conditions for `?city=<name>`.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>> {
    let city = params
        .city
        .ok_or_else(|| AppError::BadRequest("Missing 'city' parameter".to_string()))?;
    let city = normalize_city_name(&city)?;

    tracing::debug!(city = %city, "Weather lookup");

    let current = state.weather.current(&city).await?;
    Ok(Json(current.into()))
}
