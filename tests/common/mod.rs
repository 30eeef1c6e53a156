// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use cloudify::config::Config;
use cloudify::db::{FavoritesStore, FirestoreDb, MemoryDb};
use cloudify::middleware::auth::create_jwt;
use cloudify::routes::create_router;
use cloudify::services::{FavoritesService, WeatherClient};
use cloudify::AppState;
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

/// Build app state over the given store and weather provider URL.
#[allow(dead_code)]
pub fn test_state(store: FavoritesStore, weather_url: &str, verify_cities: bool) -> Arc<AppState> {
    let config = Config {
        weather_api_url: weather_url.to_string(),
        weather_api_key: Some("test-weather-key".to_string()),
        verify_favorite_cities: verify_cities,
        ..Config::default()
    };

    let weather = WeatherClient::from_config(&config).expect("weather client");
    let mut favorites = FavoritesService::new(store);
    if verify_cities {
        favorites = favorites.with_city_resolver(weather.clone());
    }

    Arc::new(AppState {
        config,
        favorites,
        weather,
    })
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = test_state(
        FavoritesStore::Memory(MemoryDb::new()),
        "http://127.0.0.1:1",
        false,
    );
    (create_router(state.clone()), state)
}

/// Create a test app whose store is disconnected (every store call fails).
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    let state = test_state(
        FavoritesStore::Firestore(FirestoreDb::new_mock()),
        "http://127.0.0.1:1",
        false,
    );
    (create_router(state.clone()), state)
}

/// Create a test JWT token.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("jwt")
}

/// Build a JSON request, optionally authenticated.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

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
