// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloudify API Server
//!
//! Serves current weather lookups and per-user favorite cities.

use cloudify::{
    config::{Config, StoreBackend},
    db::{FavoritesStore, FirestoreDb, MemoryDb},
    services::{FavoritesService, WeatherClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, backend = ?config.store_backend, "Starting Cloudify API");

    // Initialize Favorites Store
    let store = match config.store_backend {
        StoreBackend::Firestore => {
            FavoritesStore::Firestore(FirestoreDb::new(&config.gcp_project_id).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory favorites store; data is lost on restart");
            FavoritesStore::Memory(MemoryDb::new())
        }
    };

    // Initialize weather provider client
    let weather = WeatherClient::from_config(&config)?;
    if !weather.is_configured() {
        tracing::warn!("WEATHER_API_KEY not set; weather lookups will fail");
    }

    let mut favorites = FavoritesService::new(store);
    if config.verify_favorite_cities {
        if weather.is_configured() {
            favorites = favorites.with_city_resolver(weather.clone());
            tracing::info!("Favorite cities verified against weather provider");
        } else {
            tracing::warn!("City verification requested but no weather API key; storing names as given");
        }
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        favorites,
        weather,
    });

    // Build router
    let app = cloudify::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cloudify=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
