// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Cloudify: current weather lookups and per-user favorite cities
//!
//! This crate provides the backend API for resolving city weather through
//! an external provider and for keeping each user's favorite-city list,
//! plus a client that mirrors that list to local storage.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod mirror;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{FavoritesService, WeatherClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub favorites: FavoritesService,
    pub weather: WeatherClient,
}
