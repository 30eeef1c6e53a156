// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod favorites;
pub mod weather;

pub use favorites::FavoritesService;
pub use weather::{WeatherClient, WeatherError, WeatherReport};
