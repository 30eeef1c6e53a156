// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod favorite;

pub use favorite::{normalize_city_name, FavoriteCity, FavoriteSummary};
