// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process Favorites Store for local development and tests.

use crate::db::InsertOutcome;
use crate::models::FavoriteCity;
use dashmap::DashMap;
use std::sync::Arc;

/// Favorites kept per owner in insertion order.
///
/// The per-owner map entry is held for the whole check-and-insert, so
/// concurrent adds of the same city for one owner store a single record.
#[derive(Clone, Default)]
pub struct MemoryDb {
    favorites: Arc<DashMap<String, Vec<FavoriteCity>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_favorites(&self, owner_id: &str) -> Vec<FavoriteCity> {
        self.favorites
            .get(owner_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn insert_favorite(&self, favorite: &FavoriteCity) -> InsertOutcome {
        let mut entry = self
            .favorites
            .entry(favorite.owner_id.clone())
            .or_default();

        if let Some(existing) = entry.iter().find(|f| f.city_name == favorite.city_name) {
            return InsertOutcome::Existing(existing.clone());
        }

        entry.push(favorite.clone());
        InsertOutcome::Created(favorite.clone())
    }

    pub fn delete_favorite(&self, owner_id: &str, city_name: &str) -> bool {
        let Some(mut entry) = self.favorites.get_mut(owner_id) else {
            return false;
        };

        let before = entry.len();
        entry.retain(|f| f.city_name != city_name);
        before != entry.len()
    }
}
