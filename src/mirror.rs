// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local mirror of a user's favorites.
//!
//! A best-effort on-disk copy so the favorites list and the last viewed
//! city survive a restart without a server round trip. The mirror is
//! subordinate to the Favorites Store: after every successful sync its
//! list is replaced wholesale, never merged.

use crate::models::FavoriteSummary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Mirror file errors.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("Mirror I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mirror serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted mirror contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorState {
    #[serde(default)]
    pub favorites: Vec<FavoriteSummary>,
    #[serde(default)]
    pub last_viewed: Option<String>,
}

/// Accepted on-disk layouts. A bare array is the favorites-only format.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredMirror {
    Full(MirrorState),
    FavoritesOnly(Vec<FavoriteSummary>),
}

impl From<StoredMirror> for MirrorState {
    fn from(stored: StoredMirror) -> Self {
        match stored {
            StoredMirror::Full(state) => state,
            StoredMirror::FavoritesOnly(favorites) => Self {
                favorites,
                last_viewed: None,
            },
        }
    }
}

/// File-backed favorites mirror.
#[derive(Debug, Clone)]
pub struct LocalMirror {
    path: PathBuf,
    state: MirrorState,
}

impl LocalMirror {
    /// Load the mirror at `path`.
    ///
    /// Missing or unreadable files give an empty mirror.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<StoredMirror>(&bytes) {
                Ok(stored) => stored.into(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt favorites mirror");
                    MirrorState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MirrorState::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read favorites mirror");
                MirrorState::default()
            }
        };

        Self { path, state }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &MirrorState {
        &self.state
    }

    pub fn favorites(&self) -> &[FavoriteSummary] {
        &self.state.favorites
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, city_name: &str) -> bool {
        self.state
            .favorites
            .iter()
            .any(|f| f.city_name == city_name)
    }

    pub fn last_viewed(&self) -> Option<&str> {
        self.state.last_viewed.as_deref()
    }

    /// City to show on start: the last viewed one, else the first favorite.
    pub fn startup_city(&self) -> Option<&str> {
        self.last_viewed()
            .or_else(|| self.state.favorites.first().map(|f| f.city_name.as_str()))
    }

    /// Overwrite the favorites list with the server's copy.
    pub fn replace_favorites(&mut self, favorites: Vec<FavoriteSummary>) {
        self.state.favorites = favorites;
    }

    pub fn set_last_viewed(&mut self, city_name: impl Into<String>) {
        self.state.last_viewed = Some(city_name.into());
    }

    /// Write the mirror to disk via a temporary file and rename.
    pub async fn save(&self) -> Result<(), MirrorError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(&self.state)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
