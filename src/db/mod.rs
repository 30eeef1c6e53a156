//! Database layer (Favorites Store).
//!
//! `FavoritesStore` dispatches to Firestore in production or to an
//! in-process map for local development and tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::FavoriteCity;
use sha2::{Digest, Sha256};

/// Collection names as constants.
pub mod collections {
    /// Favorite cities (keyed by owner + city name)
    pub const FAVORITE_CITIES: &str = "favorite_cities";
}

/// Result of a create-if-absent insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was stored.
    Created(FavoriteCity),
    /// The `(owner, city)` pair was already present; holds the stored record.
    Existing(FavoriteCity),
}

impl InsertOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn favorite(&self) -> &FavoriteCity {
        match self {
            Self::Created(f) | Self::Existing(f) => f,
        }
    }

    pub fn into_favorite(self) -> FavoriteCity {
        match self {
            Self::Created(f) | Self::Existing(f) => f,
        }
    }
}

/// Document id for a favorite: SHA-256 of `<owner>:<city>` with both parts
/// URL-encoded, so the `:` separator never appears inside either part.
///
/// The hex digest has a fixed length and never matches Firestore's reserved
/// `__.*__` pattern, whatever the owner id or city name.
pub fn favorite_doc_id(owner_id: &str, city_name: &str) -> String {
    let key = format!(
        "{}:{}",
        urlencoding::encode(owner_id),
        urlencoding::encode(city_name)
    );
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Durable table of `(owner, city)` favorite records.
#[derive(Clone)]
pub enum FavoritesStore {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl FavoritesStore {
    pub async fn list_favorites(&self, owner_id: &str) -> Result<Vec<FavoriteCity>, AppError> {
        match self {
            Self::Firestore(db) => db.list_favorites(owner_id).await,
            Self::Memory(db) => Ok(db.list_favorites(owner_id)),
        }
    }

    pub async fn insert_favorite(&self, favorite: &FavoriteCity) -> Result<InsertOutcome, AppError> {
        match self {
            Self::Firestore(db) => db.insert_favorite(favorite).await,
            Self::Memory(db) => Ok(db.insert_favorite(favorite)),
        }
    }

    /// Returns `false` if no matching record existed.
    pub async fn delete_favorite(&self, owner_id: &str, city_name: &str) -> Result<bool, AppError> {
        match self {
            Self::Firestore(db) => db.delete_favorite(owner_id, city_name).await,
            Self::Memory(db) => Ok(db.delete_favorite(owner_id, city_name)),
        }
    }
}
