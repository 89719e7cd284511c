//! Favorites management
//!
//! Favorites are a small, locally persisted set of record ids. The set is
//! owned by a [`FavoritesStore`], hydrated once from a [`KeyValueStore`] at
//! startup and written back after every change.
//!
//! # Storage
//!
//! The set is stored as a JSON array of ids under the `favorites` key. The
//! CLI uses a [`SledStore`] at `~/.local/share/dexr/favorites` by default; the
//! location can be changed with `favorites_path` in the configuration.
//!
//! Storage problems never fail a command. Malformed values hydrate as an
//! empty set. A failed read also starts empty but leaves the stored value
//! alone. Read and write failures are logged and kept in
//! [`FavoritesStore::last_error`].

pub mod error;
pub mod storage;
pub mod store;

pub use error::StorageError;
pub use storage::{KeyValueStore, MemoryStore, SledStore};
pub use store::{
    FAVORITES_KEY, FavoriteSet, FavoritesAction, FavoritesStore, parse_favorites, reduce,
    serialize_favorites,
};

use std::path::PathBuf;

/// Get the default favorites storage path
///
/// Returns `~/.local/share/dexr/favorites` (platform-specific)
///
/// # Errors
///
/// Returns `StorageError` if the data directory cannot be determined
pub fn default_favorites_path() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_local_dir().ok_or_else(|| {
        StorageError::Unavailable("Could not determine data directory".to_string())
    })?;

    Ok(data_dir.join("dexr").join("favorites"))
}
