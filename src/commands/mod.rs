//! Command implementations
//!
//! Each command is a module with an `execute` function that takes parsed CLI
//! args and a [`Context`] holding the gateway and the favorites store.

pub mod browse;
pub mod favorites;
pub mod go;
pub mod list;
pub mod show;
pub mod types;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use favorites::execute as favorites;
pub use go::execute as go;
pub use list::execute as list;
pub use show::execute as show;
pub use types::execute as types;

use crate::{
    DexError,
    catalog::CatalogRecord,
    config::DexConfig,
    favorites::{FavoritesStore, KeyValueStore, MemoryStore, SledStore, StorageError},
    gateway::CatalogGateway,
    loader::{CatalogLoader, LoadState},
};
use colored::Colorize;

type Result<T> = std::result::Result<T, DexError>;

/// Commands accepted by the interactive session and printed by `go /help`
pub const HELP_TEXT: &str = "\
Commands:
  search [TEXT]     filter by name (no text clears the search)
  type [TYPE]       filter by category (no type clears the filter)
  sort KEY          id-asc, id-desc, name-asc or name-desc
  page N            jump to page N
  next, n           next page
  prev, p           previous page
  fav ID            toggle a favorite
  show ID           detail view of a record
  help, ?           this help
  quit, q           leave the session";

/// Open the favorites database named by `config`
///
/// A database that cannot be opened (locked by another process, unwritable
/// directory) does not stop the command: favorites are kept in memory for this
/// run and the user is told they will not be saved.
pub fn favorites_storage(config: &DexConfig, quiet: bool) -> Box<dyn KeyValueStore> {
    let opened = config
        .favorites_path()
        .map_err(|e| StorageError::Unavailable(e.to_string()))
        .and_then(SledStore::open);

    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "favorites database unavailable, using memory");
            if !quiet {
                eprintln!(
                    "{}",
                    "Favorites database unavailable; favorites will not be saved this run.".yellow()
                );
            }
            Box::new(MemoryStore::new())
        }
    }
}

/// Everything a command needs for one run
pub struct Context<G, S: KeyValueStore> {
    pub config: DexConfig,
    pub gateway: G,
    pub favorites: FavoritesStore<S>,
    pub quiet: bool,
}

impl<G: CatalogGateway, S: KeyValueStore> Context<G, S> {
    /// Create a context and hydrate the favorites store
    pub fn new(config: DexConfig, gateway: G, storage: S, quiet: bool) -> Self {
        let mut favorites = FavoritesStore::new(storage);
        favorites.hydrate();
        Self {
            config,
            gateway,
            favorites,
            quiet,
        }
    }

    /// Load the full catalog
    ///
    /// # Errors
    ///
    /// Returns `DexError::CatalogUnavailable` if any request of the load fails.
    pub async fn load_catalog(&self) -> Result<Vec<CatalogRecord>> {
        let mut loader = CatalogLoader::new(&self.gateway, self.config.list_limit);
        loader.load().await;

        match loader.into_parts().0 {
            LoadState::Loaded(records) => Ok(records),
            LoadState::Failed(e) => Err(DexError::CatalogUnavailable(e)),
            LoadState::Loading => Err(DexError::InvalidInput(
                "Catalog load did not complete".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{FAVORITES_KEY, MemoryStore};
    use crate::testing::{FakeGateway, record};

    #[test]
    fn test_context_hydrates_favorites() {
        let storage = MemoryStore::with_value(FAVORITES_KEY, "[4,1]");
        let ctx = Context::new(DexConfig::default(), FakeGateway::new(Vec::new()), storage, true);
        assert!(ctx.favorites.is_ready());
        assert!(ctx.favorites.contains(4));
    }

    #[test]
    fn test_unopenable_database_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let config = DexConfig {
            favorites_path: Some(blocker.join("favorites")),
            ..DexConfig::default()
        };
        let storage = favorites_storage(&config, true);
        storage.set(FAVORITES_KEY, "[7]").unwrap();
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some("[7]"));

        let mut ctx = Context::new(config, FakeGateway::new(Vec::new()), storage, true);
        ctx.favorites.add(3);
        assert!(ctx.favorites.is_ready());
        assert!(ctx.favorites.last_error().is_none());
    }

    #[test]
    fn test_favorites_storage_opens_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = DexConfig {
            favorites_path: Some(dir.path().join("favorites")),
            ..DexConfig::default()
        };

        {
            let storage = favorites_storage(&config, true);
            storage.set(FAVORITES_KEY, "[151]").unwrap();
        }

        let storage = favorites_storage(&config, true);
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some("[151]"));
    }

    #[tokio::test]
    async fn test_load_catalog_failure_is_reported() {
        let gateway = FakeGateway::new(vec![record(1, "bulbasaur", &["grass"])]).failing_record(1);
        let ctx = Context::new(DexConfig::default(), gateway, MemoryStore::new(), true);

        let result = ctx.load_catalog().await;
        assert!(matches!(result, Err(DexError::CatalogUnavailable(_))));
    }
}
