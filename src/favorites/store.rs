//! Favorites state machine
//!
//! The favorite set changes only through [`FavoritesAction`]s fed to the pure
//! [`reduce`] function. [`FavoritesStore`] wraps the reducer with the
//! `Uninitialized → Ready` lifecycle and mirrors every resulting snapshot to a
//! [`KeyValueStore`].
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──hydrate()──→ Ready
//!   │  add/remove are journaled      │  add/remove are persisted
//!   └── replayed after the load ─────┘
//! ```
//!
//! Nothing is written to storage before hydration, so an early mutation can
//! never clobber the stored set before it has been read.

use super::error::StorageError;
use super::storage::KeyValueStore;
use crate::catalog::RecordId;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Storage key holding the serialized favorite set
pub const FAVORITES_KEY: &str = "favorites";

/// Ordered set of favorite record ids
///
/// Membership is what matters; order is insertion order and a re-added id
/// goes to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<RecordId>);

impl FavoriteSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RecordId] {
        &self.0
    }

    /// Build a set from raw ids, dropping zeros and repeated ids
    ///
    /// The first occurrence of an id keeps its position.
    pub fn cleaned(ids: impl IntoIterator<Item = RecordId>) -> Self {
        let mut set = Self::new();
        for id in ids.into_iter().filter(|id| *id != 0) {
            if !set.contains(id) {
                set.0.push(id);
            }
        }
        set
    }
}

impl FromIterator<RecordId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        Self::cleaned(iter)
    }
}

/// Everything that can change the favorite set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    Add(RecordId),
    Remove(RecordId),
    /// Replace the whole set with what was read from storage
    LoadSaved(FavoriteSet),
}

/// Apply an action to a set
#[must_use]
pub fn reduce(state: &FavoriteSet, action: &FavoritesAction) -> FavoriteSet {
    match action {
        FavoritesAction::Add(id) if state.contains(*id) => state.clone(),
        FavoritesAction::Add(id) => {
            let mut next = state.clone();
            next.0.push(*id);
            next
        }
        FavoritesAction::Remove(id) => FavoriteSet(state.iter().filter(|f| f != id).collect()),
        FavoritesAction::LoadSaved(saved) => saved.clone(),
    }
}

/// Parse a stored favorites value
///
/// The value is a JSON array of ids. The result is cleaned, so it may differ
/// from the stored text.
///
/// # Errors
///
/// Returns the JSON error if the value is not an array of unsigned ids.
pub fn parse_favorites(raw: &str) -> Result<FavoriteSet, serde_json::Error> {
    let ids: Vec<RecordId> = serde_json::from_str(raw)?;
    Ok(FavoriteSet::cleaned(ids))
}

/// Serialize a set for storage
///
/// # Errors
///
/// Returns `StorageError::SerializeError` if encoding fails.
pub fn serialize_favorites(set: &FavoriteSet) -> Result<String, StorageError> {
    Ok(serde_json::to_string(set)?)
}

enum Phase {
    Uninitialized { pending: Vec<FavoritesAction> },
    Ready,
}

/// Favorites store synchronized with durable storage
///
/// One store is created per process and passed explicitly to whatever needs
/// it. Views that want to react to changes call [`subscribe`](Self::subscribe).
///
/// # Examples
/// ```
/// use dexr::favorites::{FavoritesStore, MemoryStore};
///
/// let mut store = FavoritesStore::new(MemoryStore::new());
/// store.hydrate();
/// store.add(25);
/// assert!(store.contains(25));
/// store.toggle(25);
/// assert!(!store.contains(25));
/// ```
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    phase: Phase,
    set: FavoriteSet,
    last_error: Option<StorageError>,
    notifier: watch::Sender<FavoriteSet>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create an uninitialized store over `storage` using the default key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, FAVORITES_KEY)
    }

    /// Create an uninitialized store using a custom storage key
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let (notifier, _) = watch::channel(FavoriteSet::new());
        Self {
            storage,
            key: key.into(),
            phase: Phase::Uninitialized { pending: Vec::new() },
            set: FavoriteSet::new(),
            last_error: None,
            notifier,
        }
    }

    /// Whether `hydrate` has run
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready)
    }

    /// Load the stored set
    ///
    /// Missing or malformed values yield an empty set and are replaced by
    /// the cleaned set. Mutations made before hydration are replayed on top of
    /// the loaded set, and the result is written back. Only the first call
    /// reads storage; later calls return the current set.
    ///
    /// A failed read also starts from an empty set, but nothing is written
    /// back and the error stays in [`last_error`](Self::last_error). The
    /// stored value is only replaced by the next explicit mutation.
    pub fn hydrate(&mut self) -> &FavoriteSet {
        let pending = match &mut self.phase {
            Phase::Ready => {
                tracing::debug!("favorites already hydrated");
                return &self.set;
            }
            Phase::Uninitialized { pending } => std::mem::take(pending),
        };

        let (saved, readable) = match self.storage.get(&self.key) {
            Ok(Some(raw)) => {
                let saved = parse_favorites(&raw).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "stored favorites are malformed, starting empty");
                    FavoriteSet::new()
                });
                (saved, true)
            }
            Ok(None) => (FavoriteSet::new(), true),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored favorites, keeping them untouched");
                self.last_error = Some(e);
                (FavoriteSet::new(), false)
            }
        };

        let mut set = reduce(&self.set, &FavoritesAction::LoadSaved(saved));
        for action in &pending {
            set = reduce(&set, action);
        }
        tracing::debug!(count = set.len(), replayed = pending.len(), "favorites hydrated");

        self.set = set;
        self.phase = Phase::Ready;
        if readable {
            if let Err(e) = self.write() {
                self.record_failure(e);
            }
        }
        self.publish();
        &self.set
    }

    /// Add `id`; no-op if it is already a favorite
    pub fn add(&mut self, id: RecordId) -> &FavoriteSet {
        self.dispatch(FavoritesAction::Add(id))
    }

    /// Remove `id`; no-op if it is not a favorite
    pub fn remove(&mut self, id: RecordId) -> &FavoriteSet {
        self.dispatch(FavoritesAction::Remove(id))
    }

    /// Remove `id` if present, add it otherwise
    pub fn toggle(&mut self, id: RecordId) -> &FavoriteSet {
        if self.set.contains(id) {
            self.remove(id)
        } else {
            self.add(id)
        }
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.set.contains(id)
    }

    #[must_use]
    pub const fn snapshot(&self) -> &FavoriteSet {
        &self.set
    }

    /// Most recent storage failure, if any
    #[must_use]
    pub const fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }

    /// Receive every new snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.notifier.subscribe()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn dispatch(&mut self, action: FavoritesAction) -> &FavoriteSet {
        self.set = reduce(&self.set, &action);
        match &mut self.phase {
            Phase::Uninitialized { pending } => pending.push(action),
            Phase::Ready => match self.write() {
                Ok(()) => self.last_error = None,
                Err(e) => self.record_failure(e),
            },
        }
        self.publish();
        &self.set
    }

    fn write(&self) -> Result<(), StorageError> {
        let value = serialize_favorites(&self.set)?;
        self.storage.set(&self.key, &value)
    }

    fn record_failure(&mut self, error: StorageError) {
        tracing::warn!(error = %error, "failed to persist favorites");
        self.last_error = Some(error);
    }

    fn publish(&self) {
        self.notifier.send_replace(self.set.clone());
    }
}
