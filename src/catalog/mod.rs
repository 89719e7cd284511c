//! Catalog data model
//!
//! Pure data structures describing catalog entries as the rest of the crate
//! sees them. Remote payloads are mapped into these types by the gateway; the
//! view pipeline and presentation only ever work on these.

use serde::{Deserialize, Serialize};

/// Stable external identifier of a catalog record
pub type RecordId = u32;

/// Placeholder used when an ability has no English description
pub const NO_DESCRIPTION: &str = "No description available";

/// Canonical sprite location for a record id
///
/// Used when the remote record carries no sprite of its own.
#[must_use]
pub fn default_sprite_url(id: RecordId) -> String {
    format!("https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png")
}

/// One catalog entry (a creature)
///
/// Immutable once fetched. The full list is fetched once per session and
/// handed read-only to the view pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: RecordId,
    pub name: String,
    pub sprite_url: String,
    /// Category tags in the order the provider lists them (e.g. elemental type)
    pub categories: Vec<String>,
}

impl CatalogRecord {
    /// Create a new record
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>, sprite_url: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sprite_url: sprite_url.into(),
            categories,
        }
    }

    /// Whether the record carries the given category tag (exact, case-sensitive)
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Entry in the remote index: a name and where to fetch its full record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub name: String,
    pub detail_url: String,
}

/// A single base statistic of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub stat_name: String,
    pub value: u8,
}

/// An ability with its human readable effect text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
}

/// Ability reference as it appears on a detail payload, before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityRef {
    pub name: String,
    pub url: String,
}

/// Full record as shown on the detail view
///
/// Fetched lazily per id and never cached across views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDetail {
    #[serde(flatten)]
    pub record: CatalogRecord,
    pub stats: Vec<Stat>,
    pub abilities: Vec<Ability>,
}
