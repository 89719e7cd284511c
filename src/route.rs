//! Route and query parameter binding
//!
//! Locations look like browser addresses (`/pokedex?type=fire`,
//! `/pokemon/25`). [`Location`] owns the `type` query parameter that carries
//! the active category, and [`Route`] says which view a location shows.
//!
//! | path                   | route                              |
//! |------------------------|------------------------------------|
//! | `/`                    | `Home`                             |
//! | `/pokedex`             | `Catalog` (category from `?type=`) |
//! | `/pokedex/<category>`  | `Catalog` for that category        |
//! | `/favorites`           | `Favorites`                        |
//! | `/help`                | `Help`                             |
//! | `/pokemon/<id>`        | `Detail` (numeric id only)         |
//! | anything else          | `NotFound`                         |

use crate::catalog::RecordId;
use std::fmt;
use url::form_urlencoded;

/// Query parameter holding the active category
pub const CATEGORY_PARAM: &str = "type";

/// A view of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog { category: Option<String> },
    Favorites,
    Help,
    Detail(RecordId),
    NotFound(String),
}

impl Route {
    /// Resolve a location string into a route
    #[must_use]
    pub fn resolve(location: &str) -> Self {
        Location::parse(location).route()
    }
}

/// Path plus query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse `path[?query]`; a missing leading slash is tolerated
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));

        let trimmed = path.trim().trim_end_matches('/');
        let path = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        let query = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self { path, query }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current category parameter; an empty value reads as absent
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == CATEGORY_PARAM)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Replace the query with the category parameter
    ///
    /// An empty value clears the query entirely instead of storing `type=`.
    pub fn set_category(&mut self, value: &str) {
        self.query.clear();
        if !value.is_empty() {
            self.query.push((CATEGORY_PARAM.to_string(), value.to_string()));
        }
    }

    /// Route shown at this location
    #[must_use]
    pub fn route(&self) -> Route {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["pokedex"] => Route::Catalog {
                category: self.category().map(ToString::to_string),
            },
            ["pokedex", category] => Route::Catalog {
                category: Some(
                    self.category()
                        .map_or_else(|| (*category).to_string(), ToString::to_string),
                ),
            },
            ["favorites"] => Route::Favorites,
            ["help"] => Route::Help,
            ["pokemon", id] => id
                .parse::<RecordId>()
                .ok()
                .filter(|id| *id > 0)
                .map_or_else(|| Route::NotFound(self.to_string()), Route::Detail),
            _ => Route::NotFound(self.to_string()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
