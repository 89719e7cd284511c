//! View parameters and sort keys

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of records shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort order applied by the view pipeline
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Ascending numeric id
    #[default]
    IdAsc,
    /// Descending numeric id
    IdDesc,
    /// Name A to Z
    NameAsc,
    /// Name Z to A
    NameDesc,
}

impl SortKey {
    /// All sort keys in menu order
    pub const ALL: [Self; 4] = [Self::IdAsc, Self::IdDesc, Self::NameAsc, Self::NameDesc];

    /// Wire name of the sort key (`id-asc`, `name-desc`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdAsc => "id-asc",
            Self::IdDesc => "id-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    /// Menu label shown next to the sort selector
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IdAsc => "ID ascending",
            Self::IdDesc => "ID descending",
            Self::NameAsc => "Name A-Z",
            Self::NameDesc => "Name Z-A",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown sort key '{s}' (expected id-asc, id-desc, name-asc or name-desc)")
            })
    }
}

/// Combined search/filter/sort/page state driving the visible slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParameters {
    /// Case-insensitive name substring; empty matches everything
    pub search_text: String,
    /// Exact category tag; `None` matches everything
    pub category_filter: Option<String>,
    pub sort_key: SortKey,
    /// 1-based page number
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category_filter: None,
            sort_key: SortKey::default(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewParameters {
    /// Parameters for page 1 with the given page size
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category_filter = category;
        self
    }

    #[must_use]
    pub const fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    #[must_use]
    pub const fn page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("id-asc".parse::<SortKey>(), Ok(SortKey::IdAsc));
        assert_eq!("NAME-DESC".parse::<SortKey>(), Ok(SortKey::NameDesc));
        assert_eq!(" name-asc ".parse::<SortKey>(), Ok(SortKey::NameAsc));
        assert!("name".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SortKey::IdDesc).unwrap();
        assert_eq!(json, "\"id-desc\"");
        let key: SortKey = serde_json::from_str("\"name-asc\"").unwrap();
        assert_eq!(key, SortKey::NameAsc);
    }

    #[test]
    fn test_display_matches_as_str() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string(), key.as_str());
        }
    }

    #[test]
    fn test_default_parameters() {
        let params = ViewParameters::default();
        assert!(params.search_text.is_empty());
        assert!(params.category_filter.is_none());
        assert_eq!(params.sort_key, SortKey::IdAsc);
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
    }
}
