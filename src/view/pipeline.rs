//! Catalog view derivation
//!
//! Turns the full record list and a set of [`ViewParameters`] into the page of
//! records to render. Stages run in a fixed order and each one only narrows or
//! reorders what the previous stage produced:
//!
//! ```text
//! records ─→ name filter ─→ category filter ─→ stable sort ─→ paginate ─→ DerivedView
//! ```
//!
//! Everything here is a pure function over borrowed data. Clamping the page
//! number is not done here; see [`super::ViewState`].

use super::params::{SortKey, ViewParameters};
use crate::catalog::CatalogRecord;
use serde::Serialize;
use std::cmp::Ordering;

/// Result of running the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    /// Records on the requested page, in display order
    pub visible: Vec<CatalogRecord>,
    /// Number of pages, never less than 1
    pub total_pages: usize,
    /// Number of records that survived both filters
    pub total_matches: usize,
}

/// Run the full pipeline
#[must_use]
pub fn derive(records: &[CatalogRecord], params: &ViewParameters) -> DerivedView {
    let named = filter_by_name(records.iter(), &params.search_text);
    let categorized = filter_by_category(named, params.category_filter.as_deref());
    let sorted = sort_records(categorized, params.sort_key);

    let total_matches = sorted.len();
    let visible = paginate(&sorted, params.page_number, params.page_size)
        .iter()
        .map(|record| (*record).clone())
        .collect();

    DerivedView {
        visible,
        total_pages: total_pages(total_matches, params.page_size),
        total_matches,
    }
}

/// Keep records whose name contains `needle`, ignoring case
///
/// An empty needle keeps every record.
pub fn filter_by_name<'a>(
    records: impl IntoIterator<Item = &'a CatalogRecord>,
    needle: &str,
) -> Vec<&'a CatalogRecord> {
    if needle.is_empty() {
        return records.into_iter().collect();
    }

    let needle = needle.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .collect()
}

/// Keep records tagged with exactly `category`
///
/// `None` keeps every record.
pub fn filter_by_category<'a>(
    records: impl IntoIterator<Item = &'a CatalogRecord>,
    category: Option<&str>,
) -> Vec<&'a CatalogRecord> {
    match category {
        Some(category) => records
            .into_iter()
            .filter(|record| record.has_category(category))
            .collect(),
        None => records.into_iter().collect(),
    }
}

/// Stable sort by `key`; records comparing equal keep their relative order
pub fn sort_records(mut records: Vec<&CatalogRecord>, key: SortKey) -> Vec<&CatalogRecord> {
    match key {
        SortKey::IdAsc => records.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::IdDesc => records.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::NameAsc => records.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::NameDesc => records.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
    }
    records
}

/// Locale-style string comparison
///
/// Names are compared on their case-folded characters first. Names that only
/// differ in case put lowercase first. Identical names compare equal.
///
/// Only case is folded. Accented letters compare by code point, so
/// `"émolga"` sorts after `"zubat"`. Catalog names are plain ASCII in practice.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .map(char::is_uppercase)
            .cmp(b.chars().map(char::is_uppercase))
    })
}

/// `ceil(count / page_size)`, with a floor of 1
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slice out page `page_number` (1-based)
///
/// A page past the end yields an empty slice. Page 0 is treated as page 1.
#[must_use]
pub fn paginate<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Distinct category tags in first-seen order
#[must_use]
pub fn categories(records: &[CatalogRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in records.iter().flat_map(|record| &record.categories) {
        if !seen.contains(category) {
            seen.push(category.clone());
        }
    }
    seen
}
