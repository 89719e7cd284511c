//! Stateful view parameters
//!
//! [`ViewState`] owns the current [`ViewParameters`] and is the only place they
//! change. Every change goes through [`ViewState::apply`], which resets the
//! page when the result set can change size and re-clamps the page against a
//! fresh derivation.

use super::params::{SortKey, ViewParameters};
use super::pipeline::{DerivedView, derive};
use crate::catalog::CatalogRecord;

/// A single user-driven change to the view parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    /// Replace the search text
    Search(String),
    /// Replace the category filter; `Some("")` clears it like `None`
    Category(Option<String>),
    /// Change sort order; keeps the current page
    Sort(SortKey),
    /// Jump to a page
    Page(usize),
    NextPage,
    PreviousPage,
}

/// Owner of the current view parameters
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    params: ViewParameters,
}

impl ViewState {
    #[must_use]
    pub const fn new(params: ViewParameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub const fn params(&self) -> &ViewParameters {
        &self.params
    }

    /// Apply a change and return the view it produces
    ///
    /// Search and category changes reset the page to 1 when the value actually
    /// changes. Every change, sort and paging included, is followed by a clamp
    /// of the page into `[1, total_pages]`.
    pub fn apply(&mut self, change: ViewChange, records: &[CatalogRecord]) -> DerivedView {
        match change {
            ViewChange::Search(text) => {
                if text != self.params.search_text {
                    self.params.search_text = text;
                    self.params.page_number = 1;
                }
            }
            ViewChange::Category(category) => {
                let category = category.filter(|c| !c.is_empty());
                if category != self.params.category_filter {
                    self.params.category_filter = category;
                    self.params.page_number = 1;
                }
            }
            ViewChange::Sort(key) => self.params.sort_key = key,
            ViewChange::Page(page) => self.params.page_number = page.max(1),
            ViewChange::NextPage => {
                self.params.page_number = self.params.page_number.saturating_add(1);
            }
            ViewChange::PreviousPage => {
                self.params.page_number = self.params.page_number.saturating_sub(1).max(1);
            }
        }

        self.refresh(records)
    }

    /// Re-derive the view and clamp the page against the result
    ///
    /// Call this whenever the record list itself changes.
    pub fn refresh(&mut self, records: &[CatalogRecord]) -> DerivedView {
        let view = derive(records, &self.params);
        if self.params.page_number > view.total_pages {
            tracing::debug!(
                from = self.params.page_number,
                to = view.total_pages,
                "clamping page number"
            );
            self.params.page_number = view.total_pages;
            return derive(records, &self.params);
        }
        view
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.params.page_number > 1
    }

    /// Whether a next page exists for a view with `total_pages` pages
    #[must_use]
    pub const fn has_next(&self, total_pages: usize) -> bool {
        self.params.page_number < total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{numbered_records, record};

    fn state_at_page(page: usize, records: &[CatalogRecord]) -> ViewState {
        let mut state = ViewState::new(ViewParameters::with_page_size(20));
        state.apply(ViewChange::Page(page), records);
        state
    }

    #[test]
    fn test_search_change_resets_page() {
        let records = numbered_records(100);
        let mut state = state_at_page(4, &records);
        assert_eq!(state.params().page_number, 4);

        state.apply(ViewChange::Search("creature".into()), &records);
        assert_eq!(state.params().page_number, 1);
    }

    #[test]
    fn test_same_search_keeps_page() {
        let records = numbered_records(100);
        let mut state = state_at_page(3, &records);

        state.apply(ViewChange::Search(String::new()), &records);
        assert_eq!(state.params().page_number, 3);
    }

    #[test]
    fn test_category_change_resets_page() {
        let records = numbered_records(100);
        let mut state = state_at_page(2, &records);

        let view = state.apply(ViewChange::Category(Some("even".into())), &records);
        assert_eq!(state.params().page_number, 1);
        assert_eq!(state.params().category_filter.as_deref(), Some("even"));
        assert_eq!(view.total_matches, 50);
    }

    #[test]
    fn test_empty_category_clears_filter() {
        let records = numbered_records(10);
        let mut state = ViewState::default();
        state.apply(ViewChange::Category(Some("odd".into())), &records);
        state.apply(ViewChange::Category(Some(String::new())), &records);
        assert_eq!(state.params().category_filter, None);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let records = numbered_records(100);
        let mut state = state_at_page(3, &records);

        let view = state.apply(ViewChange::Sort(SortKey::IdDesc), &records);
        assert_eq!(state.params().page_number, 3);
        assert_eq!(view.visible[0].id, 60);
    }

    #[test]
    fn test_page_is_clamped_to_last_page() {
        let records = numbered_records(45);
        let mut state = ViewState::new(ViewParameters::with_page_size(20));

        let view = state.apply(ViewChange::Page(9), &records);
        assert_eq!(state.params().page_number, 3);
        assert_eq!(view.visible.len(), 5);
    }

    #[test]
    fn test_refresh_clamps_after_record_list_shrinks() {
        let mut state = state_at_page(5, &numbered_records(100));
        assert_eq!(state.params().page_number, 5);

        let view = state.refresh(&numbered_records(30));
        assert_eq!(state.params().page_number, 2);
        assert_eq!(view.visible.len(), 10);
    }

    #[test]
    fn test_paging_stays_in_bounds() {
        let records = numbered_records(45);
        let mut state = ViewState::new(ViewParameters::with_page_size(20));

        state.apply(ViewChange::PreviousPage, &records);
        assert_eq!(state.params().page_number, 1);
        assert!(!state.has_previous());

        state.apply(ViewChange::NextPage, &records);
        state.apply(ViewChange::NextPage, &records);
        let view = state.apply(ViewChange::NextPage, &records);
        assert_eq!(state.params().page_number, 3);
        assert!(!state.has_next(view.total_pages));
        assert!(state.has_previous());
    }

    #[test]
    fn test_page_zero_becomes_one() {
        let records = vec![record(1, "mew", &["psychic"])];
        let mut state = ViewState::default();
        let view = state.apply(ViewChange::Page(0), &records);
        assert_eq!(state.params().page_number, 1);
        assert_eq!(view.visible.len(), 1);
    }
}
