//! Catalog view derivation and view parameters
//!
//! The pipeline in [`pipeline`] is a pure function from records and
//! parameters to a page of records. [`ViewState`] owns the parameters and
//! enforces the page reset and clamping rules when they change.
//!
//! ```
//! use dexr::catalog::CatalogRecord;
//! use dexr::view::{SortKey, ViewParameters, derive};
//!
//! let records = vec![
//!     CatalogRecord::new(1, "Alpha", "", vec!["fire".into()]),
//!     CatalogRecord::new(2, "Beta", "", vec!["water".into()]),
//! ];
//! let params = ViewParameters::default().search("alp").sort(SortKey::NameAsc);
//! let view = derive(&records, &params);
//! assert_eq!(view.visible.len(), 1);
//! assert_eq!(view.total_pages, 1);
//! ```

pub mod params;
pub mod pipeline;
pub mod state;

pub use params::{DEFAULT_PAGE_SIZE, SortKey, ViewParameters};
pub use pipeline::{DerivedView, categories, derive, locale_cmp, paginate, total_pages};
pub use state::{ViewChange, ViewState};
