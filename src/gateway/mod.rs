//! Remote catalog gateway
//!
//! The remote provider is consumed through [`CatalogGateway`]. The list call
//! only returns stub entries (a name and a detail URL), so building the
//! catalog takes one index request plus one request per entry; that
//! orchestration lives in [`crate::loader`], not here.
//!
//! [`HttpGateway`] talks to a PokeAPI-compatible REST service.

pub mod error;
pub mod http;
pub(crate) mod payload;

pub use error::GatewayError;
pub use http::HttpGateway;

use crate::catalog::{Ability, AbilityRef, CatalogRecord, RecordId, RecordSummary, Stat};
use async_trait::async_trait;

/// Detail payload before its abilities are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPayload {
    pub record: CatalogRecord,
    pub stats: Vec<Stat>,
    pub abilities: Vec<AbilityRef>,
}

/// Read access to the remote catalog
///
/// All calls go to the network. Implementations map remote JSON into catalog
/// types, ignore fields they do not need and report a missing record as
/// [`GatewayError::NotFound`].
#[async_trait(?Send)]
pub trait CatalogGateway {
    /// First `limit` entries of the catalog index
    async fn list_summaries(&self, limit: usize) -> Result<Vec<RecordSummary>, GatewayError>;

    /// Full record from a detail URL or a numeric id
    async fn fetch_record(&self, url_or_id: &str) -> Result<CatalogRecord, GatewayError>;

    /// Record, stats and ability references for one id
    async fn fetch_detail(&self, id: RecordId) -> Result<DetailPayload, GatewayError>;

    /// Ability name and English description
    async fn fetch_ability(&self, url: &str) -> Result<Ability, GatewayError>;
}

#[async_trait(?Send)]
impl<'a, T: CatalogGateway + ?Sized> CatalogGateway for &'a T {
    async fn list_summaries(&self, limit: usize) -> Result<Vec<RecordSummary>, GatewayError> {
        (**self).list_summaries(limit).await
    }

    async fn fetch_record(&self, url_or_id: &str) -> Result<CatalogRecord, GatewayError> {
        (**self).fetch_record(url_or_id).await
    }

    async fn fetch_detail(&self, id: RecordId) -> Result<DetailPayload, GatewayError> {
        (**self).fetch_detail(id).await
    }

    async fn fetch_ability(&self, url: &str) -> Result<Ability, GatewayError> {
        (**self).fetch_ability(url).await
    }
}
