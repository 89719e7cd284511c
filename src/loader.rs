//! Catalog loading
//!
//! The remote index only carries stub entries, so the catalog is built in two
//! stages: one index request, then one record request per entry issued
//! concurrently and joined with [`try_join_all`]. The join fails fast: the
//! first failing request fails the whole load and no partial catalog is kept.
//!
//! There is no timeout and no cancellation. Each load is tagged with a
//! [`LoadTicket`]; completing a superseded ticket is a no-op, so a late result
//! from an abandoned load can never overwrite a newer one.

use crate::catalog::{Ability, CatalogDetail, CatalogRecord, RecordId};
use crate::gateway::{CatalogGateway, GatewayError};
use futures::future::try_join_all;

/// Number of entries requested from the index by default
pub const DEFAULT_LIST_LIMIT: usize = 1025;

/// Loading state of the catalog
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Loaded(Vec<CatalogRecord>),
    Failed(GatewayError),
}

impl LoadState {
    /// Loaded records, if the load succeeded
    #[must_use]
    pub fn records(&self) -> Option<&[CatalogRecord]> {
        match self {
            Self::Loaded(records) => Some(records),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Identifies one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Owner of the catalog load state
pub struct CatalogLoader<G> {
    gateway: G,
    limit: usize,
    generation: u64,
    state: LoadState,
}

impl<G: CatalogGateway> CatalogLoader<G> {
    /// Create a loader in the `Loading` state
    pub const fn new(gateway: G, limit: usize) -> Self {
        Self {
            gateway,
            limit,
            generation: 0,
            state: LoadState::Loading,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Give up the loader, keeping its final state and gateway
    #[must_use]
    pub fn into_parts(self) -> (LoadState, G) {
        (self.state, self.gateway)
    }

    /// Start a new load attempt, superseding any previous one
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Record the outcome of the attempt identified by `ticket`
    ///
    /// Returns `false` and leaves the state untouched when the ticket has been
    /// superseded.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<CatalogRecord>, GatewayError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring result of superseded catalog load"
            );
            return false;
        }

        self.state = match result {
            Ok(records) => {
                tracing::info!(count = records.len(), "catalog loaded");
                LoadState::Loaded(records)
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed");
                LoadState::Failed(e)
            }
        };
        true
    }

    /// Run a full load attempt and return the resulting state
    pub async fn load(&mut self) -> &LoadState {
        let ticket = self.begin();
        tracing::debug!(limit = self.limit, "loading catalog");
        let result = fetch_catalog(&self.gateway, self.limit).await;
        self.complete(ticket, result);
        &self.state
    }
}

/// Fetch the index, then every record concurrently
///
/// # Errors
///
/// Returns the first `GatewayError` raised by the index request or by any of
/// the record requests.
pub async fn fetch_catalog<G: CatalogGateway + ?Sized>(
    gateway: &G,
    limit: usize,
) -> Result<Vec<CatalogRecord>, GatewayError> {
    let summaries = gateway.list_summaries(limit).await?;
    tracing::debug!(entries = summaries.len(), "fetched catalog index");

    try_join_all(
        summaries
            .iter()
            .map(|summary| gateway.fetch_record(&summary.detail_url)),
    )
    .await
}

/// Fetch one record's detail and resolve its abilities concurrently
///
/// # Errors
///
/// Returns `GatewayError::NotFound` if the record does not exist, or the first
/// error raised while resolving abilities.
pub async fn load_detail<G: CatalogGateway + ?Sized>(
    gateway: &G,
    id: RecordId,
) -> Result<CatalogDetail, GatewayError> {
    let payload = gateway.fetch_detail(id).await?;

    let resolved = try_join_all(
        payload
            .abilities
            .iter()
            .map(|ability| gateway.fetch_ability(&ability.url)),
    )
    .await?;

    let abilities = payload
        .abilities
        .iter()
        .zip(resolved)
        .map(|(reference, resolved)| Ability {
            name: reference.name.clone(),
            description: resolved.description,
        })
        .collect();

    Ok(CatalogDetail {
        record: payload.record,
        stats: payload.stats,
        abilities,
    })
}

/// Fetch the records behind a list of favorite ids, keeping their order
///
/// An empty list resolves immediately without touching the network.
///
/// # Errors
///
/// Returns the first `GatewayError` raised by any record request.
pub async fn load_favorites<G: CatalogGateway + ?Sized>(
    gateway: &G,
    ids: &[RecordId],
) -> Result<Vec<CatalogRecord>, GatewayError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    try_join_all(ids.iter().map(|id| {
        let key = id.to_string();
        async move { gateway.fetch_record(&key).await }
    }))
    .await
}
