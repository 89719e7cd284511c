//! Testing utilities for dexr
//!
//! Record builders and a scripted in-memory [`CatalogGateway`] so loader and
//! command code can be exercised without a network.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{
    Ability, AbilityRef, CatalogRecord, NO_DESCRIPTION, RecordId, RecordSummary, Stat,
    default_sprite_url,
};
use crate::gateway::{CatalogGateway, DetailPayload, GatewayError};
use async_trait::async_trait;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

const RECORD_PREFIX: &str = "fake://pokemon/";
const ABILITY_PREFIX: &str = "fake://ability/";

/// Build a record with the default sprite URL
#[must_use]
pub fn record(id: RecordId, name: &str, categories: &[&str]) -> CatalogRecord {
    CatalogRecord::new(
        id,
        name,
        default_sprite_url(id),
        categories.iter().map(ToString::to_string).collect(),
    )
}

/// Records `1..=count` named `creature-NNN`, tagged `even` or `odd`
#[must_use]
pub fn numbered_records(count: usize) -> Vec<CatalogRecord> {
    (1..=count as RecordId)
        .map(|id| {
            let parity = if id % 2 == 0 { "even" } else { "odd" };
            record(id, &format!("creature-{id:03}"), &[parity])
        })
        .collect()
}

/// Scripted gateway serving a fixed record list
///
/// Failures can be injected per record or for the index. Request counters
/// let tests assert how much network traffic an operation caused.
pub struct FakeGateway {
    records: Vec<CatalogRecord>,
    abilities: HashMap<RecordId, Vec<(String, Option<String>)>>,
    failing_records: HashSet<RecordId>,
    index_fails: Cell<bool>,
    record_requests: Cell<usize>,
}

impl FakeGateway {
    #[must_use]
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            abilities: HashMap::new(),
            failing_records: HashSet::new(),
            index_fails: Cell::new(false),
            record_requests: Cell::new(0),
        }
    }

    /// Make every request for record `id` fail with a server error
    #[must_use]
    pub fn failing_record(mut self, id: RecordId) -> Self {
        self.failing_records.insert(id);
        self
    }

    /// Make the index request fail with a server error
    #[must_use]
    pub fn failing_index(self) -> Self {
        self.index_fails.set(true);
        self
    }

    /// Give record `id` an ability; `None` means no English description
    #[must_use]
    pub fn with_ability(mut self, id: RecordId, name: &str, description: Option<&str>) -> Self {
        self.abilities
            .entry(id)
            .or_default()
            .push((name.to_string(), description.map(ToString::to_string)));
        self
    }

    /// Clear injected failures
    pub fn recover(&self) {
        self.index_fails.set(false);
    }

    /// Number of record requests served or refused so far
    #[must_use]
    pub fn record_requests(&self) -> usize {
        self.record_requests.get()
    }

    fn lookup(&self, id: RecordId) -> Result<&CatalogRecord, GatewayError> {
        self.record_requests.set(self.record_requests.get() + 1);
        if self.failing_records.contains(&id) {
            return Err(GatewayError::Status {
                url: format!("{RECORD_PREFIX}{id}"),
                status: 500,
            });
        }
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("{RECORD_PREFIX}{id}")))
    }
}

#[async_trait(?Send)]
impl CatalogGateway for FakeGateway {
    async fn list_summaries(&self, limit: usize) -> Result<Vec<RecordSummary>, GatewayError> {
        if self.index_fails.get() {
            return Err(GatewayError::Status {
                url: "fake://pokemon".to_string(),
                status: 503,
            });
        }
        Ok(self
            .records
            .iter()
            .take(limit)
            .map(|r| RecordSummary {
                name: r.name.clone(),
                detail_url: format!("{RECORD_PREFIX}{}", r.id),
            })
            .collect())
    }

    async fn fetch_record(&self, url_or_id: &str) -> Result<CatalogRecord, GatewayError> {
        let id = url_or_id
            .strip_prefix(RECORD_PREFIX)
            .unwrap_or(url_or_id)
            .parse::<RecordId>()
            .map_err(|_| GatewayError::InvalidUrl(url_or_id.to_string()))?;
        self.lookup(id).cloned()
    }

    async fn fetch_detail(&self, id: RecordId) -> Result<DetailPayload, GatewayError> {
        let record = self.lookup(id)?.clone();
        let abilities = self
            .abilities
            .get(&id)
            .map(|list| {
                list.iter()
                    .map(|(name, _)| AbilityRef {
                        name: name.clone(),
                        url: format!("{ABILITY_PREFIX}{id}/{name}"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(DetailPayload {
            record,
            stats: vec![
                Stat { stat_name: "hp".into(), value: 45 },
                Stat { stat_name: "attack".into(), value: 49 },
            ],
            abilities,
        })
    }

    async fn fetch_ability(&self, url: &str) -> Result<Ability, GatewayError> {
        let (id, name) = url
            .strip_prefix(ABILITY_PREFIX)
            .and_then(|rest| rest.split_once('/'))
            .ok_or_else(|| GatewayError::InvalidUrl(url.to_string()))?;
        let id: RecordId = id.parse().map_err(|_| GatewayError::InvalidUrl(url.to_string()))?;

        let (name, description) = self
            .abilities
            .get(&id)
            .and_then(|list| list.iter().find(|(n, _)| n == name))
            .ok_or_else(|| GatewayError::NotFound(url.to_string()))?;

        Ok(Ability {
            name: name.clone(),
            description: description.clone().unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        })
    }
}
