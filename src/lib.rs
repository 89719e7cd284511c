//! dexr - a creature catalog browser
//!
//! This library loads a creature catalog from a PokeAPI-compatible service,
//! derives searchable, filterable, sorted and paginated views of it, and keeps
//! a locally persisted set of favorites in an embedded database.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod gateway;
pub mod loader;
pub mod output;
pub mod route;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DexError {
    /// Remote catalog error
    #[error("Catalog service error: {0}")]
    GatewayError(#[from] gateway::GatewayError),
    /// The catalog could not be loaded; no partial catalog is shown
    #[error("Failed to load the catalog: {0}")]
    CatalogUnavailable(#[source] gateway::GatewayError),
    /// Detail requested for an id the catalog does not have
    #[error("No record with id {0}")]
    RecordNotFound(catalog::RecordId),
    /// Favorites storage error
    #[error("Favorites storage error: {0}")]
    StorageError(#[from] favorites::StorageError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// CSV output error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
