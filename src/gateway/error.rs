//! Gateway error types
//!
//! Errors that can occur while talking to the remote catalog.
//!
//! # Error Types
//!
//! - **`Network`**: The request could not be sent or the body not read
//! - **`Status`**: The provider answered with a non-success status
//! - **`NotFound`**: The requested record does not exist (HTTP 404)
//! - **`Parse`**: The response body is not the JSON shape we expect
//! - **`InvalidUrl`**: A configured or returned URL cannot be used

use thiserror::Error;

/// Remote catalog errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status other than 404
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed response body
    #[error("Malformed response: {0}")]
    Parse(String),

    /// URL could not be built or parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Whether this error belongs to the network failure class
    ///
    /// Transport failures and unexpected statuses both count; a missing
    /// record does not.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
