//! Storage error types
//!
//! Errors raised by [`KeyValueStore`](super::KeyValueStore) implementations.
//! The favorites store never surfaces these to the user; it logs them and keeps
//! the most recent one for inspection.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the embedded sled database
//! - **`InvalidUtf8`**: A stored value is not valid UTF-8
//! - **`SerializeError`**: The favorites snapshot could not be encoded
//! - **`Unavailable`**: The backing store refused the operation

use thiserror::Error;

/// Durable storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Represents a sled database error
    #[error("Storage error: {0}")]
    SledError(#[from] sled::Error),

    /// Stored bytes for a key are not valid UTF-8
    #[error("Stored value for '{0}' is not valid UTF-8")]
    InvalidUtf8(String),

    /// Snapshot could not be serialized
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The store rejected the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
