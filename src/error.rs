//! Error types for the PocketBase node.
//!
//! All errors are represented by the `PocketBaseError` enum,
//! which provides specific variants for different error categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all node operations.
///
/// Each variant represents a specific category of error that can occur
/// during credential handling, authentication, parameter reading, or a
/// remote record operation.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum PocketBaseError {
    /// Credential retrieval or validation errors.
    #[error("{0}")]
    Credential(String),

    /// Superuser authentication errors.
    #[error("{0}")]
    Auth(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON decode, response reshape).
    #[error("{0}")]
    Convert(String),

    /// Node parameter reading or validation errors.
    #[error("{0}")]
    Params(String),

    /// Transport-level request errors (connect, timeout, invalid URL).
    #[error("{0}")]
    Request(String),

    /// Non-2xx response from the remote backend, with its JSON payload.
    #[error("remote error (status {status}): {payload}")]
    Remote {
        status: u16,
        payload: serde_json::Value,
    },

    /// A per-item failure that aborted the whole run.
    #[error("something went wrong at item {item_index}: {payload}")]
    Item {
        item_index: usize,
        payload: serde_json::Value,
    },
}

impl From<PocketBaseError> for String {
    fn from(val: PocketBaseError) -> Self {
        val.to_string()
    }
}

impl From<serde_json::Error> for PocketBaseError {
    fn from(error: serde_json::Error) -> Self {
        PocketBaseError::Convert(error.to_string())
    }
}

impl From<reqwest::Error> for PocketBaseError {
    fn from(error: reqwest::Error) -> Self {
        PocketBaseError::Request(error.to_string())
    }
}

impl From<jsonschema::ValidationError<'_>> for PocketBaseError {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        PocketBaseError::Params(error.to_string())
    }
}

impl From<toml::de::Error> for PocketBaseError {
    fn from(error: toml::de::Error) -> Self {
        PocketBaseError::Config(error.to_string())
    }
}
