//! Error types for the harvester.
//!
//! Connection failures and non-success statuses carry the failed URL so
//! callers can report exactly which request broke. Missing-field errors
//! are fatal in the primary dataset resolution chain and downgraded to
//! logged skips inside dimension resolution (see [`crate::dimensions`]).

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid dataset id format.
    #[error("Invalid dataset id: '{0}'. Expected a lowercase slug (e.g., ashe-tables-7-and-8)")]
    InvalidDatasetId(String),

    /// Connection-level failure (DNS/TCP/TLS or timeout).
    #[error("Failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("Request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Response body was not valid JSON.
    #[error("Response from {url} is not valid JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Expected key absent from a response document.
    #[error("Missing expected field '{field}' in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    /// Response items did not match the expected resource shape.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client construction or other request machinery failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error while writing staged files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
