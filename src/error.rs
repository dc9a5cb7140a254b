//! Error types for launchfetch
//!
//! Only failures that abort a whole pipeline run live here: a malformed launch
//! document, an output directory or audit file that cannot be created, or a
//! failed launch-service download. Per-URL fetch failures are never `Error`s;
//! they are classified into [`crate::types::FetchOutcome`] and recorded in the
//! audit log while the run continues.

use thiserror::Error;

/// Result type alias for launchfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for launchfetch
#[derive(Debug, Error)]
pub enum Error {
    /// The launch document does not match the expected shape
    /// (`{"results": [{"image": "<url>", ...}, ...]}`)
    #[error("invalid launch document: {0}")]
    InvalidDocument(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "max_concurrent_fetches")
        key: Option<String>,
    },

    /// The launch-data service answered with a non-success status
    #[error("launch service returned HTTP {status} for {url}")]
    Service {
        /// Status code the service answered with
        status: u16,
        /// The request URL
        url: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}
