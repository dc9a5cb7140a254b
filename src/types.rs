//! Core types: per-URL fetch outcomes and audit records

use std::fmt;
use std::path::PathBuf;

/// Classified result of one image-URL fetch attempt
///
/// Exactly one outcome is produced per input URL, independently of every other
/// URL. Outcomes are recorded in the audit log; none of them aborts a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The image was retrieved and written to disk
    Success {
        /// Path the image bytes were written to
        saved_path: PathBuf,
    },

    /// The URL is malformed (no scheme/host, or a scheme the transport cannot
    /// fetch); no network access was attempted
    InvalidUrl,

    /// The transport could not reach the host (DNS failure, refused
    /// connection, timeout)
    ConnectionFailure,

    /// The remote server answered with a non-2xx status
    HttpError {
        /// The status code the server answered with
        status: u16,
    },

    /// The response body could not be persisted to the images directory
    StorageError {
        /// What went wrong while writing (e.g., "permission denied")
        reason: String,
    },
}

impl FetchOutcome {
    /// Whether this outcome represents a successfully persisted image
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// The audit-log message for this outcome
    ///
    /// Messages uniquely identify the outcome kind; `HttpError` includes the
    /// numeric status code and `StorageError` the write-failure reason.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            FetchOutcome::Success { .. } => "Good URL".to_string(),
            FetchOutcome::InvalidUrl => "Invalid URL".to_string(),
            FetchOutcome::ConnectionFailure => "ConnectionError".to_string(),
            FetchOutcome::HttpError { status } => format!("HTTP Error {status}"),
            FetchOutcome::StorageError { reason } => format!("Storage Error: {reason}"),
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// One audit-log entry: the URL processed and its outcome message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditRecord {
    /// The image URL exactly as it appeared in the launch document
    pub url: String,

    /// Human-readable outcome message (see [`FetchOutcome::message`])
    pub message: String,
}

impl AuditRecord {
    /// Build the audit record for a URL's outcome
    pub fn new(url: impl Into<String>, outcome: &FetchOutcome) -> Self {
        Self {
            url: url.into(),
            message: outcome.message(),
        }
    }
}
