//! Launch document parsing and image-URL extraction
//!
//! The launch document is the JSON produced by the launch-data service:
//! `{"results": [{"image": "<url>", ...}, ...]}`. Extraction is a pure
//! transformation: one URL per launch record, in document order, with no
//! deduplication or filtering. A document that does not match this shape
//! (missing `results`, or a record without `image`) is a fatal
//! [`Error::InvalidDocument`], not a per-URL outcome: it is an
//! upstream-contract violation, distinct from fetch failures.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The launch-metadata document
#[derive(Clone, Debug, Deserialize)]
pub struct LaunchDocument {
    /// Launch records, in service order
    pub results: Vec<LaunchRecord>,
}

/// One launch record; only the image URL is relevant to the pipeline
///
/// Unknown fields (launch name, timestamps, pad data, ...) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct LaunchRecord {
    /// URL of the launch image
    pub image: String,
}

/// Parse a launch document from raw JSON
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] when the text is not valid JSON or does
/// not match the expected document shape.
pub fn parse_launch_document(raw: &str) -> Result<LaunchDocument> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidDocument(e.to_string()))
}

/// Read and parse the launch document at `path`
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and
/// [`Error::InvalidDocument`] when its contents do not parse.
pub async fn load_launch_document(path: &Path) -> Result<LaunchDocument> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read launch document '{}': {}", path.display(), e),
        ))
    })?;
    parse_launch_document(&raw)
}

/// Extract the ordered image-URL sequence from a parsed document
///
/// The output length equals the number of launch records; duplicates are kept.
#[must_use]
pub fn extract_image_urls(document: &LaunchDocument) -> Vec<String> {
    document
        .results
        .iter()
        .map(|launch| launch.image.clone())
        .collect()
}
