//! # launchfetch
//!
//! Backend library for fetching and archiving rocket launch imagery.
//!
//! Given a launch-metadata document (`{"results": [{"image": "<url>"}, ...]}`,
//! as produced by the launch-data service), launchfetch retrieves every
//! referenced image, persists the successful ones to a local directory, and
//! writes an audit log classifying each URL's outcome. Partial failure is the
//! steady state: a completed run always yields a full audit log regardless of
//! how many individual URLs failed.
//!
//! ## Design Philosophy
//!
//! - **Classify, don't propagate** - per-URL failures become recorded
//!   outcomes, never errors; only structural problems abort a run
//! - **Sensible defaults** - works out of the box against a `data/` directory
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Explicit sequencing** - the run order (refresh document, fetch images,
//!   summarize) is plain control flow, nothing is wired up at import time
//!
//! ## Quick Start
//!
//! ```no_run
//! use launchfetch::{Config, ImagePipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = ImagePipeline::new(Config::default())?;
//!
//!     // Refresh data/launches.json from the launch-data service, then
//!     // fetch every referenced image and write the audit log.
//!     pipeline.refresh_launch_document().await?;
//!     let summary = pipeline.run().await?;
//!
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```
//!
//! To run on a schedule instead, hand the pipeline to a
//! [`PipelineTask`](task::PipelineTask).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Audit log writing
pub mod audit;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Launch document parsing and URL extraction
pub mod extract;
/// Per-URL retrieval and outcome classification
pub mod fetch;
/// The fetch-classify-persist pipeline
pub mod pipeline;
/// Run summaries and image-directory accounting
pub mod report;
/// Launch document download from the launch-data service
pub mod source;
/// Scheduled pipeline execution
pub mod task;
/// Core types: fetch outcomes and audit records
pub mod types;

// Re-export commonly used types
pub use audit::AuditLog;
pub use config::{Config, FetchConfig, SourceConfig};
pub use error::{Error, Result};
pub use extract::{LaunchDocument, LaunchRecord, extract_image_urls, parse_launch_document};
pub use fetch::{ImageFetcher, filename_from_url, is_fetchable};
pub use pipeline::ImagePipeline;
pub use report::RunSummary;
pub use task::PipelineTask;
pub use types::{AuditRecord, FetchOutcome};
