//! The fetch-classify-persist pipeline
//!
//! [`ImagePipeline::run`] drives one complete run: read the launch document,
//! extract the image URLs, fetch each one with bounded concurrency, persist
//! successes, and write one audit row per URL in input order. A failure on one
//! URL never aborts the rest; only a structural input error, or an inability
//! to create the images directory or the audit file, ends a run early.

use crate::audit::AuditLog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::ImageFetcher;
use crate::report::{self, RunSummary};
use crate::types::{AuditRecord, FetchOutcome};
use crate::{extract, source};
use futures::StreamExt;
use std::time::Instant;
use tracing::{info, warn};

/// A configured image pipeline, ready to run
///
/// The HTTP client is built once at construction and reused across runs and
/// across the launch-document refresh.
pub struct ImagePipeline {
    config: Config,
    fetcher: ImageFetcher,
}

impl ImagePipeline {
    /// Create a pipeline from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid settings and a network error if
    /// the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = ImageFetcher::new(&config.fetch, config.images_dir.clone())?;
        Ok(Self { config, fetcher })
    }

    /// The pipeline's configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Refresh the launch document from the launch-data service
    ///
    /// Downloads the configured trailing window of launches and writes the
    /// document to [`Config::launches_path`], where [`run`](Self::run) reads
    /// it.
    pub async fn refresh_launch_document(&self) -> Result<()> {
        source::download_launch_document(
            self.fetcher.client(),
            &self.config.source,
            &self.config.launches_path,
        )
        .await
    }

    /// Execute one pipeline run
    ///
    /// Guarantees on return: the audit file contains the header and exactly
    /// one row per input URL, in input order, and every successfully fetched
    /// image is on disk under [`Config::images_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error only for run-level failures: an unreadable or
    /// malformed launch document, or an images directory / audit file that
    /// cannot be created. Per-URL failures are classified and recorded, never
    /// propagated.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        info!(
            launches = %self.config.launches_path.display(),
            images_dir = %self.config.images_dir.display(),
            "pipeline run started"
        );

        let document = extract::load_launch_document(&self.config.launches_path).await?;
        let urls = extract::extract_image_urls(&document);

        // The images directory must exist before the first write
        tokio::fs::create_dir_all(&self.config.images_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "failed to create images directory '{}': {}",
                        self.config.images_dir.display(),
                        e
                    ),
                ))
            })?;

        let mut audit = AuditLog::create(&self.config.audit_path).await?;
        let mut summary = RunSummary::default();

        // Bounded concurrency; `buffered` yields outcomes in input order, so
        // audit rows can be streamed out with a single writer.
        let fetcher = &self.fetcher;
        let mut outcomes = futures::stream::iter(urls)
            .map(|url| async move {
                let outcome = fetcher.fetch_one(&url).await;
                (url, outcome)
            })
            .buffered(self.config.fetch.max_concurrent_fetches);

        while let Some((url, outcome)) = outcomes.next().await {
            let url = url.as_str();
            match &outcome {
                FetchOutcome::Success { saved_path } => {
                    info!(url, target = %saved_path.display(), "downloaded");
                }
                other => {
                    warn!(url, outcome = %other, "fetch failed");
                }
            }
            summary.record(&outcome);
            audit.append(&AuditRecord::new(url, &outcome)).await?;
        }
        drop(outcomes);

        audit.finish().await?;

        summary.images_on_disk = report::count_images(&self.config.images_dir)?;
        summary.elapsed = started.elapsed();
        info!(%summary, "pipeline run finished");
        Ok(summary)
    }
}
