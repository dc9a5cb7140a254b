//! Scheduled pipeline execution
//!
//! [`PipelineTask`] is the trigger the pipeline itself deliberately does not
//! contain: it runs one pipeline execution immediately, then again on a fixed
//! interval until cancelled. Each scheduled execution optionally refreshes the
//! launch document first (see [`SourceConfig::enabled`](crate::config::SourceConfig)).
//! A failed run is logged and does not stop the schedule. A run that has
//! started always processes its full URL list; cancellation takes effect
//! between runs.

use crate::error::Result;
use crate::pipeline::ImagePipeline;
use crate::report::RunSummary;
use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runs the pipeline on a fixed interval until cancelled
pub struct PipelineTask {
    /// Pipeline executed on each tick
    pipeline: Arc<ImagePipeline>,

    /// Token that ends the schedule between runs
    cancel: CancellationToken,
}

impl PipelineTask {
    /// Create a task for the given pipeline
    ///
    /// The interval comes from the pipeline's
    /// [`run_interval`](crate::config::Config::run_interval).
    pub fn new(pipeline: Arc<ImagePipeline>, cancel: CancellationToken) -> Self {
        Self { pipeline, cancel }
    }

    /// Run until cancelled
    ///
    /// Executes one run immediately, then sleeps for the configured interval
    /// between runs. Run failures are logged and the schedule continues.
    pub async fn run(self) {
        let interval = self.pipeline.config().run_interval;
        info!(interval_secs = interval.as_secs(), "pipeline task started");

        loop {
            match self.run_once().await {
                Ok(summary) => info!(%summary, "scheduled run completed"),
                Err(e) => warn!(error = %e, "scheduled run failed"),
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("pipeline task shutting down");
                    break;
                }
                _ = sleep(interval) => {}
            }
        }
    }

    /// One scheduled execution: optional document refresh, then a pipeline run
    async fn run_once(&self) -> Result<RunSummary> {
        if self.pipeline.config().source.enabled {
            self.pipeline.refresh_launch_document().await?;
        }
        self.pipeline.run().await
    }
}
