//! Run summaries and image-directory accounting
//!
//! The pipeline's downstream consumer only needs two things: per-outcome
//! totals for the run that just finished, and how many images are now on disk.
//! [`RunSummary`] carries both, with a human-readable `Display` suitable for a
//! notification line.

use crate::types::FetchOutcome;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Aggregated result of one pipeline run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of URLs in the input document (== audit rows written)
    pub total_urls: usize,

    /// Images fetched and persisted
    pub succeeded: usize,

    /// URLs skipped as structurally malformed
    pub invalid_urls: usize,

    /// URLs whose host could not be reached
    pub connection_failures: usize,

    /// URLs answered with a non-2xx status
    pub http_errors: usize,

    /// Successful fetches that could not be written to disk
    pub storage_errors: usize,

    /// Files present in the images directory after the run
    pub images_on_disk: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunSummary {
    /// Tally one outcome
    pub fn record(&mut self, outcome: &FetchOutcome) {
        self.total_urls += 1;
        match outcome {
            FetchOutcome::Success { .. } => self.succeeded += 1,
            FetchOutcome::InvalidUrl => self.invalid_urls += 1,
            FetchOutcome::ConnectionFailure => self.connection_failures += 1,
            FetchOutcome::HttpError { .. } => self.http_errors += 1,
            FetchOutcome::StorageError { .. } => self.storage_errors += 1,
        }
    }

    /// Number of URLs that did not produce a persisted image
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total_urls - self.succeeded
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} URLs in {:.2}s: {} saved, {} failed \
             ({} invalid, {} unreachable, {} HTTP errors, {} storage errors). \
             There are now {} images.",
            self.total_urls,
            self.elapsed.as_secs_f64(),
            self.succeeded,
            self.failed(),
            self.invalid_urls,
            self.connection_failures,
            self.http_errors,
            self.storage_errors,
            self.images_on_disk,
        )
    }
}

/// Count the files currently present in the images directory
///
/// Subdirectories are not descended into or counted. A directory that does not
/// exist yet counts as zero images rather than an error, so a summary can be
/// produced even when no run has created the directory.
pub fn count_images(dir: &Path) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}
