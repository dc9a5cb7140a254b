//! Launch document download from the launch-data service
//!
//! Upstream collaborator of the pipeline: fetches the launch-metadata JSON for
//! a trailing window of days and writes it to the path the extractor reads.
//! Unlike per-URL image fetches, a failure here is an ordinary [`Error`]: a
//! run that asked for a fresh document cannot proceed without one.

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use chrono::{Days, NaiveDate, Utc};
use std::path::Path;
use tracing::info;

/// Fetch the launch document and persist it at `dest`
///
/// The service query is bounded to `[today - window_days, today]` via the
/// `net__gte`/`net__lte` parameters. Parent directories of `dest` are created
/// as needed.
///
/// # Errors
///
/// Returns [`Error::Network`] on transport failure, [`Error::Service`] when
/// the service answers non-2xx, and [`Error::Io`] when the document cannot be
/// written.
pub async fn download_launch_document(
    client: &reqwest::Client,
    config: &SourceConfig,
    dest: &Path,
) -> Result<()> {
    let (net_gte, net_lte) = window_bounds(Utc::now().date_naive(), config.window_days);

    let response = client
        .get(&config.service_url)
        .query(&[
            ("net__gte", net_gte.to_string()),
            ("net__lte", net_lte.to_string()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Service {
            status: status.as_u16(),
            url: config.service_url.clone(),
        });
    }

    let bytes = response.bytes().await?;

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &bytes).await?;

    info!(
        dest = %dest.display(),
        window = %format!("{net_gte}..{net_lte}"),
        size = bytes.len(),
        "launch document refreshed"
    );
    Ok(())
}

/// Inclusive date bounds for a trailing window ending today
fn window_bounds(today: NaiveDate, window_days: u32) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(today);
    (start, today)
}
