//! Configuration types for launchfetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Fetch behavior configuration (timeouts, concurrency, client identity)
///
/// Groups settings related to how image URLs are retrieved.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout (default: 30 seconds)
    ///
    /// Bounds the worst-case latency of a single image fetch. A request that
    /// exceeds the timeout is classified as a connection failure for that URL,
    /// not a run-level error.
    #[serde(default = "default_fetch_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Maximum concurrent image fetches (default: 4)
    ///
    /// Set to 1 for strictly sequential processing. Regardless of this value,
    /// audit rows are written in input-document order.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_fetches: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_fetch_timeout(),
            max_concurrent_fetches: default_max_concurrent(),
            user_agent: default_user_agent(),
        }
    }
}

/// Launch-data service configuration (upstream document download)
///
/// Controls the optional step that refreshes the launch document from the
/// launch-data service before a run. Used as a nested sub-config within
/// [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Whether the interval runner refreshes the launch document before each
    /// run (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Launch-data service endpoint
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Number of trailing days of launches to request (default: 30)
    ///
    /// The service query is bounded to `[today - window_days, today]`.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_url: default_service_url(),
            window_days: default_window_days(),
        }
    }
}

/// Main configuration for the image pipeline
///
/// All fields have sensible defaults, so `Config::default()` works out of the
/// box with a `data/` directory next to the process. Sub-config fields are
/// flattened for serialization, so the JSON/TOML format stays un-nested.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path the launch document is read from (default: "data/launches.json")
    #[serde(default = "default_launches_path")]
    pub launches_path: PathBuf,

    /// Directory successfully fetched images are written to
    /// (default: "data/images")
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Path of the audit log, truncated and rewritten each run
    /// (default: "data/error_urls.csv")
    #[serde(default = "default_audit_path")]
    pub audit_path: PathBuf,

    /// Interval between runs for [`PipelineTask`](crate::task::PipelineTask)
    /// (default: 24 hours)
    #[serde(default = "default_run_interval", with = "duration_serde")]
    pub run_interval: Duration,

    /// Fetch behavior (timeouts, concurrency, client identity)
    #[serde(flatten)]
    pub fetch: FetchConfig,

    /// Launch-data service settings
    #[serde(flatten)]
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launches_path: default_launches_path(),
            images_dir: default_images_dir(),
            audit_path: default_audit_path(),
            run_interval: default_run_interval(),
            fetch: FetchConfig::default(),
            source: SourceConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a setting has a value the pipeline
    /// cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_concurrent_fetches == 0 {
            return Err(Error::config(
                "max_concurrent_fetches",
                "must be at least 1",
            ));
        }
        if self.fetch.timeout.is_zero() {
            return Err(Error::config("timeout", "must be non-zero"));
        }
        if self.source.window_days == 0 {
            return Err(Error::config("window_days", "must be at least 1"));
        }
        if self.source.service_url.is_empty() {
            return Err(Error::config("service_url", "must not be empty"));
        }
        Ok(())
    }
}

fn default_launches_path() -> PathBuf {
    PathBuf::from("data/launches.json")
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("data/images")
}

fn default_audit_path() -> PathBuf {
    PathBuf::from("data/error_urls.csv")
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_concurrent() -> usize {
    4
}

fn default_user_agent() -> String {
    concat!("launchfetch/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_run_interval() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_service_url() -> String {
    "https://ll.thespacedevs.com/2.0.0/launch/".to_string()
}

fn default_window_days() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (seconds as integer)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
