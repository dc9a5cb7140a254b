//! Per-URL retrieval and outcome classification
//!
//! [`ImageFetcher`] turns one image URL into exactly one [`FetchOutcome`]:
//! structural validation first (no network access for malformed URLs), then an
//! HTTP GET with the configured timeout, then persistence of the body bytes.
//! Classification is ordinary branching on the transport's explicit error kind
//! and the response status, never a propagated error. Nothing here can abort
//! a pipeline run.

use crate::config::FetchConfig;
use crate::error::Result;
use crate::types::FetchOutcome;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Fetches single image URLs and classifies their outcomes
pub struct ImageFetcher {
    /// HTTP client, built once with timeout and user agent
    client: reqwest::Client,

    /// Directory successful fetches are persisted into
    images_dir: PathBuf,
}

impl ImageFetcher {
    /// Create a fetcher for the given images directory
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &FetchConfig, images_dir: PathBuf) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, images_dir })
    }

    /// The underlying HTTP client (shared with the launch-document download)
    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Fetch one image URL, persist it on success, and classify the outcome
    ///
    /// The images directory must already exist; the pipeline creates it before
    /// the first fetch of a run.
    pub async fn fetch_one(&self, url: &str) -> FetchOutcome {
        if !is_fetchable(url) {
            debug!(url, "malformed URL, skipping network access");
            return FetchOutcome::InvalidUrl;
        }

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => {
                debug!(url, error = %e, "could not reach host");
                return FetchOutcome::ConnectionFailure;
            }
            Err(e) => {
                // Redirect loops and other mid-request transport failures land
                // here; the host was never usefully reached.
                warn!(url, error = %e, "transport failure during request");
                return FetchOutcome::ConnectionFailure;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "server answered non-2xx");
            return FetchOutcome::HttpError {
                status: status.as_u16(),
            };
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url, error = %e, "transport failed while reading body");
                return FetchOutcome::ConnectionFailure;
            }
        };

        let filename = filename_from_url(url);
        if filename.is_empty() {
            return FetchOutcome::StorageError {
                reason: "URL has no trailing path segment to name a file".to_string(),
            };
        }

        let target = self.images_dir.join(filename);
        match tokio::fs::write(&target, &bytes).await {
            Ok(()) => {
                debug!(url, target = %target.display(), size = bytes.len(), "image saved");
                FetchOutcome::Success { saved_path: target }
            }
            Err(e) => {
                warn!(url, target = %target.display(), error = %e, "failed to persist image");
                FetchOutcome::StorageError {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Whether a URL is structurally well-formed and fetchable
///
/// Requires a parseable URL with a host and an `http`/`https` scheme. Anything
/// else is classified [`FetchOutcome::InvalidUrl`] before any network access.
#[must_use]
pub fn is_fetchable(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            parsed.has_host() && matches!(parsed.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

/// Derive the local filename from a URL: the substring after the final `/`
///
/// Query strings are not stripped (`.../img.jpg?x=1` names the file
/// `img.jpg?x=1`), and two URLs sharing a trailing segment overwrite each
/// other. A URL ending in `/` yields an empty name, which the fetcher
/// classifies as a storage error.
#[must_use]
pub fn filename_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher(images_dir: PathBuf) -> ImageFetcher {
        ImageFetcher::new(&FetchConfig::default(), images_dir).unwrap()
    }

    /// A URL on localhost with a freshly released port: connections are refused.
    fn refused_url(file: &str) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/{file}")
    }

    // -------------------------------------------------------------------
    // URL structure helpers
    // -------------------------------------------------------------------

    #[test]
    fn urls_without_scheme_or_host_are_not_fetchable() {
        assert!(!is_fetchable("not-a-url"));
        assert!(!is_fetchable(""));
        assert!(!is_fetchable("img.test/a.jpg"));
        assert!(!is_fetchable("http://"));
        assert!(!is_fetchable("file:///tmp/a.jpg"));
        assert!(!is_fetchable("mailto:ops@img.test"));
    }

    #[test]
    fn non_http_schemes_are_not_fetchable() {
        assert!(!is_fetchable("ftp://img.test/a.jpg"));
    }

    #[test]
    fn http_and_https_urls_with_hosts_are_fetchable() {
        assert!(is_fetchable("http://img.test/a.jpg"));
        assert!(is_fetchable("https://img.test/nested/path/b.png"));
        assert!(is_fetchable("http://127.0.0.1:8080/c.gif"));
    }

    #[test]
    fn filename_is_the_substring_after_the_final_slash() {
        assert_eq!(filename_from_url("http://img.test/a.jpg"), "a.jpg");
        assert_eq!(filename_from_url("http://img.test/x/y/z.png"), "z.png");
        // Query strings are preserved, not stripped
        assert_eq!(
            filename_from_url("http://img.test/a.jpg?width=1024"),
            "a.jpg?width=1024"
        );
        // Trailing slash yields an empty name
        assert_eq!(filename_from_url("http://img.test/dir/"), "");
        // No slash at all: the whole string is the "segment"
        assert_eq!(filename_from_url("plain"), "plain");
    }

    // -------------------------------------------------------------------
    // Outcome classification
    // -------------------------------------------------------------------

    #[tokio::test]
    async fn malformed_url_is_invalid_without_network_access() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = test_fetcher(temp_dir.path().to_path_buf());

        let outcome = fetcher.fetch_one("not-a-url").await;

        assert_eq!(outcome, FetchOutcome::InvalidUrl);
        assert_eq!(
            std::fs::read_dir(temp_dir.path()).unwrap().count(),
            0,
            "no file may be written for an invalid URL"
        );
    }

    #[tokio::test]
    async fn refused_connection_is_a_connection_failure() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = test_fetcher(temp_dir.path().to_path_buf());

        let outcome = fetcher.fetch_one(&refused_url("b.jpg")).await;

        assert_eq!(outcome, FetchOutcome::ConnectionFailure);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn non_2xx_status_is_an_http_error_with_the_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let fetcher = test_fetcher(temp_dir.path().to_path_buf());

        let outcome = fetcher
            .fetch_one(&format!("{}/gone.jpg", server.uri()))
            .await;

        assert_eq!(outcome, FetchOutcome::HttpError { status: 404 });
        assert_eq!(
            std::fs::read_dir(temp_dir.path()).unwrap().count(),
            0,
            "no file may be written for an HTTP error"
        );
    }

    #[tokio::test]
    async fn success_writes_the_exact_body_under_the_trailing_segment() {
        let body: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches/falcon9.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let fetcher = test_fetcher(temp_dir.path().to_path_buf());

        let url = format!("{}/launches/falcon9.jpg", server.uri());
        let outcome = fetcher.fetch_one(&url).await;

        let expected_path = temp_dir.path().join("falcon9.jpg");
        assert_eq!(
            outcome,
            FetchOutcome::Success {
                saved_path: expected_path.clone()
            }
        );
        assert_eq!(std::fs::read(expected_path).unwrap(), body);
    }

    #[tokio::test]
    async fn query_string_is_kept_in_the_filename() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"px".as_slice()))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let fetcher = test_fetcher(temp_dir.path().to_path_buf());

        let outcome = fetcher
            .fetch_one(&format!("{}/img.jpg?x=1", server.uri()))
            .await;

        assert!(outcome.is_success());
        assert!(temp_dir.path().join("img.jpg?x=1").exists());
    }

    #[tokio::test]
    async fn trailing_slash_url_is_a_storage_error_after_a_successful_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gallery/"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"html".as_slice()))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let fetcher = test_fetcher(temp_dir.path().to_path_buf());

        let outcome = fetcher
            .fetch_one(&format!("{}/gallery/", server.uri()))
            .await;

        assert!(matches!(outcome, FetchOutcome::StorageError { .. }));
    }

    #[tokio::test]
    async fn unwritable_target_is_a_storage_error_not_a_crash() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".as_slice()))
            .mount(&server)
            .await;

        // Point the images "directory" at a regular file, so every write fails
        let temp_dir = TempDir::new().unwrap();
        let not_a_dir = temp_dir.path().join("images");
        std::fs::write(&not_a_dir, "occupied").unwrap();
        let fetcher = test_fetcher(not_a_dir);

        let outcome = fetcher.fetch_one(&format!("{}/a.jpg", server.uri())).await;

        assert!(matches!(outcome, FetchOutcome::StorageError { .. }));
    }

    #[tokio::test]
    async fn timeout_is_a_connection_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow.jpg"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = FetchConfig {
            timeout: std::time::Duration::from_millis(100),
            ..FetchConfig::default()
        };
        let fetcher = ImageFetcher::new(&config, temp_dir.path().to_path_buf()).unwrap();

        let outcome = fetcher
            .fetch_one(&format!("{}/slow.jpg", server.uri()))
            .await;

        assert_eq!(outcome, FetchOutcome::ConnectionFailure);
    }
}
