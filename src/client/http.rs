//! HTTP implementation of the scan backend
//!
//! A thin `reqwest` wrapper: it sends the three requests and hands the response
//! bodies to the decoders in [`super::wire`]. Request timeouts are enforced by the
//! orchestrator, not here, so the scripted backend used in tests behaves the same.

use super::wire;
use crate::core::traits::ScanBackend;
use crate::types::{BlockHeight, ImportRequest, JobId, JobStatus, ViewerError};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use tracing::{debug, warn};

/// Server used when none is configured
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Connection settings for [`HttpScanClient`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the scan service, without a trailing slash
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig, falling back to the default server on unusable input
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');

        match Url::parse(trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self {
                base_url: trimmed.to_string(),
            },
            _ => {
                let default = Self::default();
                warn!(
                    "Invalid server URL ({:?}), using default ({})",
                    base_url, default.base_url
                );
                default
            }
        }
    }
}

/// Scan service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpScanClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpScanClient {
    /// Create a client for the configured server
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(HttpClient::new(), config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(http_client: HttpClient, config: ClientConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a job's status endpoint, with the id escaped as a single path segment
    fn job_url(&self, job_id: &JobId) -> Result<Url, ViewerError> {
        let mut url = Url::parse(&self.endpoint("/api/job"))
            .map_err(|e| ViewerError::Transport {
                message: e.to_string(),
            })?;
        url.path_segments_mut()
            .map_err(|_| ViewerError::Transport {
                message: format!("cannot build a job URL from {}", self.base_url),
            })?
            .push(&job_id.0);
        Ok(url)
    }
}

#[async_trait]
impl ScanBackend for HttpScanClient {
    async fn fetch_height(&self) -> Result<BlockHeight, ViewerError> {
        let body = self
            .http_client
            .get(self.endpoint("/api/height"))
            .send()
            .await?
            .text()
            .await?;
        wire::decode_height(&body)
    }

    async fn start_import(&self, request: &ImportRequest) -> Result<JobId, ViewerError> {
        let response = self
            .http_client
            .post(self.endpoint("/api/import"))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "import response received");
        wire::decode_import(status.is_success(), &body)
    }

    async fn poll_job(&self, job_id: &JobId) -> Result<JobStatus, ViewerError> {
        let response = self.http_client.get(self.job_url(job_id)?).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(job_id = %job_id, status = status.as_u16(), "job status received");
        wire::decode_job_status(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("http://localhost:5000", "http://localhost:5000")]
    #[case::trailing_slash("https://view.example.org/", "https://view.example.org")]
    #[case::padded("  http://10.0.0.2:8080//  ", "http://10.0.0.2:8080")]
    #[case::no_scheme("localhost:5000", DEFAULT_SERVER)]
    #[case::empty("", DEFAULT_SERVER)]
    #[case::ftp("ftp://example.org", DEFAULT_SERVER)]
    fn test_client_config(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ClientConfig::new(input).base_url, expected);
    }

    #[rstest]
    #[case::hex("3f2a9c", "http://127.0.0.1:5000/api/job/3f2a9c")]
    #[case::needs_escaping("a/b c", "http://127.0.0.1:5000/api/job/a%2Fb%20c")]
    fn test_job_url(#[case] id: &str, #[case] expected: &str) {
        let client = HttpScanClient::new(ClientConfig::default());
        let url = client.job_url(&JobId(id.to_string())).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn test_job_url_under_path_prefix() {
        let client = HttpScanClient::new(ClientConfig::new("https://example.org/viewer/"));
        let url = client.job_url(&JobId("42".to_string())).unwrap();
        assert_eq!(url.as_str(), "https://example.org/viewer/api/job/42");
    }
}
