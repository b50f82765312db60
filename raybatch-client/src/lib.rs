//! Raybatch HTTP Client
//!
//! A small, type-safe HTTP client for a cluster's Job REST API (the Ray
//! dashboard's `/api/jobs` endpoints).
//!
//! # Example
//!
//! ```no_run
//! use raybatch_client::JobSubmissionClient;
//! use raybatch_core::dto::job::SubmitJobRequest;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobSubmissionClient::connect("http://localhost:8265", Duration::from_secs(30)).await?;
//!
//!     let submitted = client.submit_job(&SubmitJobRequest::new("python a.py")).await?;
//!     let status = client.get_job_status(&submitted.submission_id).await?;
//!
//!     println!("{} is {}", submitted.submission_id, status);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod jobs;
mod packages;
pub mod packaging;
#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use api::JobApi;
pub use error::{ClientError, Result};
pub use raybatch_core::domain::job::JobStatus;

use raybatch_core::dto::version::VersionInfo;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the cluster Job REST API
///
/// Covers the endpoints a batch run needs:
/// - Version check (reachability)
/// - Job submission and status lookup
/// - Working directory package upload
#[derive(Debug, Clone)]
pub struct JobSubmissionClient {
    /// Base URL of the dashboard (e.g., "http://localhost:8265")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobSubmissionClient {
    /// Create a new client without contacting the cluster
    ///
    /// # Arguments
    /// * `base_url` - The dashboard address (e.g., "http://localhost:8265")
    ///
    /// # Example
    /// ```
    /// use raybatch_client::JobSubmissionClient;
    ///
    /// let client = JobSubmissionClient::new("http://localhost:8265");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use raybatch_client::JobSubmissionClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobSubmissionClient::with_client("http://localhost:8265", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client and check that the cluster answers
    ///
    /// Every request made through the returned client is bounded by
    /// `timeout`. Fails if the HTTP client cannot be built or if
    /// `GET /api/version` does not succeed.
    pub async fn connect(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let client = Self::with_client(base_url, http_client);

        let version = client.version().await?;
        info!(
            "Connected to {} (api version {}, ray {})",
            client.base_url,
            version.version,
            version.ray_version.as_deref().unwrap_or("unknown")
        );

        Ok(client)
    }

    /// Get the base URL of the dashboard
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the Job API version
    pub async fn version(&self) -> Result<VersionInfo> {
        let url = format!("{}/api/version", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// Handle an API response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
