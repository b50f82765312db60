//! Package-related API endpoints

use std::path::Path;
use tracing::{debug, info};

use crate::JobSubmissionClient;
use crate::error::{ClientError, Result};
use crate::packaging::{self, Package};

impl JobSubmissionClient {
    // =============================================================================
    // Working Directory Packages
    // =============================================================================

    fn package_url(&self, uri: &str) -> Result<String> {
        let (protocol, name) = packaging::split_uri(uri)?;
        Ok(format!("{}/api/packages/{}/{}", self.base_url, protocol, name))
    }

    /// Check whether a package is already stored on the cluster
    ///
    /// # Arguments
    /// * `uri` - Package URI, e.g. `gcs://_ray_pkg_<hash>.zip`
    pub async fn package_exists(&self, uri: &str) -> Result<bool> {
        let url = self.package_url(uri)?;
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ClientError::api_error(status.as_u16(), error_text))
            }
        }
    }

    /// Upload a package archive
    ///
    /// # Arguments
    /// * `package` - The archive and the URI it is stored under
    pub async fn upload_package(&self, package: &Package) -> Result<()> {
        let url = self.package_url(&package.uri)?;
        debug!("PUT {} ({} bytes)", url, package.bytes.len());
        let response = self
            .client
            .put(&url)
            .body(package.bytes.clone())
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Resolve a working directory to a package URI the cluster can fetch
    ///
    /// Remote URIs are returned unchanged. Local directories are zipped and
    /// uploaded unless a package with the same contents already exists.
    ///
    /// # Arguments
    /// * `working_dir` - Local path or remote package URI
    ///
    /// # Returns
    /// The URI to put in the job's runtime environment
    pub async fn upload_working_dir_if_needed(&self, working_dir: &str) -> Result<String> {
        if packaging::is_remote_uri(working_dir) {
            debug!("Working directory {} is already remote", working_dir);
            return Ok(working_dir.to_string());
        }

        let package = packaging::package_directory(Path::new(working_dir))?;

        if self.package_exists(&package.uri).await? {
            info!("Package {} already exists, skipping upload", package.uri);
        } else {
            info!(
                "Uploading {} as {} ({} bytes)",
                working_dir,
                package.uri,
                package.bytes.len()
            );
            self.upload_package(&package).await?;
        }

        Ok(package.uri)
    }
}
