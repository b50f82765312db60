//! Configuration module
//!
//! Settings of one batch run, built from the command line.

use std::time::Duration;

/// Batch run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Job API address of the cluster dashboard (e.g., "http://localhost:8265")
    pub ray_url: String,

    /// Command line each job runs
    pub entrypoint: String,

    /// How many jobs to submit
    pub num_jobs: u32,

    /// Delay between the submit phase and the status phase
    pub wait: Duration,

    /// Local directory or remote package URI shipped as the job's working dir
    pub working_dir: String,

    /// Upper bound on every HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(ray_url: String, entrypoint: String) -> Self {
        Self {
            ray_url,
            entrypoint,
            num_jobs: 100,
            wait: Duration::from_secs(60),
            working_dir: ".".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ray_url.is_empty() {
            anyhow::bail!("ray_url cannot be empty");
        }

        if !self.ray_url.starts_with("http://") && !self.ray_url.starts_with("https://") {
            anyhow::bail!("ray_url must start with http:// or https://");
        }

        if self.entrypoint.trim().is_empty() {
            anyhow::bail!("entrypoint cannot be empty");
        }

        if self.working_dir.is_empty() {
            anyhow::bail!("working_dir cannot be empty");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}
