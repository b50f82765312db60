//! Job-related API endpoints

use crate::JobSubmissionClient;
use crate::error::{ClientError, Result};
use raybatch_core::domain::job::JobStatus;
use raybatch_core::dto::job::{JobDetails, SubmitJobRequest, SubmitJobResponse};
use tracing::debug;

impl JobSubmissionClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a new job
    ///
    /// # Arguments
    /// * `req` - The job submission request
    ///
    /// # Returns
    /// The cluster's answer, carrying the submission id
    ///
    /// # Example
    /// ```no_run
    /// # use raybatch_client::JobSubmissionClient;
    /// # use raybatch_core::dto::job::{RuntimeEnv, SubmitJobRequest};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = JobSubmissionClient::new("http://localhost:8265");
    /// let submitted = client
    ///     .submit_job(
    ///         &SubmitJobRequest::new("python a.py")
    ///             .with_runtime_env(RuntimeEnv::with_working_dir("gcs://_ray_pkg_0123.zip")),
    ///     )
    ///     .await?;
    /// println!("{}", submitted.submission_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_job(&self, req: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        if req.entrypoint.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "entrypoint cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/api/jobs/", self.base_url);
        debug!("POST {} entrypoint={:?}", url, req.entrypoint);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get full details of a job
    ///
    /// # Arguments
    /// * `job_id` - Submission id (or driver job id) of the job
    ///
    /// # Returns
    /// The job details, or [`ClientError::JobNotFound`] if the cluster does not know it
    pub async fn get_job_info(&self, job_id: &str) -> Result<JobDetails> {
        let url = format!("{}/api/jobs/{}", self.base_url, job_id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::JobNotFound(job_id.to_string()));
        }

        self.handle_response(response).await
    }

    /// Get the current status of a job
    ///
    /// # Arguments
    /// * `job_id` - Submission id of the job
    pub async fn get_job_status(&self, job_id: &str) -> Result<JobStatus> {
        Ok(self.get_job_info(job_id).await?.status)
    }
}
