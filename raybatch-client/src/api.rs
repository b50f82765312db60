//! Job API seam
//!
//! The batch runner only needs two remote calls. Keeping them behind a trait
//! lets the runner be driven by an in-memory fake in tests.

use async_trait::async_trait;
use raybatch_core::domain::job::JobStatus;
use raybatch_core::dto::job::{SubmitJobRequest, SubmitJobResponse};

use crate::JobSubmissionClient;
use crate::error::Result;

/// Remote job operations used by a batch run
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Submits a job and returns the cluster's answer
    ///
    /// # Arguments
    /// * `request` - Entrypoint, runtime environment and metadata of the job
    async fn submit_job(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse>;

    /// Looks up the current status of a submitted job
    ///
    /// # Arguments
    /// * `job_id` - Submission id returned by [`JobApi::submit_job`]
    async fn get_job_status(&self, job_id: &str) -> Result<JobStatus>;
}

#[async_trait]
impl JobApi for JobSubmissionClient {
    async fn submit_job(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        JobSubmissionClient::submit_job(self, request).await
    }

    async fn get_job_status(&self, job_id: &str) -> Result<JobStatus> {
        JobSubmissionClient::get_job_status(self, job_id).await
    }
}
