//! Job batch runner
//!
//! Submits a batch of jobs one after another, waits, then looks up the
//! status of every accepted job once. Per-job failures are reported and
//! recorded; they never stop the batch.

use chrono::Local;
use raybatch_client::JobApi;
use raybatch_core::domain::batch::{StatusReport, SubmissionBatch, SubmittedJob};
use raybatch_core::dto::job::{RuntimeEnv, SubmitJobRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::report::{BatchEvent, Reporter};

/// Metadata key holding the id shared by every job of one run
pub const BATCH_ID_KEY: &str = "raybatch_batch_id";

/// Metadata key holding the 1-based attempt index of a job
pub const BATCH_INDEX_KEY: &str = "raybatch_index";

/// Drives one batch run against a Job API
pub struct JobBatchRunner {
    api: Arc<dyn JobApi>,
    reporter: Arc<dyn Reporter>,
    entrypoint: String,
    runtime_env: RuntimeEnv,
    batch_id: Uuid,
}

impl JobBatchRunner {
    /// Creates a runner with a fresh batch id
    pub fn new(
        api: Arc<dyn JobApi>,
        reporter: Arc<dyn Reporter>,
        entrypoint: String,
        runtime_env: RuntimeEnv,
    ) -> Self {
        Self {
            api,
            reporter,
            entrypoint,
            runtime_env,
            batch_id: Uuid::new_v4(),
        }
    }

    /// Id tagged onto every job of this run
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    fn request_for(&self, index: u32) -> SubmitJobRequest {
        SubmitJobRequest::new(self.entrypoint.clone())
            .with_runtime_env(self.runtime_env.clone())
            .with_metadata(BATCH_ID_KEY, self.batch_id.to_string())
            .with_metadata(BATCH_INDEX_KEY, index.to_string())
    }

    /// Submits `num_jobs` jobs sequentially
    ///
    /// # Returns
    /// Accepted jobs in submission order, plus one failure per rejected attempt
    pub async fn submit_batch(&self, num_jobs: u32) -> SubmissionBatch {
        info!("Submitting {} job(s) as batch {}", num_jobs, self.batch_id);
        self.reporter
            .report(BatchEvent::SubmitStarted { num_jobs });

        let mut batch = SubmissionBatch::new();

        for index in 1..=num_jobs {
            let request = self.request_for(index);

            match self.api.submit_job(&request).await {
                Ok(response) => {
                    // The wall clock can step backwards; keep timestamps ordered.
                    let now = Local::now();
                    let submitted_at = match batch.jobs.last() {
                        Some(prev) if prev.submitted_at > now => prev.submitted_at,
                        _ => now,
                    };

                    let job = SubmittedJob::new(index, response.submission_id, submitted_at);
                    debug!("Job {}/{} accepted as {}", index, num_jobs, job.job_id);

                    self.reporter.report(BatchEvent::Submitted {
                        index,
                        total: num_jobs,
                        job_id: job.job_id.clone(),
                        submission_time: job.submission_time(),
                    });
                    batch.push_job(job);
                }
                Err(e) => {
                    warn!("Failed to submit job {}/{}: {}", index, num_jobs, e);

                    self.reporter.report(BatchEvent::SubmitFailed {
                        index,
                        total: num_jobs,
                        error: e.to_string(),
                    });
                    batch.push_failure(index, e.to_string());
                }
            }
        }

        info!(
            "Submit phase done: {} accepted, {} failed",
            batch.jobs.len(),
            batch.failures.len()
        );

        batch
    }

    /// Waits `wait`, then queries every job's status once, in order
    ///
    /// # Returns
    /// Per-status counts and the number of failed queries
    pub async fn await_and_report(&self, jobs: &[SubmittedJob], wait: Duration) -> StatusReport {
        self.reporter.report(BatchEvent::Waiting { wait });
        tokio::time::sleep(wait).await;

        self.reporter
            .report(BatchEvent::StatusStarted { jobs: jobs.len() });

        let mut report = StatusReport::new();

        for job in jobs {
            match self.api.get_job_status(&job.job_id).await {
                Ok(status) => {
                    report.record(status);
                    self.reporter.report(BatchEvent::Status {
                        job_id: job.job_id.clone(),
                        submission_time: job.submission_time(),
                        status,
                    });
                }
                Err(e) => {
                    warn!("Failed to query status of job {}: {}", job.job_id, e);

                    report.record_failure();
                    self.reporter.report(BatchEvent::StatusFailed {
                        job_id: job.job_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Reports the outcome of both phases
    pub fn finish(&self, batch: &SubmissionBatch, report: StatusReport) {
        self.reporter.report(BatchEvent::Finished {
            attempted: batch.attempted(),
            failed_indices: batch.failures.iter().map(|f| f.index).collect(),
            report,
        });
    }
}
