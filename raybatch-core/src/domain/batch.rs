//! Batch run domain types
//!
//! A batch run submits jobs one by one, then queries each accepted job once.
//! [`SubmissionBatch`] keeps accepted and rejected attempts apart so a caller
//! can tell "submission failed" from "never attempted".

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::job::JobStatus;

/// Format used when printing submission timestamps
pub const SUBMISSION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A job the cluster accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedJob {
    /// 1-based attempt index that produced this job
    pub index: u32,
    /// Opaque identifier returned by the cluster
    pub job_id: String,
    /// Local wall-clock time taken right after the cluster accepted the job
    pub submitted_at: DateTime<Local>,
}

impl SubmittedJob {
    pub fn new(index: u32, job_id: impl Into<String>, submitted_at: DateTime<Local>) -> Self {
        Self {
            index,
            job_id: job_id.into(),
            submitted_at,
        }
    }

    /// Submission time rendered as `YYYY-MM-DD HH:MM:SS`
    pub fn submission_time(&self) -> String {
        self.submitted_at
            .format(SUBMISSION_TIME_FORMAT)
            .to_string()
    }
}

/// A submission attempt the cluster did not accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionFailure {
    /// 1-based attempt index
    pub index: u32,
    /// Rendered error
    pub error: String,
}

/// Everything the submit phase produced, in attempt order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionBatch {
    pub jobs: Vec<SubmittedJob>,
    pub failures: Vec<SubmissionFailure>,
}

impl SubmissionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted job
    pub fn push_job(&mut self, job: SubmittedJob) {
        self.jobs.push(job);
    }

    /// Record a rejected attempt
    pub fn push_failure(&mut self, index: u32, error: impl Into<String>) {
        self.failures.push(SubmissionFailure {
            index,
            error: error.into(),
        });
    }

    /// Number of attempts made so far
    pub fn attempted(&self) -> usize {
        self.jobs.len() + self.failures.len()
    }
}

/// Tally of the status phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Number of jobs seen in each status
    pub by_status: BTreeMap<JobStatus, usize>,
    /// Number of status queries that failed
    pub query_failures: usize,
}

impl StatusReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: JobStatus) {
        *self.by_status.entry(status).or_insert(0) += 1;
    }

    pub fn record_failure(&mut self) {
        self.query_failures += 1;
    }

    /// How many jobs were seen in `status`
    pub fn count(&self, status: JobStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// How many queried jobs had already stopped, succeeded or failed
    pub fn finished(&self) -> usize {
        self.by_status
            .iter()
            .filter(|(status, _)| status.is_terminal())
            .map(|(_, count)| count)
            .sum()
    }

    /// Total number of queries made, successful or not
    pub fn queried(&self) -> usize {
        self.by_status.values().sum::<usize>() + self.query_failures
    }
}
