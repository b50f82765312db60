//! Console reporting
//!
//! The batch runner emits one [`BatchEvent`] per progress step. The console
//! reporter turns each event into a single stdout line.

use colored::*;
use raybatch_core::domain::batch::StatusReport;
use raybatch_core::domain::job::JobStatus;
use std::time::Duration;

/// A progress step of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Submit phase is starting
    SubmitStarted { num_jobs: u32 },
    /// The cluster accepted attempt `index`
    Submitted {
        index: u32,
        total: u32,
        job_id: String,
        submission_time: String,
    },
    /// The cluster rejected attempt `index`, or it never reached the cluster
    SubmitFailed {
        index: u32,
        total: u32,
        error: String,
    },
    /// Submit phase finished, the runner is about to wait
    Waiting { wait: Duration },
    /// Status phase is starting
    StatusStarted { jobs: usize },
    /// Status of one job
    Status {
        job_id: String,
        submission_time: String,
        status: JobStatus,
    },
    /// Status lookup of one job failed
    StatusFailed { job_id: String, error: String },
    /// Both phases are done
    Finished {
        attempted: usize,
        failed_indices: Vec<u32>,
        report: StatusReport,
    },
}

/// Sink for batch progress
pub trait Reporter: Send + Sync {
    /// Reports one progress step
    fn report(&self, event: BatchEvent);
}

/// Reporter printing to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Renders an event as the line printed for it
    pub fn render(event: &BatchEvent) -> String {
        match event {
            BatchEvent::SubmitStarted { num_jobs } => {
                format!("Submitting {} job(s)...", num_jobs)
                    .bold()
                    .to_string()
            }
            BatchEvent::Submitted {
                index,
                total,
                job_id,
                submission_time,
            } => format!(
                "{} Submitted job {}/{}, Job ID: {}, submitted at: {}",
                "✓".green(),
                index,
                total,
                job_id.cyan(),
                submission_time.dimmed()
            ),
            BatchEvent::SubmitFailed {
                index,
                total,
                error,
            } => format!(
                "{} Failed to submit job {}/{}: {}",
                "✗".red(),
                index,
                total,
                error.red()
            ),
            BatchEvent::Waiting { wait } => format!(
                "All jobs submitted. Waiting {} second(s) before querying job status...",
                wait.as_secs()
            )
            .bold()
            .to_string(),
            BatchEvent::StatusStarted { jobs } => {
                format!("Querying status of {} job(s)...", jobs)
                    .bold()
                    .to_string()
            }
            BatchEvent::Status {
                job_id,
                submission_time,
                status,
            } => format!(
                "  {} Job ID: {}, submitted at: {}, status: {}",
                "▸".cyan(),
                job_id,
                submission_time.dimmed(),
                colorize_status(status)
            ),
            BatchEvent::StatusFailed { job_id, error } => format!(
                "  {} Failed to query status of job {}: {}",
                "✗".red(),
                job_id,
                error.red()
            ),
            BatchEvent::Finished {
                attempted,
                failed_indices,
                report,
            } => render_summary(*attempted, failed_indices, report),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: BatchEvent) {
        println!("{}", Self::render(&event));
    }
}

fn render_summary(attempted: usize, failed_indices: &[u32], report: &StatusReport) -> String {
    let submitted = attempted - failed_indices.len();
    let mut lines = vec![format!(
        "{} Submitted {}/{} job(s)",
        "Summary:".bold(),
        submitted,
        attempted
    )];

    if !failed_indices.is_empty() {
        let indices: Vec<String> = failed_indices.iter().map(|i| i.to_string()).collect();
        lines.push(format!(
            "  Failed submissions: {}",
            indices.join(", ").red()
        ));
    }

    let counts: Vec<String> = JobStatus::ALL
        .iter()
        .filter(|status| report.count(**status) > 0)
        .map(|status| format!("{}={}", colorize_status(status), report.count(*status)))
        .collect();
    if !counts.is_empty() {
        lines.push(format!("  Statuses: {}", counts.join(" ")));
        lines.push(format!(
            "  Finished: {}/{} queried job(s)",
            report.finished(),
            report.queried()
        ));
    }

    if report.query_failures > 0 {
        lines.push(format!(
            "  Status queries failed: {}",
            report.query_failures.to_string().red()
        ));
    }

    lines.join("\n")
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Stopped => status_str.dimmed(),
    }
}
