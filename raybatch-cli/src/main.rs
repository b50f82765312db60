//! Raybatch CLI
//!
//! Submits a batch of identical jobs to a cluster's Job API, waits, then
//! prints the status of every accepted job.
//!
//! Flow:
//! - Connect: check the Job API once; failure aborts the run
//! - Package: upload the working directory unless it is already remote
//! - Submit: one job per index, failures reported and skipped
//! - Wait, then query each accepted job's status once

mod config;
mod report;
mod runner;

use anyhow::{Context, Result};
use clap::Parser;
use raybatch_client::JobSubmissionClient;
use raybatch_core::dto::job::RuntimeEnv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::report::ConsoleReporter;
use crate::runner::JobBatchRunner;

#[derive(Parser)]
#[command(name = "raybatch", version)]
#[command(
    about = "Submit a batch of jobs to a Ray cluster and report their status",
    long_about = None
)]
struct Cli {
    /// Job API address of the cluster dashboard, e.g. http://127.0.0.1:8265
    #[arg(long = "ray-url", visible_alias = "cluster-url", env = "RAY_ADDRESS")]
    ray_url: String,

    /// Command each job runs, e.g. 'python my_job.py'
    #[arg(long)]
    entrypoint: String,

    /// Number of jobs to submit
    #[arg(long, default_value_t = 100)]
    num_jobs: u32,

    /// Seconds to wait between submitting and querying status
    #[arg(long, default_value_t = 60)]
    wait_seconds: u64,

    /// Working directory shipped with every job (local path or package URI)
    #[arg(long, default_value = ".")]
    working_dir: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            num_jobs: cli.num_jobs,
            wait: Duration::from_secs(cli.wait_seconds),
            working_dir: cli.working_dir,
            request_timeout: Duration::from_secs(cli.request_timeout),
            ..Config::new(cli.ray_url, cli.entrypoint)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raybatch=info,raybatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config: Config = Cli::parse().into();
    config.validate().context("Invalid configuration")?;

    run(&config).await
}

/// Runs both phases of a batch
async fn run(config: &Config) -> Result<()> {
    let client = JobSubmissionClient::connect(config.ray_url.clone(), config.request_timeout)
        .await
        .with_context(|| format!("Failed to reach the Job API at {}", config.ray_url))?;

    let working_dir = client
        .upload_working_dir_if_needed(&config.working_dir)
        .await
        .with_context(|| format!("Failed to prepare working directory {}", config.working_dir))?;
    info!("Jobs will run in {}", working_dir);

    let runner = JobBatchRunner::new(
        Arc::new(client),
        Arc::new(ConsoleReporter::new()),
        config.entrypoint.clone(),
        RuntimeEnv::with_working_dir(working_dir),
    );
    info!("Tagging jobs with batch id {}", runner.batch_id());

    let batch = runner.submit_batch(config.num_jobs).await;
    let report = runner.await_and_report(&batch.jobs, config.wait).await;
    runner.finish(&batch, report);

    Ok(())
}
