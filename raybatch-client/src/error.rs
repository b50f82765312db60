//! Error types for the Job API client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while submitting or inspecting jobs
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an HTTP answer (refused, timed out, bad address)
    #[error("Could not reach the Job API: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The Job API answered with a non-2xx status
    #[error("Job API returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// A 2xx answer whose body is not what the endpoint documents
    #[error("Unexpected Job API response: {0}")]
    ParseError(String),

    /// The cluster has no job with this id
    #[error("Job {0} does not exist on the cluster")]
    JobNotFound(String),

    /// Refused locally before anything was sent
    #[error("Refusing to send request: {0}")]
    InvalidRequest(String),

    /// Reading the working directory failed
    #[error("I/O error while packaging: {0}")]
    Io(#[from] std::io::Error),

    /// Walking the working directory failed
    #[error("Failed to walk working directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Building the zip archive failed
    #[error("Failed to build package archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Package exceeds what the cluster accepts
    #[error("Working directory holds more than {limit} bytes (stopped at {size})")]
    PackageTooLarge { size: u64, limit: u64 },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_not_found_names_the_job() {
        let err = ClientError::JobNotFound("raysubmit_x".into());
        assert_eq!(err.to_string(), "Job raysubmit_x does not exist on the cluster");
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let err = ClientError::api_error(400, "entrypoint is required");
        assert_eq!(
            err.to_string(),
            "Job API returned status 400: entrypoint is required"
        );
    }
}
