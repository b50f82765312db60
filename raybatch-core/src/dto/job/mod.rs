//! Job DTOs for the cluster Job REST API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::job::JobStatus;

/// Runtime environment shipped with a submission
///
/// Only the working directory is set by this tool; the cluster accepts many
/// more keys, which stay absent from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEnv {
    /// Package URI of the job's working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

impl RuntimeEnv {
    pub fn with_working_dir(uri: impl Into<String>) -> Self {
        Self {
            working_dir: Some(uri.into()),
        }
    }
}

/// Body of `POST /api/jobs/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    /// Command line the cluster runs
    pub entrypoint: String,

    /// Caller-chosen id; the cluster generates one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_env: Option<RuntimeEnv>,

    /// Free-form labels shown on the dashboard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl SubmitJobRequest {
    pub fn new(entrypoint: impl Into<String>) -> Self {
        Self {
            entrypoint: entrypoint.into(),
            submission_id: None,
            runtime_env: None,
            metadata: None,
        }
    }

    pub fn with_runtime_env(mut self, runtime_env: RuntimeEnv) -> Self {
        self.runtime_env = Some(runtime_env);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Response of `POST /api/jobs/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    /// Legacy driver job id, kept for older clusters
    #[serde(default)]
    pub job_id: Option<String>,
    /// Identifier used for every later query
    pub submission_id: String,
}

/// Response of `GET /api/jobs/{id}`
///
/// Only the fields this tool reads are modelled; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    /// "SUBMISSION" for jobs created through the Job API, "DRIVER" otherwise
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub submission_id: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub entrypoint: Option<String>,
    /// Human-readable explanation of the current status
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub start_time: Option<u64>,
    #[serde(default)]
    pub end_time: Option<u64>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(default)]
    pub runtime_env: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submit_request_omits_unset_fields() {
        let req = SubmitJobRequest::new("python a.py");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "entrypoint": "python a.py" })
        );
    }

    #[test]
    fn test_submit_request_with_runtime_env_and_metadata() {
        let req = SubmitJobRequest::new("python a.py")
            .with_runtime_env(RuntimeEnv::with_working_dir("gcs://_ray_pkg_0123.zip"))
            .with_metadata("raybatch_index", "7");

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "entrypoint": "python a.py",
                "runtime_env": { "working_dir": "gcs://_ray_pkg_0123.zip" },
                "metadata": { "raybatch_index": "7" }
            })
        );
    }

    #[test]
    fn test_parse_submit_response() {
        let resp: SubmitJobResponse =
            serde_json::from_str(r#"{"job_id": null, "submission_id": "raysubmit_XYZ"}"#).unwrap();
        assert_eq!(resp.submission_id, "raysubmit_XYZ");
        assert!(resp.job_id.is_none());
    }

    #[test]
    fn test_parse_job_details_ignores_unknown_fields() {
        let body = json!({
            "type": "SUBMISSION",
            "job_id": "02000000",
            "submission_id": "raysubmit_XYZ",
            "driver_info": { "id": "02000000", "node_ip_address": "10.0.0.1", "pid": "42" },
            "status": "RUNNING",
            "entrypoint": "python a.py",
            "message": "Job is currently running.",
            "error_type": null,
            "start_time": 1700000000000u64,
            "end_time": null,
            "metadata": {},
            "runtime_env": { "working_dir": "gcs://_ray_pkg_0123.zip" },
            "driver_agent_http_address": "http://10.0.0.1:52365"
        });

        let details: JobDetails = serde_json::from_value(body).unwrap();
        assert_eq!(details.status, JobStatus::Running);
        assert_eq!(details.job_type.as_deref(), Some("SUBMISSION"));
        assert_eq!(details.start_time, Some(1_700_000_000_000));
        assert!(details.end_time.is_none());
    }
}
