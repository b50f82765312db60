//! Job domain types

use serde::{Deserialize, Serialize};

/// Job lifecycle status as reported by the cluster
///
/// Serialized in upper case, matching the Job API's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Pending,
    Running,
    Stopped,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Pending,
        JobStatus::Running,
        JobStatus::Stopped,
        JobStatus::Succeeded,
        JobStatus::Failed,
    ];

    /// Whether the job has reached a state it will never leave
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Stopped | JobStatus::Succeeded | JobStatus::Failed
        )
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Stopped => "STOPPED",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let status: JobStatus = serde_json::from_str("\"SUCCEEDED\"").unwrap();
        assert_eq!(status, JobStatus::Succeeded);
        assert_eq!(
            serde_json::to_string(&JobStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<JobStatus>("\"QUEUED\"").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Stopped.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_display_matches_wire_name() {
        for status in JobStatus::ALL {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }
    }
}
