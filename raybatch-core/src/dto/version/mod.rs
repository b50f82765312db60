//! Version DTOs

use serde::{Deserialize, Serialize};

/// Response of `GET /api/version`
///
/// Used as a reachability check before any job is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Job API version
    pub version: String,
    #[serde(default)]
    pub ray_version: Option<String>,
    #[serde(default)]
    pub ray_commit: Option<String>,
}
