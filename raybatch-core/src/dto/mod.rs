//! Data Transfer Objects for the cluster Job REST API
//!
//! Bodies exchanged with the dashboard's `/api/jobs` and `/api/version`
//! endpoints. Field names follow the cluster's JSON exactly.

pub mod job;
pub mod version;
