//! Core domain types
//!
//! These types describe the outcome of a batch run. They are built by the
//! CLI while it drives the cluster and never leave the process.

pub mod batch;
pub mod job;
