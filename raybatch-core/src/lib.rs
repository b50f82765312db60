//! Raybatch Core
//!
//! Core types shared by the raybatch client and CLI.
//!
//! This crate contains:
//! - Domain types: what a batch run produces (submitted jobs, failures, status tallies)
//! - DTOs: request and response bodies of the cluster's Job REST API

pub mod domain;
pub mod dto;
