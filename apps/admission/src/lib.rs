//! # Admission application library
//!
//! The command-line surface over `admission-core`, split out of `main.rs`
//! so the commands and configuration can be exercised from tests.

pub mod cli;
pub mod config;
