// logveil/src/lib.rs
//! # Logveil CLI Application
//!
//! This crate provides the command-line front end for the `logveil-core` redaction
//! engine. It owns no detection logic: it loads a configuration, feeds JSON documents
//! or newline-delimited log lines through a `Sanitizer`, and reports counts.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod stats;

pub use commands::sanitize::{run_sanitize, SanitizeOptions};
