//! errors.rs - Custom error types for the logveil-core library.
//!
//! This module defines a structured error enum for the library. Construction-time
//! configuration problems, loader problems and serialization failures each get
//! their own variant so callers can tell "fix the configuration" apart from
//! "reject the malformed input".
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `logveil-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LogveilError {
    /// A configuration invariant was violated. Fatal at sanitizer construction.
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("unknown region code '{0}'")]
    UnknownRegion(String),

    #[error("unknown redaction strategy '{0}' (expected full, partial, hash or remove)")]
    UnknownStrategy(String),

    #[error("mask character must be exactly one character, got '{0}'")]
    InvalidMaskChar(String),

    #[error("failed to compile pattern '{name}': {source}")]
    PatternCompilation {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern '{0}': length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("expected a keyed record, got {0}")]
    NotAKeyedRecord(String),

    #[error("an unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}

impl LogveilError {
    pub(crate) fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        LogveilError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogveilError>;
