// logveil-core/src/lib.rs
//! # Logveil Core Library
//!
//! `logveil-core` detects and redacts personally identifiable information in structured
//! application data (field/value pairs, nested maps, sequences and typed records) before
//! that data reaches a log sink.
//!
//! Detection combines two independent heuristics: the *name* of the field holding a value,
//! and *patterns* found inside the value. Region-specific identifiers (national IDs, phone
//! numbers, IBANs) are confirmed with their check-digit algorithms before they count as a
//! match, which keeps order numbers and timestamps from being flagged.
//!
//! The library is pure: no I/O beyond the optional configuration loader, no threads, no
//! global mutable state.
//!
//! ## Modules
//!
//! * `validators`: Check-digit algorithms for national IDs, IBANs and payment cards.
//! * `registry`: Built-in field names and content patterns, per region.
//! * `matchers`: The compiled field-name and content matchers.
//! * `strategy`: The `Full`, `Partial`, `Hash` and `Remove` redaction strategies.
//! * `config`: The in-memory [`SanitizerConfig`] and its validation.
//! * `loader`: YAML/JSON configuration documents.
//! * `record`: Descriptor tables for annotation-aware typed records.
//! * `sanitizer`: The [`Sanitizer`] façade and its traversal engine.
//! * `metrics`: The [`MetricsCollector`] boundary.
//! * `redaction_log`: PII-safe debug logging helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use logveil_core::{RedactionStrategy, Region, Sanitizer, SanitizerConfig};
//! use serde_json::json;
//!
//! fn main() -> Result<(), logveil_core::LogveilError> {
//!     let config = SanitizerConfig::default()
//!         .with_regions([Region::Singapore, Region::Malaysia])
//!         .with_strategy(RedactionStrategy::Full)
//!         .with_never_redact(["request_id"]);
//!     let sanitizer = Sanitizer::new(config)?;
//!
//!     let input = json!({
//!         "email": "user@example.com",
//!         "orderId": "ORD-123",
//!         "note": "customer NRIC is S1234567D",
//!     });
//!     let output = sanitizer.sanitize_value(&input);
//!
//!     assert_eq!(output["email"], "[REDACTED]");
//!     assert_eq!(output["orderId"], "ORD-123");
//!     assert_eq!(output["note"], "[REDACTED]");
//!     Ok(())
//! }
//! ```
//!
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod errors;
pub mod loader;
pub mod matchers;
pub mod metrics;
pub mod record;
pub mod redaction_log;
pub mod registry;
pub mod sanitizer;
pub mod strategy;
pub mod validators;

pub use config::{
    SanitizerConfig, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_MAX_DEPTH, DEFAULT_MAX_FIELD_LENGTH,
    MAX_DEPTH_LIMIT,
};
pub use errors::{LogveilError, Result};
pub use loader::{load_config_from_file, ConfigFile};
pub use matchers::{
    compile_content_pattern, compile_pattern, ContentMatcher, FieldNameMatcher, MAX_PATTERN_LENGTH,
};
pub use metrics::{MetricsCollector, MetricsContext, NoopMetrics};
pub use record::{FieldAction, FieldTag, FieldValue, RecordDescriptor, RecordView, TaggedRecord};
pub use registry::{ContentPattern, FieldCategory, PatternRegistry, Region, RegionalPatternSet};
pub use sanitizer::{Sanitizer, ALWAYS_REDACT_TYPE};
pub use strategy::{PartialMask, RedactionStrategy, Redactor, REDACTED_SENTINEL};
