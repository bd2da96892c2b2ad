// logveil-core/src/metrics.rs
//! The metrics boundary: one [`MetricsContext`] per field-level decision, handed to a
//! caller-supplied [`MetricsCollector`].
//!
//! The sanitizer invokes the collector synchronously on the calling thread and does
//! not serialize access to it. A collector shared across threads must do its own
//! synchronization.
//!
//! License: MIT OR APACHE 2.0

use std::fmt::Debug;
use std::time::Duration;

use crate::strategy::RedactionStrategy;

/// Outcome of a single `sanitize_field` decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsContext {
    pub field_name: String,
    /// Field category, content pattern name or `always_redact`; empty when the value
    /// was left alone.
    pub pii_type: String,
    pub redacted: bool,
    pub strategy: RedactionStrategy,
    pub duration: Duration,
    /// Length of the value before any truncation, in characters.
    pub original_value_length: usize,
}

/// Sink for sanitization metrics.
pub trait MetricsCollector: Send + Sync + Debug {
    fn record(&self, context: MetricsContext);
}

/// Collector that discards everything. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsCollector for NoopMetrics {
    fn record(&self, _context: MetricsContext) {}
}
