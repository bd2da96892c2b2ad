// logveil-core/src/redaction_log.rs
//! PII-safe debug logging for redaction decisions.
//!
//! Sanitization decisions are worth logging at `debug`, but the values involved are by
//! definition sensitive. Every value passes through [`loggable`], which masks it unless
//! `LOGVEIL_ALLOW_DEBUG_PII=true` is set in the environment.

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::strategy::RedactionStrategy;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("LOGVEIL_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

/// Renders a sensitive value for a log line.
pub fn loggable(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub(crate) fn log_redaction_decision(
    field_name: &str,
    original_value: &str,
    pii_type: &str,
    strategy: RedactionStrategy,
) {
    debug!(
        target: "logveil_core::sanitizer",
        "Field '{}' classified as '{}', applying {} redaction. Original='{}'",
        field_name,
        pii_type,
        strategy,
        loggable(original_value)
    );
}

pub(crate) fn log_passthrough(field_name: &str) {
    trace!(target: "logveil_core::sanitizer", "Field '{}' left unchanged.", field_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_redact_sensitive_counts_characters() {
        assert_eq!(redact_sensitive("ééééééééé"), "[REDACTED: 9 chars]".to_string());
    }
}
