//! matchers - Compiled field-name and content matchers.
//!
//! Both matchers are compiled once when a `Sanitizer` is built and are read-only
//! afterwards. This module also owns the regex compilation helpers shared with the
//! configuration loader, so every user-supplied pattern goes through the same length
//! and compiled-size limits.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::{LogveilError, Result};
use crate::registry::ContentPattern;

pub mod content;
pub mod field;

pub use content::ContentMatcher;
pub use field::FieldNameMatcher;

/// Maximum allowed length for a user-supplied regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Upper bound on the compiled program size of any single regex.
pub(crate) const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiles a user-supplied pattern, enforcing [`MAX_PATTERN_LENGTH`] and the
/// compiled-size limit.
pub fn compile_pattern(name: &str, pattern: &str) -> Result<Regex> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(LogveilError::PatternLengthExceeded(
            name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| LogveilError::PatternCompilation {
            name: name.to_string(),
            source,
        })?;

    debug!(target: "logveil_core::matchers", "Pattern '{}' compiled successfully.", name);
    Ok(regex)
}

/// Compiles a user-supplied content pattern without a validator.
pub fn compile_content_pattern(name: &str, pattern: &str) -> Result<ContentPattern> {
    compile_pattern(name, pattern).map(|regex| ContentPattern::new(name, regex))
}
