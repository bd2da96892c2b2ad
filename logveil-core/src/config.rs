//! Configuration management for `logveil-core`.
//!
//! [`SanitizerConfig`] is the in-memory configuration a `Sanitizer` is built from. It is
//! assembled with the `with_*` builder methods (or produced by the `loader` module from a
//! YAML/JSON document), validated once, and then owned by the sanitizer for its whole
//! lifetime.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use log::debug;

use crate::errors::{LogveilError, Result};
use crate::metrics::{MetricsCollector, NoopMetrics};
use crate::registry::{ContentPattern, Region};
use crate::strategy::{PartialMask, RedactionStrategy};

pub const DEFAULT_MAX_DEPTH: usize = 10;
/// Upper bound accepted for `max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 100;
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 10_000;
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000;

/// Everything a `Sanitizer` needs to know. Lengths are counted in characters; a length
/// limit of 0 means unlimited.
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    pub regions: Vec<Region>,
    /// Field names that are always redacted (case-insensitive).
    pub always_redact: Vec<String>,
    /// Field names that are never redacted (case-insensitive). Wins over everything.
    pub never_redact: Vec<String>,
    pub strategy: RedactionStrategy,
    pub partial: PartialMask,
    pub max_depth: usize,
    pub max_field_length: usize,
    pub max_content_length: usize,
    pub hash_salt: String,
    /// Extra field categories, merged with the built-in ones by name.
    pub custom_field_patterns: BTreeMap<String, Vec<String>>,
    /// Extra content patterns, evaluated after the built-in ones.
    pub custom_content_patterns: Vec<ContentPattern>,
    pub metrics: Arc<dyn MetricsCollector>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            regions: Region::ALL.to_vec(),
            always_redact: Vec::new(),
            never_redact: Vec::new(),
            strategy: RedactionStrategy::Full,
            partial: PartialMask::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            hash_salt: String::new(),
            custom_field_patterns: BTreeMap::new(),
            custom_content_patterns: Vec::new(),
            metrics: Arc::new(NoopMetrics),
        }
    }
}

impl SanitizerConfig {
    /// Replaces the active regions. Duplicates are dropped, first occurrence wins.
    pub fn with_regions<I: IntoIterator<Item = Region>>(mut self, regions: I) -> Self {
        let mut seen = HashSet::new();
        self.regions = regions.into_iter().filter(|r| seen.insert(*r)).collect();
        self
    }

    pub fn with_strategy(mut self, strategy: RedactionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_always_redact<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_redact.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_never_redact<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.never_redact.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_partial_masking(
        mut self,
        mask_char: char,
        keep_left: usize,
        keep_right: usize,
    ) -> Self {
        self.partial = PartialMask {
            mask_char,
            keep_left,
            keep_right,
        };
        self
    }

    pub fn with_hash_salt(mut self, salt: impl Into<String>) -> Self {
        self.hash_salt = salt.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_field_length(mut self, max_field_length: usize) -> Self {
        self.max_field_length = max_field_length;
        self
    }

    pub fn with_max_content_length(mut self, max_content_length: usize) -> Self {
        self.max_content_length = max_content_length;
        self
    }

    /// Adds field names to a (possibly new) category.
    pub fn with_custom_fields<I, S>(mut self, category: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_field_patterns
            .entry(category.to_string())
            .or_default()
            .extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_custom_content_pattern(mut self, pattern: ContentPattern) -> Self {
        self.custom_content_patterns.push(pattern);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Checks the configuration invariants, returning the first violation found.
    ///
    /// Values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(LogveilError::invalid_config("regions", "at least one region is required"));
        }

        if !(1..=MAX_DEPTH_LIMIT).contains(&self.max_depth) {
            return Err(LogveilError::invalid_config(
                "max_depth",
                format!("must be between 1 and {}, got {}", MAX_DEPTH_LIMIT, self.max_depth),
            ));
        }

        for category in self.custom_field_patterns.keys() {
            if category.trim().is_empty() {
                return Err(LogveilError::invalid_config(
                    "custom_patterns.fields",
                    "category names must not be empty",
                ));
            }
        }

        let mut pattern_names = HashSet::new();
        for pattern in &self.custom_content_patterns {
            if pattern.name().trim().is_empty() {
                return Err(LogveilError::invalid_config(
                    "custom_patterns.content",
                    "a pattern has an empty name",
                ));
            }
            if !pattern_names.insert(pattern.name()) {
                return Err(LogveilError::invalid_config(
                    "custom_patterns.content",
                    format!("duplicate pattern name '{}'", pattern.name()),
                ));
            }
        }

        debug!(
            "Configuration valid: {} region(s), strategy {}, max_depth {}.",
            self.regions.len(),
            self.strategy,
            self.max_depth
        );
        Ok(())
    }
}
