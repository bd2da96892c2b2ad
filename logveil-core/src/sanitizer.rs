//! sanitizer.rs - The traversal and sanitization engine.
//!
//! A [`Sanitizer`] is compiled once from a validated [`SanitizerConfig`] and is
//! read-only afterwards, so a single instance can be shared across threads.
//!
//! Per-field resolution order:
//!
//! 1. `never_redact` field name: value returned unchanged.
//! 2. `always_redact` field name: redacted.
//! 3. field-name matcher fires: redacted.
//! 4. content matcher fires on the (truncated) value: redacted.
//! 5. otherwise unchanged.
//!
//! Composite data is walked with a depth counter that starts at 0. A keyed structure or
//! sequence deeper than `max_depth` is returned as-is; a typed record deeper than
//! `max_depth` becomes an empty map.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::SanitizerConfig;
use crate::errors::{LogveilError, Result};
use crate::matchers::{ContentMatcher, FieldNameMatcher};
use crate::metrics::MetricsContext;
use crate::record::{FieldAction, FieldValue, RecordView};
use crate::redaction_log::{log_passthrough, log_redaction_decision};
use crate::registry::{merge_category, FieldCategory, PatternRegistry};
use crate::strategy::{RedactionStrategy, Redactor, REDACTED_SENTINEL};

/// `pii_type` reported for fields listed in `always_redact`.
pub const ALWAYS_REDACT_TYPE: &str = "always_redact";

/// The compiled, immutable sanitization engine.
#[derive(Debug)]
pub struct Sanitizer {
    config: SanitizerConfig,
    registry: Arc<PatternRegistry>,
    field_matcher: FieldNameMatcher,
    content_matcher: ContentMatcher,
    redactor: Redactor,
    always_redact: HashSet<String>,
    never_redact: HashSet<String>,
}

impl Sanitizer {
    /// Validates `config` and compiles a sanitizer against the shared pattern registry.
    ///
    /// An error here means the configuration is wrong; retrying will not help.
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        Self::with_registry(config, PatternRegistry::shared())
    }

    /// Like [`Sanitizer::new`], with an explicitly supplied registry.
    pub fn with_registry(config: SanitizerConfig, registry: Arc<PatternRegistry>) -> Result<Self> {
        config.validate()?;

        let mut categories = registry.field_categories_for(&config.regions);
        for (name, fields) in &config.custom_field_patterns {
            merge_category(&mut categories, &FieldCategory::new(name, fields.iter().cloned()));
        }
        let field_matcher = FieldNameMatcher::compile(&categories)?;

        let mut patterns = registry.content_patterns_for(&config.regions);
        patterns.extend(config.custom_content_patterns.iter().cloned());
        let content_matcher = ContentMatcher::new(patterns);

        let redactor = Redactor::new(config.strategy, config.partial, config.hash_salt.clone());
        let always_redact = lowercase_set(&config.always_redact);
        let never_redact = lowercase_set(&config.never_redact);

        debug!(
            "Sanitizer ready: regions {:?}, {} field categories, {} content patterns, strategy {}.",
            config.regions.iter().map(|r| r.code()).collect::<Vec<_>>(),
            field_matcher.categories().count(),
            content_matcher.len(),
            config.strategy
        );

        Ok(Self {
            config,
            registry,
            field_matcher,
            content_matcher,
            redactor,
            always_redact,
            never_redact,
        })
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn field_matcher(&self) -> &FieldNameMatcher {
        &self.field_matcher
    }

    pub fn content_matcher(&self) -> &ContentMatcher {
        &self.content_matcher
    }

    /// Sanitizes a single value held under `field_name`. An empty `field_name` means the
    /// value has no name (a sequence element); only content patterns apply then.
    ///
    /// Empty values are returned as-is without reaching the metrics collector. Under the
    /// `Remove` strategy a redacted value comes back as `""`.
    pub fn sanitize_field(&self, field_name: &str, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }

        let started = Instant::now();
        let original_value_length = value.chars().count();
        let value = truncate_chars(value, self.config.max_field_length);

        let pii_type = self.classify(field_name, value);
        let result = match pii_type {
            Some(pii_type) => {
                log_redaction_decision(field_name, value, pii_type, self.redactor.strategy());
                self.redactor.redact(value)
            }
            None => {
                log_passthrough(field_name);
                value.to_string()
            }
        };

        self.config.metrics.record(MetricsContext {
            field_name: field_name.to_string(),
            pii_type: pii_type.unwrap_or_default().to_string(),
            redacted: pii_type.is_some(),
            strategy: self.redactor.strategy(),
            duration: started.elapsed(),
            original_value_length,
        });

        result
    }

    /// Returns why `value` under `field_name` must be redacted, or `None` to keep it.
    fn classify(&self, field_name: &str, value: &str) -> Option<&str> {
        let has_overrides = !(self.never_redact.is_empty() && self.always_redact.is_empty());
        if !field_name.is_empty() && has_overrides {
            let lowered = field_name.to_lowercase();
            if self.never_redact.contains(&lowered) {
                return None;
            }
            if self.always_redact.contains(&lowered) {
                return Some(ALWAYS_REDACT_TYPE);
            }
        }

        if let Some(category) = self.field_matcher.match_type(field_name) {
            return Some(category);
        }

        let scanned = truncate_chars(value, self.config.max_content_length);
        self.content_matcher.match_type(scanned)
    }

    /// Sanitizes each entry independently. Entries removed by the `Remove` strategy are
    /// left out of the result.
    pub fn sanitize_fields(&self, fields: &HashMap<String, String>) -> HashMap<String, String> {
        fields
            .iter()
            .filter_map(|(name, value)| {
                let sanitized = self.sanitize_field(name, value);
                (!self.is_removed(value, &sanitized)).then(|| (name.clone(), sanitized))
            })
            .collect()
    }

    /// Recursively sanitizes a keyed structure.
    pub fn sanitize_map(&self, map: &Map<String, Value>) -> Map<String, Value> {
        self.map_at(map, 0)
    }

    pub fn sanitize_batch(&self, maps: &[Map<String, Value>]) -> Vec<Map<String, Value>> {
        maps.iter().map(|map| self.map_at(map, 0)).collect()
    }

    /// Sanitizes any JSON value. A bare string is treated as an unnamed value.
    pub fn sanitize_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.map_at(map, 0)),
            Value::Array(items) => Value::Array(self.seq_at(items, 0)),
            Value::String(s) => Value::String(self.sanitize_field("", s)),
            other => other.clone(),
        }
    }

    /// Parses `input` as JSON, sanitizes it and serializes the result.
    pub fn sanitize_json(&self, input: &[u8]) -> Result<Vec<u8>> {
        let value: Value = serde_json::from_slice(input)?;
        let sanitized = self.sanitize_value(&value);
        Ok(serde_json::to_vec(&sanitized)?)
    }

    /// Sanitizes a serializable record through its generic keyed form. Field
    /// annotations are not consulted.
    pub fn sanitize_struct<T: Serialize + ?Sized>(&self, record: &T) -> Result<Map<String, Value>> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(self.map_at(&map, 0)),
            other => Err(LogveilError::NotAKeyedRecord(value_kind(&other).to_string())),
        }
    }

    /// Sanitizes a typed record, honoring its `redact` / `preserve` annotations.
    pub fn sanitize_struct_with_tags(&self, record: &dyn RecordView) -> Map<String, Value> {
        self.record_at(record, 0)
    }

    fn is_removed(&self, original: &str, sanitized: &str) -> bool {
        self.redactor.strategy() == RedactionStrategy::Remove
            && sanitized.is_empty()
            && !original.is_empty()
    }

    fn map_at(&self, map: &Map<String, Value>, depth: usize) -> Map<String, Value> {
        if depth > self.config.max_depth {
            trace!(
                "Depth {} exceeds max_depth {}; map left unchanged.",
                depth,
                self.config.max_depth
            );
            return map.clone();
        }

        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    let sanitized = self.sanitize_field(key, s);
                    if self.is_removed(s, &sanitized) {
                        continue;
                    }
                    out.insert(key.clone(), Value::String(sanitized));
                }
                Value::Object(inner) => {
                    out.insert(key.clone(), Value::Object(self.map_at(inner, depth + 1)));
                }
                Value::Array(items) => {
                    out.insert(key.clone(), Value::Array(self.seq_at(items, depth + 1)));
                }
                other => {
                    out.insert(key.clone(), other.clone());
                }
            }
        }
        out
    }

    fn seq_at(&self, items: &[Value], depth: usize) -> Vec<Value> {
        if depth > self.config.max_depth {
            trace!(
                "Depth {} exceeds max_depth {}; sequence left unchanged.",
                depth,
                self.config.max_depth
            );
            return items.to_vec();
        }

        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Value::String(self.sanitize_field("", s)),
                Value::Object(inner) => Value::Object(self.map_at(inner, depth + 1)),
                Value::Array(inner) => Value::Array(self.seq_at(inner, depth + 1)),
                other => other.clone(),
            })
            .collect()
    }

    fn record_at(&self, record: &dyn RecordView, depth: usize) -> Map<String, Value> {
        if depth > self.config.max_depth {
            warn!(
                "Record '{}' at depth {} exceeds max_depth {}; emitting an empty map.",
                record.type_name(),
                depth,
                self.config.max_depth
            );
            return Map::new();
        }

        let mut out = Map::new();
        for field in record.fields() {
            let value = match field.tag.action {
                Some(FieldAction::Preserve) => Some(field.value.to_raw()),
                Some(FieldAction::Redact) => self.redact_annotated(field.name, &field.value),
                None => self.field_value_at(field.name, &field.value, depth),
            };
            if let Some(value) = value {
                out.insert(field.name.to_string(), value);
            }
        }
        out
    }

    /// A `redact`-annotated field. Strings go through the configured strategy, anything
    /// else becomes the sentinel. `None` drops the field.
    fn redact_annotated(&self, name: &str, value: &FieldValue<'_>) -> Option<Value> {
        match value {
            FieldValue::Str(s) if s.is_empty() => Some(Value::String(String::new())),
            FieldValue::Str(s) => {
                log_redaction_decision(name, s, "annotation", self.redactor.strategy());
                let redacted = self.redactor.redact(s);
                (!self.is_removed(s, &redacted)).then(|| Value::String(redacted))
            }
            _ => Some(Value::String(REDACTED_SENTINEL.to_string())),
        }
    }

    /// An unannotated record field: resolved like keyed data. `None` drops the field.
    fn field_value_at(&self, name: &str, value: &FieldValue<'_>, depth: usize) -> Option<Value> {
        match value {
            FieldValue::Null => Some(Value::Null),
            FieldValue::Str(s) => {
                let sanitized = self.sanitize_field(name, s);
                (!self.is_removed(s, &sanitized)).then(|| Value::String(sanitized))
            }
            FieldValue::Scalar(v) => Some(v.clone()),
            FieldValue::Json(Value::String(s)) => {
                let sanitized = self.sanitize_field(name, s);
                (!self.is_removed(s, &sanitized)).then(|| Value::String(sanitized))
            }
            FieldValue::Json(Value::Object(map)) => {
                Some(Value::Object(self.map_at(map, depth + 1)))
            }
            FieldValue::Json(Value::Array(items)) => {
                Some(Value::Array(self.seq_at(items, depth + 1)))
            }
            FieldValue::Json(other) => Some(other.clone()),
            FieldValue::Record(inner) => Some(Value::Object(self.record_at(*inner, depth + 1))),
            FieldValue::List(items) => Some(Value::Array(self.list_at(items, depth + 1))),
        }
    }

    fn list_at(&self, items: &[FieldValue<'_>], depth: usize) -> Vec<Value> {
        if depth > self.config.max_depth {
            trace!(
                "Depth {} exceeds max_depth {}; list emitted raw.",
                depth,
                self.config.max_depth
            );
            return items.iter().map(FieldValue::to_raw).collect();
        }

        items
            .iter()
            .map(|item| match item {
                FieldValue::Str(s) => Value::String(self.sanitize_field("", s)),
                FieldValue::Json(v) => self.element_at(v, depth),
                FieldValue::Record(inner) => Value::Object(self.record_at(*inner, depth + 1)),
                FieldValue::List(inner) => Value::Array(self.list_at(inner, depth + 1)),
                other => other.to_raw(),
            })
            .collect()
    }

    fn element_at(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::String(s) => Value::String(self.sanitize_field("", s)),
            Value::Object(map) => Value::Object(self.map_at(map, depth + 1)),
            Value::Array(items) => Value::Array(self.seq_at(items, depth + 1)),
            other => other.clone(),
        }
    }
}

fn lowercase_set(names: &[String]) -> HashSet<String> {
    names.iter().map(|n| n.to_lowercase()).collect()
}

/// The first `max` characters of `value`; the whole value when `max` is 0.
fn truncate_chars(value: &str, max: usize) -> &str {
    if max == 0 {
        return value;
    }
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
