//! loader.rs - YAML/JSON configuration documents.
//!
//! [`ConfigFile`] mirrors the on-disk representation. Every field is optional; anything
//! left out falls back to the [`SanitizerConfig`] default. Conversion rejects unknown
//! region codes, unknown strategy names, multi-character mask characters, negative
//! counts and uncompilable custom patterns, each with its own error, before a
//! `Sanitizer` is ever built.
//!
//! ```yaml
//! regions: [sg, my]
//! strategy: partial
//! never_redact: [request_id]
//! partial_masking:
//!   mask_char: "#"
//!   keep_left: 2
//!   keep_right: 4
//! max_depth: 8
//! custom_patterns:
//!   fields:
//!     employee: [employee_id, staff_no]
//!   content:
//!     - name: order_ref
//!       pattern: 'ORD-\d{6}'
//! ```
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::SanitizerConfig;
use crate::errors::{LogveilError, Result};
use crate::matchers::compile_content_pattern;
use crate::registry::Region;
use crate::strategy::{PartialMask, RedactionStrategy};

/// `partial_masking` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PartialMaskingFile {
    pub mask_char: Option<String>,
    pub keep_left: Option<i64>,
    pub keep_right: Option<i64>,
}

/// One entry of `custom_patterns.content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CustomContentPatternFile {
    pub name: String,
    pub pattern: String,
}

/// `custom_patterns` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CustomPatternsFile {
    pub fields: BTreeMap<String, Vec<String>>,
    pub content: Vec<CustomContentPatternFile>,
}

/// The configuration document as written by users.
///
/// Numeric limits are read as signed integers so that negative values can be reported
/// as configuration errors rather than as parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub regions: Option<Vec<String>>,
    pub strategy: Option<String>,
    pub always_redact: Vec<String>,
    pub never_redact: Vec<String>,
    pub partial_masking: Option<PartialMaskingFile>,
    pub hash_salt: Option<String>,
    pub max_depth: Option<i64>,
    pub max_field_length: Option<i64>,
    pub max_content_length: Option<i64>,
    pub custom_patterns: CustomPatternsFile,
}

impl ConfigFile {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yml::from_str(text).map_err(|e| LogveilError::ConfigParse(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| LogveilError::ConfigParse(e.to_string()))
    }

    /// Converts the document into a validated [`SanitizerConfig`].
    pub fn into_config(self) -> Result<SanitizerConfig> {
        let mut config = SanitizerConfig::default();

        if let Some(codes) = self.regions {
            let regions = codes
                .iter()
                .map(|code| code.parse::<Region>())
                .collect::<Result<Vec<_>>>()?;
            config = config.with_regions(regions);
        }

        if let Some(name) = self.strategy {
            config = config.with_strategy(name.parse::<RedactionStrategy>()?);
        }

        config = config
            .with_always_redact(self.always_redact)
            .with_never_redact(self.never_redact);

        if let Some(masking) = self.partial_masking {
            config.partial = partial_mask_from(masking, config.partial)?;
        }

        if let Some(salt) = self.hash_salt {
            config = config.with_hash_salt(salt);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(non_negative("max_depth", depth)?);
        }
        if let Some(len) = self.max_field_length {
            config = config.with_max_field_length(non_negative("max_field_length", len)?);
        }
        if let Some(len) = self.max_content_length {
            config = config.with_max_content_length(non_negative("max_content_length", len)?);
        }

        for (category, fields) in self.custom_patterns.fields {
            config = config.with_custom_fields(&category, fields);
        }
        for entry in self.custom_patterns.content {
            let pattern = compile_content_pattern(&entry.name, &entry.pattern)?;
            config = config.with_custom_content_pattern(pattern);
        }

        config.validate()?;
        Ok(config)
    }
}

fn partial_mask_from(file: PartialMaskingFile, defaults: PartialMask) -> Result<PartialMask> {
    let mut mask = defaults;

    if let Some(raw) = file.mask_char {
        let mut chars = raw.chars();
        mask.mask_char = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(LogveilError::InvalidMaskChar(raw)),
        };
    }
    if let Some(left) = file.keep_left {
        mask.keep_left = non_negative("partial_masking.keep_left", left)?;
    }
    if let Some(right) = file.keep_right {
        mask.keep_right = non_negative("partial_masking.keep_right", right)?;
    }
    Ok(mask)
}

fn non_negative(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        LogveilError::invalid_config(field, format!("must not be negative, got {}", value))
    })
}

impl SanitizerConfig {
    /// Parses and validates a YAML configuration document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        ConfigFile::from_yaml_str(text)?.into_config()
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        ConfigFile::from_json_str(text)?.into_config()
    }
}

/// Loads a configuration file. Files ending in `.json` are parsed as JSON, anything
/// else as YAML.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<SanitizerConfig> {
    let path = path.as_ref();
    info!("Loading sanitizer configuration from: {}", path.display());
    let text = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!("Parsing {} as {}.", path.display(), if is_json { "JSON" } else { "YAML" });

    let config = if is_json {
        SanitizerConfig::from_json_str(&text)?
    } else {
        SanitizerConfig::from_yaml_str(&text)?
    };

    info!(
        "Loaded configuration from {}: regions {:?}, strategy {}.",
        path.display(),
        config.regions.iter().map(|r| r.code()).collect::<Vec<_>>(),
        config.strategy
    );
    Ok(config)
}
