//! registry - Built-in field-name lists and content patterns, per region.
//!
//! The registry is immutable data. It is built once (see [`PatternRegistry::shared`])
//! and handed to every `Sanitizer` by reference, so compiled regexes are shared rather
//! than rebuilt per instance.
//!
//! Ordering matters here: field categories and content patterns keep the order in
//! which they were declared, and that order is the tie-break used by the matchers.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::errors::LogveilError;

mod common;
mod hong_kong;
mod malaysia;
mod singapore;
mod south_korea;
mod thailand;
mod uae;

/// Names of the built-in field categories.
pub mod category {
    pub const SECRET: &str = "secret";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const ADDRESS: &str = "address";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const PASSPORT: &str = "passport";
    pub const BANK_ACCOUNT: &str = "bank_account";
    pub const PAYMENT_CARD: &str = "payment_card";
    pub const NATIONAL_ID: &str = "national_id";
}

/// A predicate run on each regex match before a content pattern is allowed to fire.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One detectable PII shape: a compiled regex plus an optional validator.
///
/// The pattern fires on a value only if the regex finds at least one match and either
/// there is no validator or at least one match satisfies it.
#[derive(Clone)]
pub struct ContentPattern {
    name: String,
    regex: Regex,
    validator: Option<Validator>,
}

impl ContentPattern {
    pub fn new(name: impl Into<String>, regex: Regex) -> Self {
        Self {
            name: name.into(),
            regex,
            validator: None,
        }
    }

    /// Attaches a validator that each regex match must pass.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Returns `true` if any regex match in `text` passes the validator.
    pub fn fires(&self, text: &str) -> bool {
        match &self.validator {
            None => self.regex.is_match(text),
            Some(validate) => self.regex.find_iter(text).any(|m| validate(m.as_str())),
        }
    }
}

impl fmt::Debug for ContentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentPattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Builds a built-in content pattern. The pattern strings are literals in this crate,
/// so a compile failure is a bug in the registry, not a runtime condition.
pub(crate) fn builtin(name: &str, pattern: &str) -> ContentPattern {
    let regex = Regex::new(pattern)
        .unwrap_or_else(|e| panic!("built-in pattern '{}' does not compile: {}", name, e));
    ContentPattern::new(name, regex)
}

/// A named group of field names (e.g. `email` -> `email`, `email_address`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCategory {
    pub name: String,
    pub field_names: Vec<String>,
}

impl FieldCategory {
    pub fn new<I, S>(name: &str, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            field_names: field_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A jurisdiction whose field names and content patterns can be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Singapore,
    Malaysia,
    Thailand,
    SouthKorea,
    HongKong,
    Uae,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Singapore,
        Region::Malaysia,
        Region::Thailand,
        Region::SouthKorea,
        Region::HongKong,
        Region::Uae,
    ];

    /// Short code used in configuration files and pattern names.
    pub fn code(self) -> &'static str {
        match self {
            Region::Singapore => "sg",
            Region::Malaysia => "my",
            Region::Thailand => "th",
            Region::SouthKorea => "kr",
            Region::HongKong => "hk",
            Region::Uae => "ae",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = LogveilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| LogveilError::UnknownRegion(s.to_string()))
    }
}

/// Field names and content patterns contributed by a single region.
#[derive(Debug, Clone)]
pub struct RegionalPatternSet {
    pub region: Region,
    pub field_categories: Vec<FieldCategory>,
    pub content_patterns: Vec<ContentPattern>,
}

impl RegionalPatternSet {
    /// All field names of this region, across categories.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_categories
            .iter()
            .flat_map(|c| c.field_names.iter().map(String::as_str))
    }
}

/// The complete, immutable catalogue: cross-region common patterns plus every region.
#[derive(Debug)]
pub struct PatternRegistry {
    common_fields: Vec<FieldCategory>,
    common_content: Vec<ContentPattern>,
    regions: BTreeMap<Region, RegionalPatternSet>,
}

lazy_static! {
    /// Process-wide registry, built on first use and never mutated.
    static ref SHARED_REGISTRY: Arc<PatternRegistry> = Arc::new(PatternRegistry::new());
}

impl PatternRegistry {
    /// Builds every regional pattern set. Prefer [`PatternRegistry::shared`] unless
    /// an isolated instance is needed.
    pub fn new() -> Self {
        let regions: BTreeMap<Region, RegionalPatternSet> = Region::ALL
            .into_iter()
            .map(|region| (region, build_region(region)))
            .collect();

        let registry = Self {
            common_fields: common::field_categories(),
            common_content: common::content_patterns(),
            regions,
        };
        debug!(
            "Pattern registry built: {} common categories, {} common content patterns, {} regions.",
            registry.common_fields.len(),
            registry.common_content.len(),
            registry.regions.len()
        );
        registry
    }

    /// Returns the shared registry instance.
    pub fn shared() -> Arc<PatternRegistry> {
        Arc::clone(&SHARED_REGISTRY)
    }

    pub fn region(&self, region: Region) -> Option<&RegionalPatternSet> {
        self.regions.get(&region)
    }

    pub fn common_field_categories(&self) -> &[FieldCategory] {
        &self.common_fields
    }

    pub fn common_content_patterns(&self) -> &[ContentPattern] {
        &self.common_content
    }

    /// Field categories for the given regions, merged by category name.
    ///
    /// Common categories come first (with `secret` leading), followed by regional
    /// categories in the order of `regions`. A category seen again keeps its first
    /// position and absorbs the new names.
    pub fn field_categories_for(&self, regions: &[Region]) -> Vec<FieldCategory> {
        let regional = regions
            .iter()
            .filter_map(|r| self.regions.get(r))
            .flat_map(|set| set.field_categories.iter());

        let mut merged: Vec<FieldCategory> = Vec::new();
        for category in self.common_fields.iter().chain(regional) {
            merge_category(&mut merged, category);
        }
        merged
    }

    /// Content patterns for the given regions: common patterns first, then each
    /// region's patterns in the order of `regions`.
    pub fn content_patterns_for(&self, regions: &[Region]) -> Vec<ContentPattern> {
        let regional = regions
            .iter()
            .filter_map(|r| self.regions.get(r))
            .flat_map(|set| set.content_patterns.iter());

        self.common_content.iter().chain(regional).cloned().collect()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends `category` to `merged`, or folds its names into an existing category of
/// the same name.
pub(crate) fn merge_category(merged: &mut Vec<FieldCategory>, category: &FieldCategory) {
    match merged.iter_mut().find(|c| c.name == category.name) {
        Some(existing) => {
            for name in &category.field_names {
                if !existing.field_names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                    existing.field_names.push(name.clone());
                }
            }
        }
        None => merged.push(category.clone()),
    }
}

fn build_region(region: Region) -> RegionalPatternSet {
    match region {
        Region::Singapore => singapore::pattern_set(),
        Region::Malaysia => malaysia::pattern_set(),
        Region::Thailand => thailand::pattern_set(),
        Region::SouthKorea => south_korea::pattern_set(),
        Region::HongKong => hong_kong::pattern_set(),
        Region::Uae => uae::pattern_set(),
    }
}
