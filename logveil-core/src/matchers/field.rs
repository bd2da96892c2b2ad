//! Field-name matcher.
//!
//! Each category compiles into one case-insensitive, whole-string alternation. The
//! `secret` category is held apart and always consulted first; the remaining
//! categories are tried in the order they were given, and the first hit wins.

use log::debug;
use regex::{Regex, RegexBuilder};

use super::REGEX_SIZE_LIMIT;
use crate::errors::{LogveilError, Result};
use crate::registry::{category, FieldCategory};

#[derive(Debug)]
struct CompiledCategory {
    name: String,
    regex: Regex,
}

impl CompiledCategory {
    fn compile(category: &FieldCategory) -> Result<Option<Self>> {
        let alternatives: Vec<String> = category
            .field_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(None);
        }

        let pattern = format!("^(?:{})$", alternatives.join("|"));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|source| LogveilError::PatternCompilation {
                name: category.name.clone(),
                source,
            })?;

        Ok(Some(Self {
            name: category.name.clone(),
            regex,
        }))
    }
}

/// Classifies values by the name of the field holding them.
#[derive(Debug)]
pub struct FieldNameMatcher {
    secret: Option<CompiledCategory>,
    categories: Vec<CompiledCategory>,
}

impl FieldNameMatcher {
    /// Compiles one matcher per category. Categories without any names are skipped.
    pub fn compile(categories: &[FieldCategory]) -> Result<Self> {
        let mut secret = None;
        let mut compiled = Vec::with_capacity(categories.len());

        for category in categories {
            let Some(matcher) = CompiledCategory::compile(category)? else {
                debug!("Field category '{}' has no names; skipping.", category.name);
                continue;
            };
            if matcher.name == category::SECRET {
                secret = Some(matcher);
            } else {
                compiled.push(matcher);
            }
        }

        debug!(
            "Field name matcher compiled: {} categories (secret: {}).",
            compiled.len(),
            secret.is_some()
        );
        Ok(Self {
            secret,
            categories: compiled,
        })
    }

    pub fn matches(&self, field_name: &str) -> bool {
        self.match_type(field_name).is_some()
    }

    /// Returns the category of `field_name`, `secret` taking precedence.
    pub fn match_type(&self, field_name: &str) -> Option<&str> {
        if field_name.is_empty() {
            return None;
        }
        self.secret
            .iter()
            .chain(self.categories.iter())
            .find(|c| c.regex.is_match(field_name))
            .map(|c| c.name.as_str())
    }

    /// Category names in evaluation order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.secret
            .iter()
            .chain(self.categories.iter())
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> FieldNameMatcher {
        FieldNameMatcher::compile(&[
            FieldCategory::new("email", ["email", "email_address"]),
            FieldCategory::new("contact", ["email", "phone"]),
            FieldCategory::new(category::SECRET, ["password", "token"]),
            FieldCategory::new("empty", Vec::<String>::new()),
        ])
        .unwrap()
    }

    #[test]
    fn matches_whole_names_case_insensitively() {
        let m = matcher();
        assert!(m.matches("EMAIL"));
        assert!(m.matches("Email_Address"));
        assert!(!m.matches("customer_email"));
        assert!(!m.matches("emails"));
        assert!(!m.matches(""));
    }

    #[test]
    fn secret_wins_and_order_breaks_ties() {
        let m = matcher();
        assert_eq!(m.match_type("Password"), Some(category::SECRET));
        assert_eq!(m.match_type("email"), Some("email"));
        assert_eq!(m.match_type("phone"), Some("contact"));
        assert_eq!(m.match_type("order_id"), None);
    }

    #[test]
    fn names_are_matched_literally() {
        let m = FieldNameMatcher::compile(&[FieldCategory::new("odd", ["a.b", "x+"])]).unwrap();
        assert!(m.matches("a.b"));
        assert!(!m.matches("axb"));
        assert!(m.matches("X+"));
        assert!(!m.matches("xx"));
    }

    #[test]
    fn empty_categories_are_skipped() {
        let matcher = matcher();
        let names: Vec<&str> = matcher.categories().collect();
        assert_eq!(names, vec![category::SECRET, "email", "contact"]);
    }
}
