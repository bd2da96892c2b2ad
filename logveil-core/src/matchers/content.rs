//! Content matcher: an ordered list of content patterns evaluated against a value.

use crate::registry::ContentPattern;

/// Classifies values by patterns found inside them.
///
/// Patterns are evaluated in list order; [`ContentMatcher::match_type`] reports the
/// first one that fires. A pattern whose validator rejects every regex match does not
/// fire.
#[derive(Debug, Clone, Default)]
pub struct ContentMatcher {
    patterns: Vec<ContentPattern>,
}

impl ContentMatcher {
    pub fn new(patterns: Vec<ContentPattern>) -> Self {
        Self { patterns }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.match_type(text).is_some()
    }

    pub fn match_type(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find(|p| p.fires(text))
            .map(ContentPattern::name)
    }

    pub fn pattern_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(ContentPattern::name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
