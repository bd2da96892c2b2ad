// logveil-core/src/strategy.rs
//! Redaction strategies applied to values already classified as sensitive.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::errors::LogveilError;

/// Replacement emitted by the `Full` strategy, and for non-string values that must be
/// redacted regardless of strategy.
pub const REDACTED_SENTINEL: &str = "[REDACTED]";

/// Tag prepended to hashed values.
pub const HASH_PREFIX: &str = "sha256:";

/// Number of hex characters of the digest kept in hashed output.
const HASH_HEX_LEN: usize = 16;

/// How a sensitive value is transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RedactionStrategy {
    /// Replace the value with [`REDACTED_SENTINEL`].
    #[default]
    Full,
    /// Keep a few leading/trailing characters and mask the rest.
    Partial,
    /// Replace the value with a salted, truncated SHA-256 digest.
    Hash,
    /// Drop the value. Keyed containers omit the key entirely.
    Remove,
}

impl RedactionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            RedactionStrategy::Full => "full",
            RedactionStrategy::Partial => "partial",
            RedactionStrategy::Hash => "hash",
            RedactionStrategy::Remove => "remove",
        }
    }
}

impl fmt::Display for RedactionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedactionStrategy {
    type Err = LogveilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(RedactionStrategy::Full),
            "partial" => Ok(RedactionStrategy::Partial),
            "hash" => Ok(RedactionStrategy::Hash),
            "remove" => Ok(RedactionStrategy::Remove),
            _ => Err(LogveilError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Parameters of the `Partial` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialMask {
    pub mask_char: char,
    pub keep_left: usize,
    pub keep_right: usize,
}

impl Default for PartialMask {
    fn default() -> Self {
        Self {
            mask_char: '*',
            keep_left: 0,
            keep_right: 4,
        }
    }
}

impl PartialMask {
    /// Masks the middle of `value`, counting in Unicode scalar values.
    ///
    /// Values no longer than `keep_left + keep_right` are masked completely, so the
    /// original is never returned as-is.
    pub fn apply_to(&self, value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        let total = chars.len();

        if total <= self.keep_left.saturating_add(self.keep_right) {
            return std::iter::repeat(self.mask_char).take(total).collect();
        }

        let mut out = String::with_capacity(value.len());
        out.extend(&chars[..self.keep_left]);
        let masked = total - self.keep_left - self.keep_right;
        out.extend(std::iter::repeat(self.mask_char).take(masked));
        out.extend(&chars[total - self.keep_right..]);
        out
    }
}

/// Applies the configured strategy to sensitive strings. Stateless beyond its
/// configuration, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    strategy: RedactionStrategy,
    partial: PartialMask,
    salt: String,
}

impl Redactor {
    pub fn new(strategy: RedactionStrategy, partial: PartialMask, salt: impl Into<String>) -> Self {
        Self {
            strategy,
            partial,
            salt: salt.into(),
        }
    }

    pub fn strategy(&self) -> RedactionStrategy {
        self.strategy
    }

    pub fn redact(&self, value: &str) -> String {
        match self.strategy {
            RedactionStrategy::Full => REDACTED_SENTINEL.to_string(),
            RedactionStrategy::Partial => self.partial.apply_to(value),
            RedactionStrategy::Hash => self.hash(value),
            RedactionStrategy::Remove => String::new(),
        }
    }

    /// `sha256:` followed by the first 16 hex characters of `SHA-256(salt || value)`.
    /// Deterministic for a given salt, so hashed values can still be correlated.
    fn hash(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(value.as_bytes());
        let digest = hex::encode(hasher.finalize());
        format!("{}{}", HASH_PREFIX, &digest[..HASH_HEX_LEN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(keep_left: usize, keep_right: usize) -> Redactor {
        Redactor::new(
            RedactionStrategy::Partial,
            PartialMask { mask_char: '#', keep_left, keep_right },
            "",
        )
    }

    #[test]
    fn full_discards_the_value() {
        let r = Redactor::default();
        assert_eq!(r.redact("S1234567D"), REDACTED_SENTINEL);
    }

    #[test]
    fn partial_keeps_edges_and_masks_middle() {
        let value = "4111111111111111";
        let out = partial(2, 4).redact(value);
        assert_eq!(out.chars().count(), value.chars().count());
        assert_eq!(&out[..2], "41");
        assert_eq!(&out[out.len() - 4..], "1111");
        assert!(out[2..out.len() - 4].chars().all(|c| c == '#'));
    }

    #[test]
    fn partial_masks_short_values_completely() {
        assert_eq!(partial(2, 4).redact("abcdef"), "######");
        assert_eq!(partial(2, 4).redact("abc"), "###");
        assert_eq!(partial(0, 0).redact("abc"), "###");
    }

    #[test]
    fn partial_counts_characters_not_bytes() {
        assert_eq!(partial(1, 1).redact("héllo"), "h###o");
    }

    #[test]
    fn hash_is_deterministic_and_salted() {
        let a = Redactor::new(RedactionStrategy::Hash, PartialMask::default(), "salt-a");
        let b = Redactor::new(RedactionStrategy::Hash, PartialMask::default(), "salt-b");

        let first = a.redact("user@example.com");
        assert_eq!(first, a.redact("user@example.com"));
        assert_ne!(first, b.redact("user@example.com"));
        assert_ne!(first, a.redact("other@example.com"));
        assert!(first.starts_with(HASH_PREFIX));
        assert_eq!(first.len(), HASH_PREFIX.len() + 16);
    }

    #[test]
    fn hash_with_empty_salt_is_plain_sha256() {
        let r = Redactor::new(RedactionStrategy::Hash, PartialMask::default(), "");
        // SHA-256("abc") = ba7816bf8f01cfea...
        assert_eq!(r.redact("abc"), "sha256:ba7816bf8f01cfea");
    }

    #[test]
    fn remove_returns_empty() {
        let r = Redactor::new(RedactionStrategy::Remove, PartialMask::default(), "");
        assert_eq!(r.redact("secret"), "");
    }

    #[test]
    fn strategy_names_parse_case_insensitively() {
        assert_eq!("FULL".parse::<RedactionStrategy>().unwrap(), RedactionStrategy::Full);
        assert_eq!(" Partial ".parse::<RedactionStrategy>().unwrap(), RedactionStrategy::Partial);
        assert_eq!("hash".parse::<RedactionStrategy>().unwrap(), RedactionStrategy::Hash);
        assert_eq!("Remove".parse::<RedactionStrategy>().unwrap(), RedactionStrategy::Remove);
        assert!(matches!(
            "shred".parse::<RedactionStrategy>(),
            Err(LogveilError::UnknownStrategy(_))
        ));
    }
}
