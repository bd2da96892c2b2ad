//! United Arab Emirates: Emirates ID, +971 mobile numbers and IBANs.
//!
//! UAE account numbers are published as IBANs with a fixed `AE` + 21 digit shape and a
//! mod-97 check, which makes this the one region with a bank-account content pattern.

use super::{builtin, category, FieldCategory, Region, RegionalPatternSet};
use crate::validators;

pub(super) fn pattern_set() -> RegionalPatternSet {
    RegionalPatternSet {
        region: Region::Uae,
        field_categories: vec![
            FieldCategory::new(
                category::NATIONAL_ID,
                ["emirates_id", "emirates_id_number", "eid", "uae_id", "national_id"],
            ),
            FieldCategory::new(category::PHONE, ["ae_phone", "uae_phone"]),
            FieldCategory::new(category::BANK_ACCOUNT, ["uae_iban"]),
        ],
        content_patterns: vec![
            builtin("ae_national_id", r"\b784-?\d{4}-?\d{7}-?\d\b")
                .with_validator(validators::is_valid_emirates_id),
            builtin("ae_phone", r"\+971[ -]?5\d[ -]?\d{3}[ -]?\d{4}\b"),
            builtin("ae_iban", r"\bAE\d{2} ?(?:\d{4} ?){4}\d{3}\b")
                .with_validator(validators::is_valid_iban),
        ],
    }
}
