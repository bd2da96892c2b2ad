//! Hong Kong: HKID card numbers and +852 phone numbers.

use super::{builtin, category, FieldCategory, Region, RegionalPatternSet};
use crate::validators;

pub(super) fn pattern_set() -> RegionalPatternSet {
    RegionalPatternSet {
        region: Region::HongKong,
        field_categories: vec![
            FieldCategory::new(
                category::NATIONAL_ID,
                ["hkid", "hkid_no", "hkid_number", "hk_id", "hong_kong_id", "national_id"],
            ),
            FieldCategory::new(category::PHONE, ["hk_phone", "hong_kong_phone"]),
        ],
        content_patterns: vec![
            builtin("hk_national_id", r"(?i)\b[A-Z]{1,2}\d{6}(?:\([0-9A]\)|[0-9A]\b)")
                .with_validator(validators::is_valid_hkid),
            builtin("hk_phone", r"\+852[ -]?[2-9]\d{3}[ -]?\d{4}\b"),
        ],
    }
}
