//! South Korea: resident registration numbers and mobile numbers.

use super::{builtin, category, FieldCategory, Region, RegionalPatternSet};
use crate::validators;

pub(super) fn pattern_set() -> RegionalPatternSet {
    RegionalPatternSet {
        region: Region::SouthKorea,
        field_categories: vec![
            FieldCategory::new(
                category::NATIONAL_ID,
                [
                    "rrn", "resident_registration_number", "resident_number", "jumin",
                    "jumin_number", "national_id",
                ],
            ),
            FieldCategory::new(category::PHONE, ["kr_phone", "korea_phone"]),
        ],
        content_patterns: vec![
            builtin("kr_national_id", r"\b\d{6}-?[1-4]\d{6}\b")
                .with_validator(validators::is_valid_korean_rrn),
            builtin("kr_phone", r"(?:\+82[ -]?|\b0)10[ -]?\d{4}[ -]?\d{4}\b"),
        ],
    }
}
