//! Thailand: 13-digit national ID and +66 phone numbers.

use super::{builtin, category, FieldCategory, Region, RegionalPatternSet};
use crate::validators;

pub(super) fn pattern_set() -> RegionalPatternSet {
    RegionalPatternSet {
        region: Region::Thailand,
        field_categories: vec![
            FieldCategory::new(
                category::NATIONAL_ID,
                [
                    "thai_id", "thai_national_id", "citizen_id", "id_card", "id_card_number",
                    "national_id", "national_id_number",
                ],
            ),
            FieldCategory::new(category::PHONE, ["th_phone", "thai_phone"]),
        ],
        content_patterns: vec![
            builtin("th_national_id", r"\b\d[ -]?\d{4}[ -]?\d{5}[ -]?\d{2}[ -]?\d\b")
                .with_validator(validators::is_valid_thai_national_id),
            builtin("th_phone", r"\+66[ -]?[689]\d[ -]?\d{3}[ -]?\d{4}\b"),
        ],
    }
}
