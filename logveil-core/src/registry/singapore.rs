//! Singapore: NRIC/FIN numbers and +65 phone numbers.
//!
//! Bank account numbers have no stable national format, so there is no bank-account
//! content pattern; those fields are caught by name only.

use super::{builtin, category, FieldCategory, Region, RegionalPatternSet};
use crate::validators;

pub(super) fn pattern_set() -> RegionalPatternSet {
    RegionalPatternSet {
        region: Region::Singapore,
        field_categories: vec![
            FieldCategory::new(
                category::NATIONAL_ID,
                [
                    "nric", "nric_no", "nric_number", "fin", "fin_no", "fin_number", "nric_fin",
                    "singpass_id", "national_id",
                ],
            ),
            FieldCategory::new(category::PHONE, ["sg_phone", "singapore_phone"]),
        ],
        content_patterns: vec![
            builtin("sg_national_id", r"(?i)\b[STFG]\d{7}[A-Z]\b")
                .with_validator(validators::is_valid_nric),
            builtin("sg_phone", r"\+65[ -]?[689]\d{3}[ -]?\d{4}\b"),
        ],
    }
}
