//! Malaysia: MyKad numbers (`YYMMDD-PB-###G`) and +60 mobile numbers.
//!
//! No bank-account content pattern: Malaysian account numbers are plain digit runs of
//! varying length and would collide with order numbers and timestamps.

use super::{builtin, category, FieldCategory, Region, RegionalPatternSet};
use crate::validators;

pub(super) fn pattern_set() -> RegionalPatternSet {
    RegionalPatternSet {
        region: Region::Malaysia,
        field_categories: vec![
            FieldCategory::new(
                category::NATIONAL_ID,
                [
                    "mykad", "mykad_no", "mykad_number", "ic", "ic_no", "ic_number", "nric",
                    "nric_no", "identity_card", "national_id",
                ],
            ),
            FieldCategory::new(category::PHONE, ["my_phone", "malaysia_phone"]),
        ],
        content_patterns: vec![
            builtin("my_national_id", r"\b\d{6}-?\d{2}-?\d{4}\b")
                .with_validator(validators::is_valid_mykad),
            builtin("my_phone", r"\+60[ -]?1\d[ -]?\d{3,4}[ -]?\d{4}\b"),
        ],
    }
}
