// File: logveil-core/src/validators.rs
//! Programmatic validation functions for specific sensitive data types.
//!
//! Content regexes are deliberately permissive so they survive dashes, spaces and
//! other formatting noise. The functions in this module run on each regex match and
//! reject candidates whose check digits (or embedded dates) are numerically invalid,
//! which keeps order numbers, timestamps and other incidental digit runs out of the
//! redaction path.
//!
//! Every validator is pure and total: malformed input yields `false`, never a panic.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::collections::HashSet;
use once_cell::sync::Lazy;

/// Days per month used by the date-embedded ID check. February allows 29 regardless
/// of the year.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Weights applied to the first twelve digits of a Korean resident registration number.
const KOREAN_RRN_WEIGHTS: [u32; 12] = [2, 3, 4, 5, 6, 7, 8, 9, 2, 3, 4, 5];

/// Weights applied to the seven digits of a Singapore NRIC/FIN.
const NRIC_WEIGHTS: [u32; 7] = [2, 7, 6, 5, 4, 3, 2];
const NRIC_CITIZEN_TABLE: &[u8; 11] = b"JZIHGFEDCBA";
const NRIC_FOREIGNER_TABLE: &[u8; 11] = b"XWUTRQPNMLK";

// Prefixes issued from 2000 onwards carry a +4 offset in the weighted sum.
static NRIC_OFFSET_PREFIXES: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(['T', 'G']);
    set
});

static NRIC_CITIZEN_PREFIXES: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(['S', 'T']);
    set
});

/// Strips the separators that national IDs are commonly written with (`-` and
/// spaces) and returns the remaining digits. Any other non-digit character rejects
/// the input.
fn digits_without_separators(value: &str) -> Option<Vec<u32>> {
    value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_digit(10))
        .collect()
}

/// The `(11 - (sum mod 11)) mod 10` check digit shared by the mod-11 schemes.
fn mod11_check_digit(weighted_sum: u32) -> u32 {
    (11 - weighted_sum % 11) % 10
}

/// Validates a Thai national ID (13 digits, check digit at position 13).
///
/// The first twelve digits are weighted 13 down to 2; the check digit is
/// `(11 - (sum mod 11)) mod 10`.
///
/// # Arguments
///
/// * `id` - The ID string slice. Dashes and spaces are ignored, e.g. `"1-2345-67890-12-1"`.
///
/// # Returns
///
/// `true` if the input has exactly 13 digits and the check digit matches.
pub fn is_valid_thai_national_id(id: &str) -> bool {
    let Some(digits) = digits_without_separators(id) else { return false; };
    if digits.len() != 13 {
        return false;
    }

    let sum: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (13 - i as u32))
        .sum();

    mod11_check_digit(sum) == digits[12]
}

/// Validates a Malaysian MyKad number (`YYMMDD-PB-###G`).
///
/// MyKad carries no check digit; instead the embedded month (offset 2) and day
/// (offset 4) must describe a real calendar day. Leap years are not considered:
/// February always accepts day 29.
pub fn is_valid_mykad(id: &str) -> bool {
    let Some(digits) = digits_without_separators(id) else { return false; };
    if digits.len() != 12 {
        return false;
    }

    let month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];
    if !(1..=12).contains(&month) {
        return false;
    }

    (1..=DAYS_IN_MONTH[month as usize - 1]).contains(&day)
}

/// Validates a South Korean resident registration number (`YYMMDD-GNNNNNC`).
///
/// The digit at offset 6 encodes gender and century and must be in `1..=4`. The first
/// twelve digits are weighted by `2,3,4,5,6,7,8,9,2,3,4,5` and the thirteenth digit
/// must equal `(11 - (sum mod 11)) mod 10`.
pub fn is_valid_korean_rrn(id: &str) -> bool {
    let Some(digits) = digits_without_separators(id) else { return false; };
    if digits.len() != 13 {
        return false;
    }
    if !(1..=4).contains(&digits[6]) {
        return false;
    }

    let sum: u32 = digits[..12]
        .iter()
        .zip(KOREAN_RRN_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();

    mod11_check_digit(sum) == digits[12]
}

/// Validates a Singapore NRIC or FIN (`S1234567D`).
///
/// # Arguments
///
/// * `nric` - Nine characters: a prefix letter (`S`, `T`, `F` or `G`), seven digits and a
///   check letter. Lowercase input is accepted.
///
/// # Returns
///
/// `true` if the check letter matches the weighted sum of the digits, looked up in the
/// citizen table (`S`/`T`) or the foreigner table (`F`/`G`).
pub fn is_valid_nric(nric: &str) -> bool {
    let normalized: Cow<str> = if nric.chars().any(|c| c.is_ascii_lowercase()) {
        Cow::Owned(nric.to_ascii_uppercase())
    } else {
        Cow::Borrowed(nric)
    };

    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() != 9 {
        return false;
    }

    let prefix = chars[0];
    if !matches!(prefix, 'S' | 'T' | 'F' | 'G') {
        return false;
    }

    let mut sum = 0;
    for (c, weight) in chars[1..8].iter().zip(NRIC_WEIGHTS.iter()) {
        let Some(digit) = c.to_digit(10) else { return false; };
        sum += digit * weight;
    }
    if NRIC_OFFSET_PREFIXES.contains(&prefix) {
        sum += 4;
    }

    let table = if NRIC_CITIZEN_PREFIXES.contains(&prefix) {
        NRIC_CITIZEN_TABLE
    } else {
        NRIC_FOREIGNER_TABLE
    };

    char::from(table[(sum % 11) as usize]) == chars[8]
}

/// Validates a Hong Kong identity card number such as `A123456(3)` or `AB987654(3)`.
///
/// Letters are valued `A=10 .. Z=35`; a single-letter prefix is padded with a leading
/// space valued 36. The eight values are weighted 9 down to 2 and the check character is
/// `11 - (sum mod 11)`, written `A` for 10 and `0` for 11.
pub fn is_valid_hkid(hkid: &str) -> bool {
    let normalized: String = hkid
        .chars()
        .filter(|c| !matches!(c, '(' | ')') && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let len = normalized.len();
    if !(8..=9).contains(&len) || !normalized.is_ascii() {
        return false;
    }

    let (body, check) = normalized.split_at(len - 1);
    let (letters, digits) = body.split_at(body.len() - 6);
    if !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return false;
    }

    let mut values: Vec<u32> = Vec::with_capacity(8);
    if letters.len() == 1 {
        values.push(36);
    }
    values.extend(letters.chars().map(|c| c as u32 - 'A' as u32 + 10));
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else { return false; };
        values.push(digit);
    }

    let sum: u32 = values
        .iter()
        .zip((2..=9).rev())
        .map(|(v, w)| v * w)
        .sum();

    let expected = match (11 - sum % 11) % 11 {
        10 => 'A',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };

    check.starts_with(expected)
}

/// Validates a UAE Emirates ID (`784-YYYY-NNNNNNN-C`): 15 digits, the `784` country
/// prefix and a Luhn check digit.
pub fn is_valid_emirates_id(id: &str) -> bool {
    let Some(digits) = digits_without_separators(id) else { return false; };
    if digits.len() != 15 || digits[..3] != [7, 8, 4] {
        return false;
    }
    let as_string: String = digits.iter().filter_map(|d| char::from_digit(*d, 10)).collect();
    is_valid_luhn(&as_string)
}

/// Validates an IBAN using the ISO 13616 mod-97 check.
///
/// The four leading characters are moved to the end, letters are expanded to
/// `A=10 .. Z=35`, and the resulting number must leave a remainder of 1 modulo 97.
/// The remainder is computed incrementally so arbitrarily long inputs never overflow.
pub fn is_valid_iban(iban: &str) -> bool {
    let compact: String = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !(15..=34).contains(&compact.len()) || !compact.is_ascii() {
        return false;
    }

    let (head, tail) = compact.split_at(4);
    if !head[..2].chars().all(|c| c.is_ascii_uppercase())
        || !head[2..].chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let Some(value) = c.to_digit(36) else { return false; };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    remainder == 1
}

/// Validates a number using the Luhn algorithm.
///
/// The Luhn algorithm, also known as the Mod 10 algorithm, is a simple checksum
/// formula used to validate a variety of identification numbers, such as
/// credit card numbers.
///
/// # Arguments
///
/// * `num_str` - A string slice containing only digits.
///
/// # Returns
///
/// `true` if the number is valid according to the Luhn algorithm, `false` otherwise.
pub fn is_valid_luhn(num_str: &str) -> bool {
    let mut sum = 0;
    let mut alternate = false;

    for c in num_str.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else { return false; };

        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// Validates payment card numbers.
///
/// All non-digit characters are stripped first; the remaining digit count must be
/// between 13 and 19 before the Luhn checksum is applied.
pub fn is_valid_credit_card(cc_number: &str) -> bool {
    let digits: String = cc_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    is_valid_luhn(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thai_national_id_regression_pair() {
        assert!(is_valid_thai_national_id("1-2345-67890-12-1"));
        assert!(!is_valid_thai_national_id("1-2345-67890-12-3"));
        assert!(is_valid_thai_national_id("3100501234563"));
    }

    #[test]
    fn thai_national_id_rejects_wrong_length_and_letters() {
        assert!(!is_valid_thai_national_id("1-2345-67890-12"));
        assert!(!is_valid_thai_national_id("1-2345-67890-12-11"));
        assert!(!is_valid_thai_national_id("1-2345-6789X-12-1"));
        assert!(!is_valid_thai_national_id(""));
    }

    #[test]
    fn mykad_checks_embedded_month_and_day() {
        assert!(is_valid_mykad("900101-14-5678"));
        assert!(is_valid_mykad("000229-10-1234"));
        assert!(is_valid_mykad("851231145678"));
        assert!(!is_valid_mykad("901301-14-5678"));
        assert!(!is_valid_mykad("900001-14-5678"));
        assert!(!is_valid_mykad("900230-14-5678"));
        assert!(!is_valid_mykad("900431-14-5678"));
        assert!(!is_valid_mykad("900100-14-5678"));
    }

    #[test]
    fn mykad_rejects_wrong_length() {
        assert!(!is_valid_mykad("900101-14-567"));
        assert!(!is_valid_mykad("900101-14-56789"));
    }

    #[test]
    fn korean_rrn_checks_gender_digit_and_checksum() {
        assert!(is_valid_korean_rrn("900101-1234568"));
        assert!(is_valid_korean_rrn("850315-2345678"));
        assert!(!is_valid_korean_rrn("900101-1234567"));
        assert!(!is_valid_korean_rrn("900101-5234568"));
        assert!(!is_valid_korean_rrn("900101-0234568"));
        assert!(!is_valid_korean_rrn("900101-123456"));
    }

    #[test]
    fn nric_uses_prefix_offset_and_tables() {
        assert!(is_valid_nric("S1234567D"));
        assert!(is_valid_nric("T1234567J"));
        assert!(is_valid_nric("F1234567N"));
        assert!(is_valid_nric("G1234567X"));
        assert!(is_valid_nric("s1234567d"));
        assert!(!is_valid_nric("S1234567A"));
        assert!(!is_valid_nric("X1234567D"));
        assert!(!is_valid_nric("S123456D"));
        assert!(!is_valid_nric("S12345X7D"));
    }

    #[test]
    fn hkid_single_and_double_letter_prefixes() {
        assert!(is_valid_hkid("A123456(3)"));
        assert!(is_valid_hkid("A1234563"));
        assert!(is_valid_hkid("G123456(A)"));
        assert!(is_valid_hkid("AB987654(3)"));
        assert!(!is_valid_hkid("A123456(4)"));
        assert!(!is_valid_hkid("1123456(3)"));
        assert!(!is_valid_hkid("A12345(3)"));
    }

    #[test]
    fn emirates_id_requires_prefix_and_luhn() {
        assert!(is_valid_emirates_id("784-1990-1234567-6"));
        assert!(!is_valid_emirates_id("784-1990-1234567-5"));
        assert!(!is_valid_emirates_id("785-1990-1234567-6"));
    }

    #[test]
    fn iban_mod97() {
        assert!(is_valid_iban("AE070331234567890123456"));
        assert!(is_valid_iban("AE07 0331 2345 6789 0123 456"));
        assert!(!is_valid_iban("AE080331234567890123456"));
        assert!(!is_valid_iban("0E070331234567890123456"));
    }

    #[test]
    fn luhn_and_credit_card() {
        assert!(is_valid_luhn("4111111111111111"));
        assert!(!is_valid_luhn("4111111111111112"));
        assert!(is_valid_credit_card("4111 1111 1111 1111"));
        assert!(is_valid_credit_card("5500-0000-0000-0004"));
        assert!(!is_valid_credit_card("4111 1111 1111 1112"));
        // Luhn-valid but too short to be a card.
        assert!(!is_valid_credit_card("4111-1111"));
        assert!(!is_valid_credit_card(""));
    }
}
