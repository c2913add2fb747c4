//! Punctuation trimming and numeric filtering of raw tokens

use unicode_general_category::{get_general_category, GeneralCategory};

/// Normalize a raw token into a countable word
///
/// Trims whitespace, strips leading and trailing punctuation and drops
/// tokens that are empty or purely numeric. Case is preserved and interior
/// punctuation (contractions, hyphenated words) is kept.
pub fn normalize(raw: &str) -> Option<&str> {
    let word = raw
        .trim()
        .trim_start_matches(is_punctuation)
        .trim_end_matches(is_punctuation);

    if word.is_empty() || is_numeric_literal(word) {
        return None;
    }

    Some(word)
}

/// Whether a character is in one of the Unicode punctuation categories (`P*`)
///
/// Symbols such as `$`, `+` or `|` are not punctuation.
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Whether text parses fully as an invariant-culture number
///
/// Accepts an optional sign, an integer part with optional `,` group
/// separators, an optional fraction and an optional exponent. At least one
/// mantissa digit is required.
pub fn is_numeric_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let mut mantissa_digits = 0;
    // group separators may only follow a digit
    while pos < bytes.len() {
        match bytes[pos] {
            b'0'..=b'9' => mantissa_digits += 1,
            b',' if mantissa_digits > 0 => {}
            _ => break,
        }
        pos += 1;
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            mantissa_digits += 1;
            pos += 1;
        }
    }

    if mantissa_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exponent_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exponent_start {
            return false;
        }
    }

    pos == bytes.len()
}
