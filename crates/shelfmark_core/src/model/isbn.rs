//! ISBN-10 / ISBN-13 checksum validation.
//!
//! # Responsibility
//! - Normalize raw ISBN input into its bare digit form.
//! - Verify the trailing check digit against the checksum rules.
//!
//! # Invariants
//! - Every function here is pure and total: no I/O, no panics, any input
//!   (including empty or non-ASCII text) yields a plain `bool` or `String`.
//! - `X` is only meaningful as the final character of an ISBN-10.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^0-9X]").expect("valid isbn filter regex"));

/// Strips everything except ASCII digits and the literal check character `X`.
///
/// Hyphens, spaces and prefixes like `ISBN:` all disappear; lowercase `x` is
/// dropped rather than upcased, matching the strict capital-X convention.
pub fn normalize_isbn(raw: &str) -> String {
    NON_ISBN_RE.replace_all(raw, "").into_owned()
}

/// Returns whether `raw` holds a checksum-valid ISBN-10 or ISBN-13.
///
/// The input is normalized first, so formatted forms such as
/// `978-0-306-40615-7` validate the same as their bare digit strings.
/// Any other normalized length is rejected outright.
pub fn is_valid_isbn(raw: &str) -> bool {
    let cleaned = normalize_isbn(raw);
    match cleaned.len() {
        10 => is_valid_isbn10(cleaned.as_bytes()),
        13 => is_valid_isbn13(cleaned.as_bytes()),
        _ => false,
    }
}

/// ISBN-10 rule: positions 0-8 are digits weighted 10 down to 2, the final
/// position is a digit or `X` (worth 10), and the total must divide by 11.
fn is_valid_isbn10(isbn: &[u8]) -> bool {
    let mut sum: u32 = 0;
    for (i, &ch) in isbn[..9].iter().enumerate() {
        if !ch.is_ascii_digit() {
            return false;
        }
        sum += (10 - i as u32) * u32::from(ch - b'0');
    }

    sum += match isbn[9] {
        b'X' => 10,
        ch if ch.is_ascii_digit() => u32::from(ch - b'0'),
        _ => return false,
    };

    sum % 11 == 0
}

/// ISBN-13 rule: the first 12 digits are weighted 1/3 alternating, and the
/// check digit must equal `(10 - sum % 10) % 10`.
fn is_valid_isbn13(isbn: &[u8]) -> bool {
    let mut sum: u32 = 0;
    for (i, &ch) in isbn[..12].iter().enumerate() {
        if !ch.is_ascii_digit() {
            return false;
        }
        let digit = u32::from(ch - b'0');
        sum += if i % 2 == 0 { digit } else { 3 * digit };
    }

    if !isbn[12].is_ascii_digit() {
        return false;
    }

    (10 - sum % 10) % 10 == u32::from(isbn[12] - b'0')
}
