//! Character classes and token helpers shared by the normalizer and the
//! quality checks.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// =============================================================================
// CHARACTER CLASSES
// =============================================================================

/// Control and format characters removed by the normalizer.
/// Tab, newline and carriage return are kept for whitespace normalization.
pub(crate) static INVISIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[[\p{Cc}\p{Cf}\x{FEFF}\x{200B}-\x{200D}\x{2060}]--[\t\n\r]]").unwrap()
});

static CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Cyrillic}").unwrap());
static LATIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Latin}").unwrap());
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Nd}").unwrap());

/// Quote characters, removed outright.
pub(crate) const QUOTES: &[char] = &[
    '"', '\'', '«', '»', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '‹', '›',
];

/// Punctuation replaced by a single space.
pub(crate) const PUNCT_TO_SPACE: &[char] = &[',', '.', ';', '/', '\\'];

/// Unicode dash/hyphen/minus variants mapped to `-`.
pub(crate) const DASHES: &[char] = &[
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2212}', // minus sign
];

/// Apostrophes seen in transliterated surnames (О'Нил, д’Артаньян).
pub(crate) const APOSTROPHES: &[char] = &['\'', '\u{2019}', '\u{02BC}'];

/// Whether `c` has no distinct lowercase form (lowercase or caseless letters).
pub(crate) fn is_lower_alpha(c: char) -> bool {
    c.is_alphabetic() && c.to_lowercase().eq(std::iter::once(c))
}

/// Whether `c` has no distinct uppercase form (uppercase or caseless letters).
pub(crate) fn is_upper_alpha(c: char) -> bool {
    c.is_alphabetic() && c.to_uppercase().eq(std::iter::once(c))
}

pub(crate) fn has_cyrillic(s: &str) -> bool {
    CYRILLIC.is_match(s)
}

/// Any letter of the Latin script, including accented forms.
pub(crate) fn has_latin_script(s: &str) -> bool {
    LATIN.is_match(s)
}

pub(crate) fn has_ascii_latin(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphabetic())
}

/// Any decimal digit of any script; fractions and numerals like `Ⅻ` are not digits.
pub(crate) fn has_digits(s: &str) -> bool {
    DIGIT.is_match(s)
}

pub(crate) fn is_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// String form of a raw cell value; `None` when the value is absent.
///
/// Numbers and booleans use their JSON text; arrays and objects are
/// rendered as compact JSON.
pub(crate) fn raw_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

// =============================================================================
// TOKENS
// =============================================================================

/// Split on whitespace runs, dropping empty pieces.
pub(crate) fn tokenize(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Whether a token is exactly one alphabetic character.
pub(crate) fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Detects an accidental space inside a word.
///
/// For each adjacent pair `(a, b)` where `b` starts with a lowercase letter,
/// fires if `a` is a single uppercase letter ("Г еоргиевна") or `a` ends with
/// a lowercase letter ("серге евич").
pub(crate) fn split_word_suspected(tokens: &[&str]) -> bool {
    tokens.windows(2).any(|pair| {
        let (a, b) = (pair[0], pair[1]);
        let Some(b0) = b.chars().next() else {
            return false;
        };
        if !is_lower_alpha(b0) {
            return false;
        }
        if is_single_letter(a) && a.chars().all(is_upper_alpha) {
            return true;
        }
        a.chars().next_back().is_some_and(is_lower_alpha)
    })
}
