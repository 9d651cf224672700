//! Blocking review flags computed on the raw value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::text::{self, APOSTROPHES, DASHES, INVISIBLE, PUNCT_TO_SPACE, QUOTES};

/// A condition that requires a human to review the value before any
/// suggestion for it is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFlag {
    /// A digit appears anywhere in the value.
    HasDigits,
    /// A symbol outside letters, digits, whitespace and tolerated punctuation.
    HasForbiddenChars,
    /// Cyrillic and Latin letters in the same value.
    MixedAlphabet,
    /// Latin letters and no Cyrillic at all.
    LatinOnly,
    /// More words than a full name plausibly has.
    TooManyWords,
    /// Too few visible characters.
    TooShort,
}

impl ReviewFlag {
    /// Stable flag code.
    pub fn code(&self) -> &'static str {
        match self {
            ReviewFlag::HasDigits => "has_digits",
            ReviewFlag::HasForbiddenChars => "has_forbidden_chars",
            ReviewFlag::MixedAlphabet => "mixed_alphabet",
            ReviewFlag::LatinOnly => "latin_only",
            ReviewFlag::TooManyWords => "too_many_words",
            ReviewFlag::TooShort => "too_short",
        }
    }

    /// Russian label shown to reviewers.
    pub fn label_ru(&self) -> &'static str {
        match self {
            ReviewFlag::HasDigits => "содержит цифры",
            ReviewFlag::HasForbiddenChars => "недопустимые символы",
            ReviewFlag::MixedAlphabet => "смешение кириллицы и латиницы",
            ReviewFlag::LatinOnly => "только латиница",
            ReviewFlag::TooManyWords => "слишком много слов",
            ReviewFlag::TooShort => "слишком коротко",
        }
    }
}

impl std::fmt::Display for ReviewFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Thresholds for review flag detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagThresholds {
    /// Maximum number of words outside parentheses (surname, given name,
    /// patronymic).
    pub max_words: usize,
    /// Minimum number of non-whitespace characters.
    pub min_chars: usize,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            max_words: 3,
            min_chars: 2,
        }
    }
}

impl FlagThresholds {
    /// Create default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum word count.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Set the minimum visible character count.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Detect review flags on a raw (pre-normalization) value.
    ///
    /// Returns codes in a stable order: digits, forbidden chars, mixed
    /// alphabet, latin only, too many words, too short. Empty,
    /// whitespace-only and absent values produce no flags.
    pub fn detect(&self, raw: &Value) -> Vec<ReviewFlag> {
        let Some(s) = text::raw_text(raw) else {
            return Vec::new();
        };
        if s.trim().is_empty() {
            return Vec::new();
        }

        let mut flags = Vec::new();

        if text::has_digits(&s) {
            flags.push(ReviewFlag::HasDigits);
        }

        if s.chars().any(is_forbidden) {
            flags.push(ReviewFlag::HasForbiddenChars);
        }

        let cyrillic = text::has_cyrillic(&s);
        let latin = text::has_latin_script(&s);
        if cyrillic && latin {
            flags.push(ReviewFlag::MixedAlphabet);
        } else if latin {
            flags.push(ReviewFlag::LatinOnly);
        }

        if words_outside_parentheses(&s) > self.max_words {
            flags.push(ReviewFlag::TooManyWords);
        }

        if s.chars().filter(|c| !c.is_whitespace()).count() < self.min_chars {
            flags.push(ReviewFlag::TooShort);
        }

        flags
    }
}

/// Detect review flags with the default thresholds.
pub fn detect_flags(raw: impl Into<Value>) -> Vec<ReviewFlag> {
    FlagThresholds::default().detect(&raw.into())
}

/// Characters the normalizer does not know how to handle safely.
fn is_forbidden(c: char) -> bool {
    if c.is_alphabetic() || text::is_digit(c) || c.is_whitespace() {
        return false;
    }
    if matches!(c, '-' | '(' | ')') {
        return false;
    }
    if DASHES.contains(&c)
        || QUOTES.contains(&c)
        || PUNCT_TO_SPACE.contains(&c)
        || APOSTROPHES.contains(&c)
    {
        return false;
    }
    let mut buf = [0u8; 4];
    !INVISIBLE.is_match(c.encode_utf8(&mut buf))
}

/// Count words once parenthesized annotations are removed.
fn words_outside_parentheses(s: &str) -> usize {
    let mut outside = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => {
                depth += 1;
                outside.push(' ');
            }
            ')' if depth > 0 => {
                depth -= 1;
                outside.push(' ');
            }
            _ if depth == 0 => outside.push(c),
            _ => {}
        }
    }
    text::tokenize(&outside).len()
}
