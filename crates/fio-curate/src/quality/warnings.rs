//! Non-blocking warnings computed on the raw value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::text;

/// Russian label for a value that carries at least one warning.
pub const ATTENTION_LABEL_RU: &str = "внимание";

/// Informational quality warning. Never changes normalization output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// A digit appears anywhere in the value.
    HasDigits,
    /// An ASCII Latin letter appears in the value.
    HasLatin,
    /// A word looks broken by a stray space ("Г еоргиевна").
    SplitWordSuspected,
    /// Shorter than two characters, or a lone one-letter token.
    TooShort,
    /// Some token is a single letter (initial or fragment).
    SingleLetterToken,
}

impl Warning {
    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            Warning::HasDigits => "has_digits",
            Warning::HasLatin => "has_latin",
            Warning::SplitWordSuspected => "split_word_suspected",
            Warning::TooShort => "too_short",
            Warning::SingleLetterToken => "single_letter_token",
        }
    }

    /// Russian label shown to reviewers.
    pub fn label_ru(&self) -> &'static str {
        match self {
            Warning::HasDigits => "содержит цифры",
            Warning::HasLatin => "содержит латиницу",
            Warning::SplitWordSuspected => "возможно разорвано слово",
            Warning::TooShort => "слишком коротко",
            Warning::SingleLetterToken => "есть однобуквенное слово",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Detect warnings on a raw (pre-normalization) value.
///
/// Returns codes in a stable order: digits, latin, split word, too short,
/// single-letter token. Empty, whitespace-only and absent values produce no
/// warnings.
pub fn detect_warnings(raw: impl Into<Value>) -> Vec<Warning> {
    let raw = raw.into();
    let Some(s) = text::raw_text(&raw) else {
        return Vec::new();
    };
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let tokens = text::tokenize(&s);
    let mut warnings = Vec::new();

    if text::has_digits(&s) {
        warnings.push(Warning::HasDigits);
    }

    if text::has_ascii_latin(&s) {
        warnings.push(Warning::HasLatin);
    }

    if text::split_word_suspected(&tokens) {
        warnings.push(Warning::SplitWordSuspected);
    }

    let lone_letter = tokens.len() == 1 && text::is_single_letter(tokens[0]);
    if trimmed.chars().count() < 2 || lone_letter {
        warnings.push(Warning::TooShort);
    }

    if tokens.iter().any(|t| text::is_single_letter(t)) {
        warnings.push(Warning::SingleLetterToken);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert!(detect_warnings("Анна9").contains(&Warning::HasDigits));
    }

    #[test]
    fn test_latin() {
        assert_eq!(detect_warnings("Ivanov"), vec![Warning::HasLatin]);
    }

    #[test]
    fn test_split_word_and_single_letter() {
        let w = detect_warnings("Г еоргиевна");
        assert_eq!(
            w,
            vec![Warning::SplitWordSuspected, Warning::SingleLetterToken]
        );
    }

    #[test]
    fn test_lowercase_tail_split() {
        let w = detect_warnings("Петров Сергей серге евич");
        assert!(w.contains(&Warning::SplitWordSuspected));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            detect_warnings("А"),
            vec![Warning::TooShort, Warning::SingleLetterToken]
        );
        assert_eq!(detect_warnings(" 7 "), vec![Warning::HasDigits, Warning::TooShort]);
        assert!(!detect_warnings("Ян").contains(&Warning::TooShort));
    }

    #[test]
    fn test_initials_are_single_letters() {
        let w = detect_warnings("Иванов И И");
        assert_eq!(w, vec![Warning::SingleLetterToken]);
    }

    #[test]
    fn test_empty_has_no_warnings() {
        assert!(detect_warnings("").is_empty());
        assert!(detect_warnings("   \t").is_empty());
        assert!(detect_warnings(Value::Null).is_empty());
    }

    #[test]
    fn test_clean_value_has_no_warnings() {
        assert!(detect_warnings("Иванов Иван Иванович").is_empty());
    }

    #[test]
    fn test_stable_order() {
        let w = detect_warnings("A б 1");
        assert_eq!(
            w,
            vec![
                Warning::HasDigits,
                Warning::HasLatin,
                Warning::SplitWordSuspected,
                Warning::SingleLetterToken,
            ]
        );
    }
}
