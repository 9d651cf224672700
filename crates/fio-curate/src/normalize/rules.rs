//! Normalization rules, applied in a fixed order.

use serde::{Deserialize, Serialize};

use crate::text::{self, DASHES, INVISIBLE, PUNCT_TO_SPACE, QUOTES};

use super::title_case::title_case_outside_parentheses;

/// A safe (non-semantic) normalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Remove zero-width, BOM and other control/format characters.
    StripInvisible,
    /// Drop quotes; turn `, . ; / \` into spaces. Parentheses untouched.
    NormalizePunctuation,
    /// Any whitespace to a single space; trim.
    NormalizeSpaces,
    /// Unicode dashes and minus to `-`.
    NormalizeDash,
    /// Title case outside parentheses, hyphen aware.
    TitleCase,
}

impl Rule {
    /// All rules in pipeline order.
    pub const PIPELINE: [Rule; 5] = [
        Rule::StripInvisible,
        Rule::NormalizePunctuation,
        Rule::NormalizeSpaces,
        Rule::NormalizeDash,
        Rule::TitleCase,
    ];

    /// Stable rule identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Rule::StripInvisible => "strip_invisible",
            Rule::NormalizePunctuation => "normalize_punctuation",
            Rule::NormalizeSpaces => "normalize_spaces",
            Rule::NormalizeDash => "normalize_dash",
            Rule::TitleCase => "title_case",
        }
    }

    /// Russian label shown to reviewers.
    pub fn label_ru(&self) -> &'static str {
        match self {
            Rule::StripInvisible => "удаление невидимых/мусорных символов",
            Rule::NormalizePunctuation => "нормализация пунктуации (кроме круглых скобок)",
            Rule::NormalizeSpaces => "нормализация пробелов",
            Rule::NormalizeDash => "нормализация тире",
            Rule::TitleCase => "приведение регистра (Title Case)",
        }
    }

    /// Apply this rule to `s`.
    pub fn apply(&self, s: &str) -> String {
        match self {
            Rule::StripInvisible => strip_invisible(s),
            Rule::NormalizePunctuation => normalize_punctuation(s),
            Rule::NormalizeSpaces => normalize_spaces(s),
            Rule::NormalizeDash => normalize_dash(s),
            Rule::TitleCase => title_case(s),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn strip_invisible(s: &str) -> String {
    INVISIBLE.replace_all(s, "").into_owned()
}

fn normalize_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| !QUOTES.contains(c))
        .map(|c| if PUNCT_TO_SPACE.contains(&c) { ' ' } else { c })
        .collect()
}

fn normalize_spaces(s: &str) -> String {
    text::tokenize(s).join(" ")
}

fn normalize_dash(s: &str) -> String {
    s.chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect()
}

/// Title case unless the value is empty or looks like it has a word broken
/// by a stray space; casing such a value would hide the break.
fn title_case(s: &str) -> String {
    if s.is_empty() || text::split_word_suspected(&text::tokenize(s)) {
        return s.to_string();
    }
    title_case_outside_parentheses(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_codes_in_pipeline_order() {
        let codes: Vec<&str> = Rule::PIPELINE.iter().map(Rule::code).collect();
        assert_eq!(
            codes,
            vec![
                "strip_invisible",
                "normalize_punctuation",
                "normalize_spaces",
                "normalize_dash",
                "title_case",
            ]
        );
    }

    #[test]
    fn test_rule_serializes_as_code() {
        let json = serde_json::to_string(&Rule::NormalizeDash).unwrap();
        assert_eq!(json, "\"normalize_dash\"");
    }

    #[test]
    fn test_strip_invisible() {
        assert_eq!(strip_invisible("\u{FEFF}Иванов\u{200B}"), "Иванов");
        assert_eq!(strip_invisible("Ива\u{00AD}нов"), "Иванов");
        assert_eq!(strip_invisible("a\tb\nc\rd"), "a\tb\nc\rd");
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize_punctuation("«Иванов»"), "Иванов");
        assert_eq!(normalize_punctuation("Иванов,Иван"), "Иванов Иван");
        assert_eq!(normalize_punctuation("И.И."), "И И ");
        assert_eq!(normalize_punctuation("a/b\\c;d"), "a b c d");
        assert_eq!(normalize_punctuation("(девичья)"), "(девичья)");
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  Иванов \t Иван\n"), "Иванов Иван");
        assert_eq!(normalize_spaces("Иванов\u{00A0}Иван"), "Иванов Иван");
        assert_eq!(normalize_spaces("   "), "");
    }

    #[test]
    fn test_normalize_dash() {
        assert_eq!(normalize_dash("Иванов—Петров"), "Иванов-Петров");
        assert_eq!(normalize_dash("a\u{2010}b\u{2011}c\u{2012}d\u{2013}e\u{2212}f"), "a-b-c-d-e-f");
    }

    #[test]
    fn test_title_case_suppressed_on_split_word() {
        assert_eq!(title_case("Г еоргиевна"), "Г еоргиевна");
        assert_eq!(title_case("ИВАНОВ ИВАН"), "Иванов Иван");
        assert_eq!(title_case(""), "");
    }
}
