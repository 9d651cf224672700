//! Single-value normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::text;

use super::rules::Rule;

/// Technical outcome of normalizing one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormStatus {
    /// The value was already in normalized form.
    Ok,
    /// At least one rule changed the value.
    Fixed,
}

impl NormStatus {
    /// Stable status code.
    pub fn code(&self) -> &'static str {
        match self {
            NormStatus::Ok => "ok",
            NormStatus::Fixed => "fixed",
        }
    }

    /// Russian label shown to reviewers.
    pub fn label_ru(&self) -> &'static str {
        match self {
            NormStatus::Ok => "ок",
            NormStatus::Fixed => "нормализовано",
        }
    }
}

/// Result of normalizing a single value. The source value is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    /// Original value as received; `null` when absent.
    pub before: Value,
    /// Normalized string (may be empty).
    pub after: String,
    /// `fixed` iff `after` differs from the string form of `before`.
    pub status: NormStatus,
    /// Rules that changed the value, in pipeline order.
    pub applied_rules: Vec<Rule>,
}

impl NormalizationResult {
    /// Whether any rule changed the value.
    pub fn is_fixed(&self) -> bool {
        self.status == NormStatus::Fixed
    }

    /// Applied rule codes joined with `", "`.
    pub fn rules_display(&self) -> String {
        self.applied_rules
            .iter()
            .map(Rule::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Safely normalize one full-name value.
///
/// Only non-semantic changes are made: invisible characters, punctuation
/// outside parentheses, whitespace, dash variants and letter case. Nothing is
/// guessed, reordered, transliterated or typo-fixed, and text inside
/// parentheses is never touched.
///
/// An absent value (`null`) normalizes to an empty string with status `ok`.
///
/// # Example
///
/// ```
/// use fio_curate::normalize::{normalize, NormStatus, Rule};
///
/// let result = normalize("  ИВАНОВ   иВАН  ");
/// assert_eq!(result.after, "Иванов Иван");
/// assert_eq!(result.status, NormStatus::Fixed);
/// assert_eq!(result.applied_rules, vec![Rule::NormalizeSpaces, Rule::TitleCase]);
/// ```
pub fn normalize(value: impl Into<Value>) -> NormalizationResult {
    let before = value.into();

    let Some(baseline) = text::raw_text(&before) else {
        return NormalizationResult {
            before,
            after: String::new(),
            status: NormStatus::Ok,
            applied_rules: Vec::new(),
        };
    };

    let mut current = baseline.to_string();
    let mut applied_rules = Vec::new();

    for rule in Rule::PIPELINE {
        let next = rule.apply(&current);
        if next != current {
            applied_rules.push(rule);
            current = next;
        }
    }

    let status = if current == baseline {
        NormStatus::Ok
    } else {
        NormStatus::Fixed
    };

    NormalizationResult {
        before,
        after: current,
        status,
        applied_rules,
    }
}
