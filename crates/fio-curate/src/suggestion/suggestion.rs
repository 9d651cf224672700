//! Suggestion types for proposed name corrections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryMeta;

/// Identifier recorded as the `generator` of dictionary suggestions.
pub const GENERATOR_ID: &str = "fio_curate::suggestion::generator";

/// Version recorded as the `generator_version` of dictionary suggestions.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target field of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionField {
    /// Given name inside a single full-name column.
    #[serde(rename = "fio.first_name")]
    FioFirstName,
    /// A dedicated given-name column.
    #[serde(rename = "first_name")]
    FirstName,
}

impl SuggestionField {
    /// Stable field name.
    pub fn code(&self) -> &'static str {
        match self {
            SuggestionField::FioFirstName => "fio.first_name",
            SuggestionField::FirstName => "first_name",
        }
    }
}

/// Machine-readable reason for a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionCode {
    /// The value is a known variant of a canonical given name.
    DictNameVariant,
}

impl SuggestionCode {
    /// Stable code.
    pub fn code(&self) -> &'static str {
        match self {
            SuggestionCode::DictNameVariant => "DICT_NAME_VARIANT",
        }
    }
}

/// Confidence in a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
        }
    }
}

/// Structured evidence for a dictionary suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// The value as found in the data.
    pub variant: String,
    /// The canonical form from the dictionary.
    pub canonical: String,
    /// Path of the dictionary file.
    pub dictionary: String,
}

/// Fields that identify a suggestion within a run.
///
/// Stores must hold at most one suggestion per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestionKey {
    pub run_id: String,
    pub row: usize,
    pub field: SuggestionField,
    pub code: SuggestionCode,
    pub suggested: String,
}

/// A proposed correction for one field of one row. Never applied
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Identifier, unique within a run.
    pub id: String,

    /// Run that produced this suggestion.
    pub run_id: String,

    /// 1-based data row number (the header is not counted).
    pub row: usize,

    /// Target field.
    pub field: SuggestionField,

    /// Value before the suggestion.
    pub before: String,

    /// Proposed value.
    pub suggested: String,

    /// Reason code.
    pub code: SuggestionCode,

    pub confidence: Confidence,

    /// Human-readable explanation.
    pub message: String,

    pub evidence: Evidence,

    /// What generated this suggestion.
    pub generator: String,

    pub generator_version: String,

    /// SHA-256 of the dictionary snapshot used, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_hash: Option<String>,

    /// When this suggestion was generated.
    pub created_at: DateTime<Utc>,
}

impl Suggestion {
    /// Build a `DICT_NAME_VARIANT` suggestion replacing `variant` with
    /// `canonical`.
    pub fn dictionary_variant(
        run_id: impl Into<String>,
        row: usize,
        field: SuggestionField,
        variant: &str,
        canonical: &str,
        dictionary: &DictionaryMeta,
    ) -> Self {
        Self {
            id: suggestion_id(row, field),
            run_id: run_id.into(),
            row,
            field,
            before: variant.to_string(),
            suggested: canonical.to_string(),
            code: SuggestionCode::DictNameVariant,
            confidence: Confidence::High,
            message: format!(
                "В словаре имён вариант «{}» сопоставлен с канонической формой «{}».",
                variant, canonical
            ),
            evidence: Evidence {
                variant: variant.to_string(),
                canonical: canonical.to_string(),
                dictionary: dictionary.path.display().to_string(),
            },
            generator: GENERATOR_ID.to_string(),
            generator_version: GENERATOR_VERSION.to_string(),
            dictionary_hash: Some(dictionary.sha256.clone()),
            created_at: Utc::now(),
        }
    }

    /// The uniqueness key of this suggestion.
    pub fn key(&self) -> SuggestionKey {
        SuggestionKey {
            run_id: self.run_id.clone(),
            row: self.row,
            field: self.field,
            code: self.code,
            suggested: self.suggested.clone(),
        }
    }
}

/// Suggestion ID for a row and field: `sug_<row>_<field>`.
pub fn suggestion_id(row: usize, field: SuggestionField) -> String {
    format!("sug_{}_{}", row, field.code())
}
