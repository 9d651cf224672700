//! Main Curator struct and public API.

use serde::Serialize;
use serde_json::Value;

use crate::config::CurateConfig;
use crate::curation::RunStore;
use crate::dictionary::DictionaryCache;
use crate::error::Result;
use crate::input::CsvSource;
use crate::normalize::{normalize, NormalizationResult};
use crate::preview::{column_stats, ColumnReport, Preview};
use crate::quality::{detect_warnings, DisplayStatus, ReviewFlag, Warning};
use crate::suggestion::{GenerationRequest, RunSummary, Selection, SuggestionGenerator};

/// Everything known about a single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCheck {
    /// Normalization outcome.
    pub result: NormalizationResult,
    /// Non-blocking warnings on the raw value.
    pub warnings: Vec<Warning>,
    /// Review flags on the raw value.
    pub flags: Vec<ReviewFlag>,
    /// Status shown to a reviewer.
    pub status: DisplayStatus,
}

/// A preview together with fill statistics of the selected columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewReport {
    pub preview: Preview,
    pub columns: ColumnReport,
}

/// Entry point tying normalization, classification, preview and suggestion
/// generation to one configuration.
///
/// Dictionary snapshots are cached between [`generate`](Self::generate)
/// calls and reloaded when the file changes.
#[derive(Debug, Default)]
pub struct Curator {
    config: CurateConfig,
    cache: DictionaryCache,
}

impl Curator {
    /// Create a curator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curator with custom configuration.
    pub fn with_config(config: CurateConfig) -> Self {
        Self {
            config,
            cache: DictionaryCache::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CurateConfig {
        &self.config
    }

    /// Normalize and classify one value.
    ///
    /// # Example
    ///
    /// ```
    /// use fio_curate::Curator;
    /// use fio_curate::quality::DisplayStatus;
    ///
    /// let check = Curator::new().check("  ИВАНОВ   иВАН  ");
    /// assert_eq!(check.result.after, "Иванов Иван");
    /// assert_eq!(check.status, DisplayStatus::Fixed);
    /// ```
    pub fn check(&self, value: impl Into<Value>) -> ValueCheck {
        let raw = value.into();
        let result = normalize(raw.clone());
        let warnings = detect_warnings(raw.clone());
        let flags = self.config.flags.detect(&raw);
        let status = DisplayStatus::derive(&result, &flags);

        ValueCheck {
            result,
            warnings,
            flags,
            status,
        }
    }

    /// Preview the head of a CSV file with column fill statistics.
    pub fn preview(&self, source: &CsvSource, selection: &Selection) -> Result<PreviewReport> {
        let table = source.read_head(self.config.preview.rows)?;
        let preview = Preview::from_table(&table, selection, &self.config.flags)?;
        let columns = column_stats(&table, &selection.columns(), self.config.preview.examples_limit);

        Ok(PreviewReport { preview, columns })
    }

    /// Generate suggestions into a fresh run store.
    ///
    /// The configured dictionary is required.
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<(RunStore, RunSummary)> {
        request.selection.validate()?;
        let generator = SuggestionGenerator::from_config(&self.config.generator)?;

        let mut store = RunStore::new();
        let summary = generator.generate_cached(request, &mut self.cache, &mut store)?;
        Ok((store, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurateError;
    use crate::quality::FlagThresholds;
    use crate::suggestion::GeneratorConfig;
    use serde_json::json;

    #[test]
    fn test_check_absent_value() {
        let check = Curator::new().check(Value::Null);
        assert_eq!(check.result.after, "");
        assert_eq!(check.status, DisplayStatus::Ok);
        assert!(check.warnings.is_empty());
    }

    #[test]
    fn test_check_number() {
        let check = Curator::new().check(json!(42));
        assert_eq!(check.result.after, "42");
        assert_eq!(check.status, DisplayStatus::NeedsReview);
    }

    #[test]
    fn test_check_uses_configured_thresholds() {
        let value = "Мария Анна Иванова Петрова";
        assert_eq!(Curator::new().check(value).status, DisplayStatus::NeedsReview);

        let relaxed = CurateConfig::new().with_flags(FlagThresholds::new().with_max_words(4));
        assert_eq!(Curator::with_config(relaxed).check(value).status, DisplayStatus::Ok);
    }

    #[test]
    fn test_generate_requires_dictionary() {
        let request = GenerationRequest::new(CsvSource::new("people.csv"), Selection::single("ФИО"));
        let err = Curator::new().generate(&request).unwrap_err();
        assert!(matches!(err, CurateError::Config(_)));

        let config = CurateConfig::new().with_generator(GeneratorConfig::new());
        assert!(Curator::with_config(config).generate(&request).is_err());
    }
}
