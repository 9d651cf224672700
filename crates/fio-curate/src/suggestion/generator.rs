//! Dictionary-based suggestion generation over a CSV file.
//!
//! The generator never changes data. For every row it extracts a candidate
//! given name, looks it up verbatim in the name dictionary and, when the
//! dictionary knows a different canonical form, records a suggestion.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::curation::Repository;
use crate::dictionary::{DictionaryCache, DictionaryMeta, NameDictionary};
use crate::error::{CurateError, Result};
use crate::input::CsvSource;

use super::extract::CandidateExtractor;
use super::run::Run;
use super::selection::Selection;
use super::suggestion::Suggestion;

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Path of the name dictionary. There is no default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dictionary path.
    pub fn with_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary_path = Some(path.into());
        self
    }
}

/// What to generate suggestions for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The CSV file with its encoding and delimiter.
    pub source: CsvSource,
    /// Which columns hold the name.
    pub selection: Selection,
}

impl GenerationRequest {
    pub fn new(source: CsvSource, selection: Selection) -> Self {
        Self { source, selection }
    }
}

/// Rows that produced no suggestion, by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// The configured column is missing from the header or the row is short.
    pub no_column: usize,
    /// No candidate could be extracted.
    pub no_candidate: usize,
    /// The candidate is not a known variant.
    pub not_in_dictionary: usize,
    /// The candidate already is the canonical form.
    pub already_canonical: usize,
    /// The CSV reader rejected the row.
    pub malformed: usize,
}

impl SkipCounts {
    /// Total skipped rows.
    pub fn total(&self) -> usize {
        self.no_column
            + self.no_candidate
            + self.not_in_dictionary
            + self.already_canonical
            + self.malformed
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The run record.
    pub run: Run,
    /// Data rows read (header excluded).
    pub rows_scanned: usize,
    /// Rows without a suggestion.
    pub skipped: SkipCounts,
    /// Suggestions saved.
    pub suggestions: usize,
    /// The dictionary snapshot used.
    pub dictionary: DictionaryMeta,
}

/// Generates `DICT_NAME_VARIANT` suggestions.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    dictionary_path: PathBuf,
}

impl SuggestionGenerator {
    /// Create a generator reading the dictionary at `dictionary_path`.
    pub fn new(dictionary_path: impl Into<PathBuf>) -> Self {
        Self {
            dictionary_path: dictionary_path.into(),
        }
    }

    /// Create a generator from configuration.
    ///
    /// Fails with [`CurateError::Config`] when no dictionary path is set.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config
            .dictionary_path
            .as_ref()
            .map(Self::new)
            .ok_or_else(|| CurateError::Config("No dictionary path configured".to_string()))
    }

    /// Path of the dictionary this generator uses.
    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }

    /// Run generation, loading the dictionary from disk.
    ///
    /// The run is saved first; a dictionary that fails to load aborts the
    /// run after that, leaving the saved run in place.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fio_curate::curation::MemoryRepository;
    /// use fio_curate::input::CsvSource;
    /// use fio_curate::suggestion::{GenerationRequest, Selection, SuggestionGenerator};
    ///
    /// let generator = SuggestionGenerator::new("names.csv");
    /// let request = GenerationRequest::new(CsvSource::new("people.csv"), Selection::single("ФИО"));
    /// let mut repo = MemoryRepository::new();
    ///
    /// let summary = generator.generate(&request, &mut repo).unwrap();
    /// println!("{} suggestions", summary.suggestions);
    /// ```
    pub fn generate(&self, request: &GenerationRequest, repo: &mut impl Repository) -> Result<RunSummary> {
        let extractor = request.selection.extractor();
        self.run(request, extractor.as_deref(), repo, || {
            NameDictionary::load(&self.dictionary_path).map(Arc::new)
        })
    }

    /// Run generation, reusing a cached dictionary snapshot when its hash
    /// is unchanged.
    pub fn generate_cached(
        &self,
        request: &GenerationRequest,
        cache: &mut DictionaryCache,
        repo: &mut impl Repository,
    ) -> Result<RunSummary> {
        let extractor = request.selection.extractor();
        self.run(request, extractor.as_deref(), repo, || {
            cache.get_or_load(&self.dictionary_path)
        })
    }

    /// Run generation with a custom candidate extractor instead of the
    /// selection's default one.
    pub fn generate_with(
        &self,
        request: &GenerationRequest,
        extractor: &dyn CandidateExtractor,
        repo: &mut impl Repository,
    ) -> Result<RunSummary> {
        self.run(request, Some(extractor), repo, || {
            NameDictionary::load(&self.dictionary_path).map(Arc::new)
        })
    }

    fn run(
        &self,
        request: &GenerationRequest,
        extractor: Option<&dyn CandidateExtractor>,
        repo: &mut impl Repository,
        load_dictionary: impl FnOnce() -> Result<Arc<NameDictionary>>,
    ) -> Result<RunSummary> {
        let run = Run::new(&request.source, request.selection.clone());
        repo.save_run(&run)?;
        info!(
            run_id = %run.id,
            source = %run.source.display(),
            mode = run.selection.mode(),
            "starting suggestion run"
        );

        let dictionary = load_dictionary()?;

        let rows = request.source.open()?;
        let column = extractor.and_then(|ex| rows.column_index(ex.column()));
        if column.is_none() {
            debug!(run_id = %run.id, "no candidate column in header; rows will be skipped");
        }

        let mut summary = RunSummary {
            run,
            rows_scanned: 0,
            skipped: SkipCounts::default(),
            suggestions: 0,
            dictionary: dictionary.meta().clone(),
        };

        for (i, record) in rows.enumerate() {
            let row = i + 1;
            summary.rows_scanned += 1;

            let record = match record {
                Ok(record) => record,
                Err(CurateError::Csv(e)) if !e.is_io_error() => {
                    debug!(row, error = %e, "skipping malformed row");
                    summary.skipped.malformed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let (Some(extractor), Some(cell)) = (extractor, column.and_then(|c| record.get(c))) else {
                summary.skipped.no_column += 1;
                continue;
            };

            let Some(candidate) = extractor.extract(cell) else {
                debug!(row, "no candidate");
                summary.skipped.no_candidate += 1;
                continue;
            };

            let Some(canonical) = dictionary.lookup(candidate) else {
                debug!(row, "candidate not in dictionary");
                summary.skipped.not_in_dictionary += 1;
                continue;
            };

            if canonical == candidate {
                summary.skipped.already_canonical += 1;
                continue;
            }

            let suggestion = Suggestion::dictionary_variant(
                &summary.run.id,
                row,
                extractor.field(),
                candidate,
                canonical,
                dictionary.meta(),
            );
            repo.save_suggestion(&suggestion)?;
            summary.suggestions += 1;
        }

        info!(
            run_id = %summary.run.id,
            rows = summary.rows_scanned,
            suggestions = summary.suggestions,
            skipped = summary.skipped.total(),
            "suggestion run finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::MemoryRepository;
    use crate::suggestion::{SecondToken, SuggestionField};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn dictionary() -> NamedTempFile {
        file(
            "canonical,variant,enabled,note,source\n\
             Иван,Ваня,1,,manual\n\
             Мария,Маша,1,,manual\n\
             Пётр,Петя,0,,manual\n\
             Анна,Анна,1,,manual\n",
        )
    }

    #[test]
    fn test_single_mode() {
        let dict = dictionary();
        let csv = file(
            "ФИО,Город\n\
             Иванов Ваня Петрович,Москва\n\
             Петров Петя,Тверь\n\
             Сидорова Анна,Омск\n\
             Козлов,Тула\n\
             Смирнова Маша,Сочи\n",
        );

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(CsvSource::new(csv.path()), Selection::single("ФИО"));
        let summary = SuggestionGenerator::new(dict.path())
            .generate(&request, &mut repo)
            .unwrap();

        assert_eq!(summary.rows_scanned, 5);
        assert_eq!(summary.suggestions, 2);
        assert_eq!(summary.skipped.not_in_dictionary, 1);
        assert_eq!(summary.skipped.already_canonical, 1);
        assert_eq!(summary.skipped.no_candidate, 1);

        let sugs = repo.suggestions();
        assert_eq!(sugs[0].row, 1);
        assert_eq!(sugs[0].field, SuggestionField::FioFirstName);
        assert_eq!(sugs[0].before, "Ваня");
        assert_eq!(sugs[0].suggested, "Иван");
        assert_eq!(sugs[1].row, 5);
        assert_eq!(sugs[1].suggested, "Мария");
        assert_eq!(sugs[1].dictionary_hash.as_deref(), Some(summary.dictionary.sha256.as_str()));
    }

    #[test]
    fn test_split_mode_and_short_rows() {
        let dict = dictionary();
        let csv = file("Фамилия;Имя\nИванов; Ваня \nПетров\nСидорова;\n");

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(
            CsvSource::new(csv.path()).with_delimiter(';'),
            Selection::split(Some("Фамилия"), Some("Имя"), None),
        );
        let summary = SuggestionGenerator::new(dict.path())
            .generate(&request, &mut repo)
            .unwrap();

        assert_eq!(summary.suggestions, 1);
        assert_eq!(summary.skipped.no_column, 1);
        assert_eq!(summary.skipped.no_candidate, 1);
        assert_eq!(repo.suggestions()[0].field, SuggestionField::FirstName);
        assert_eq!(repo.suggestions()[0].before, "Ваня");
        assert_eq!(repo.runs()[0].delimiter, Some(';'));
    }

    #[test]
    fn test_blank_lines_keep_row_numbers() {
        let dict = dictionary();
        let csv = file("ФИО\nПетров Пётр\n\nИванов Ваня\n");

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(CsvSource::new(csv.path()), Selection::single("ФИО"));
        let summary = SuggestionGenerator::new(dict.path())
            .generate(&request, &mut repo)
            .unwrap();

        assert_eq!(summary.rows_scanned, 3);
        assert_eq!(summary.skipped.no_column, 1);
        assert_eq!(summary.suggestions, 1);
        assert_eq!(repo.suggestions()[0].row, 3);
        assert_eq!(repo.suggestions()[0].id, "sug_3_fio.first_name");
    }

    #[test]
    fn test_missing_column_skips_all_rows() {
        let dict = dictionary();
        let csv = file("Name\nИванов Ваня\n");

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(CsvSource::new(csv.path()), Selection::single("ФИО"));
        let summary = SuggestionGenerator::new(dict.path())
            .generate(&request, &mut repo)
            .unwrap();

        assert_eq!(summary.suggestions, 0);
        assert_eq!(summary.skipped.no_column, 1);
    }

    #[test]
    fn test_split_without_first_name_column() {
        let dict = dictionary();
        let csv = file("Фамилия\nВаня\n");

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(
            CsvSource::new(csv.path()),
            Selection::split(Some("Фамилия"), None, None),
        );
        let summary = SuggestionGenerator::new(dict.path())
            .generate(&request, &mut repo)
            .unwrap();

        assert_eq!(summary.suggestions, 0);
        assert_eq!(summary.rows_scanned, 1);
    }

    #[test]
    fn test_missing_dictionary_keeps_run() {
        let csv = file("ФИО\nИванов Ваня\n");

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(CsvSource::new(csv.path()), Selection::single("ФИО"));
        let err = SuggestionGenerator::new("/nonexistent/names.csv")
            .generate(&request, &mut repo)
            .unwrap_err();

        assert!(matches!(err, CurateError::NotFound { .. }));
        assert_eq!(repo.runs().len(), 1);
        assert!(repo.suggestions().is_empty());
    }

    #[test]
    fn test_custom_extractor() {
        let dict = dictionary();
        let csv = file("Полное имя\nВаня Иванов\n");

        let mut repo = MemoryRepository::new();
        let request = GenerationRequest::new(CsvSource::new(csv.path()), Selection::single("ФИО"));
        let summary = SuggestionGenerator::new(dict.path())
            .generate_with(&request, &SecondToken::new("Полное имя"), &mut repo)
            .unwrap();

        // Second token is the surname here: no dictionary hit.
        assert_eq!(summary.suggestions, 0);
        assert_eq!(summary.skipped.not_in_dictionary, 1);
    }

    #[test]
    fn test_cached_generation() {
        let dict = dictionary();
        let csv = file("ФИО\nИванов Ваня\n");
        let generator = SuggestionGenerator::new(dict.path());
        let request = GenerationRequest::new(CsvSource::new(csv.path()), Selection::single("ФИО"));

        let mut cache = DictionaryCache::new();
        let mut repo = MemoryRepository::new();
        let first = generator.generate_cached(&request, &mut cache, &mut repo).unwrap();
        let second = generator.generate_cached(&request, &mut cache, &mut repo).unwrap();

        assert_eq!(cache.len(), 1);
        assert_ne!(first.run.id, second.run.id);
        assert_eq!(repo.suggestions().len(), 2);
    }

    #[test]
    fn test_from_config_requires_dictionary() {
        assert!(matches!(
            SuggestionGenerator::from_config(&GeneratorConfig::new()),
            Err(CurateError::Config(_))
        ));
        let generator =
            SuggestionGenerator::from_config(&GeneratorConfig::new().with_dictionary("names.csv")).unwrap();
        assert_eq!(generator.dictionary_path(), Path::new("names.csv"));
    }
}
