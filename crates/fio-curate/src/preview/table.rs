//! Normalization preview over the head of a CSV file.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{CsvSource, DataTable};
use crate::normalize::{normalize, NormalizationResult};
use crate::quality::{detect_warnings, DisplayStatus, FlagThresholds, ReviewFlag, Warning};
use crate::suggestion::{NamePart, Selection};

use super::percent;

/// Rows shown in a preview unless configured otherwise.
pub const PREVIEW_ROWS: usize = 20;

/// Preview configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Data rows to read.
    pub rows: usize,
    /// Distinct example values kept per column in column statistics.
    pub examples_limit: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            rows: PREVIEW_ROWS,
            examples_limit: 5,
        }
    }
}

impl PreviewConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Set the examples limit.
    pub fn with_examples_limit(mut self, limit: usize) -> Self {
        self.examples_limit = limit;
        self
    }
}

/// One value of one row, before and after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewItem {
    /// 1-based data row number.
    pub row: usize,
    /// Which name part this is.
    pub part: NamePart,
    /// Source column header.
    pub column: String,
    /// Raw cell value; empty when the column or cell is missing.
    pub before: String,
    /// Normalization outcome.
    pub result: NormalizationResult,
    /// Non-blocking warnings on the raw value.
    pub warnings: Vec<Warning>,
    /// Review flags on the raw value.
    pub flags: Vec<ReviewFlag>,
    /// Status shown to the reviewer.
    pub status: DisplayStatus,
}

impl PreviewItem {
    fn new(row: usize, part: NamePart, column: &str, before: &str, thresholds: &FlagThresholds) -> Self {
        let result = normalize(before);
        let warnings = detect_warnings(before);
        let flags = thresholds.detect(&before.into());
        let status = DisplayStatus::derive(&result, &flags);

        Self {
            row,
            part,
            column: column.to_string(),
            before: before.to_string(),
            result,
            warnings,
            flags,
            status,
        }
    }

    /// Whether any warning was raised.
    pub fn needs_attention(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Russian warning labels, comma separated.
    pub fn attention_reasons_ru(&self) -> String {
        join_labels(self.warnings.iter().map(Warning::label_ru))
    }

    /// Russian review flag labels, comma separated.
    pub fn comment_ru(&self) -> String {
        join_labels(self.flags.iter().map(ReviewFlag::label_ru))
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// Counts of preview items by status, with percentages of the total
/// rounded to one decimal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewStats {
    pub total: usize,
    pub ok: usize,
    pub fixed: usize,
    /// Items with at least one warning (any status).
    pub attention: usize,
    pub needs_review: usize,
    pub ok_pct: f64,
    pub fixed_pct: f64,
    pub attention_pct: f64,
    pub needs_review_pct: f64,
}

impl PreviewStats {
    fn from_items(items: &[PreviewItem]) -> Self {
        let total = items.len();
        let count = |status: DisplayStatus| items.iter().filter(|it| it.status == status).count();

        let ok = count(DisplayStatus::Ok);
        let fixed = count(DisplayStatus::Fixed);
        let needs_review = count(DisplayStatus::NeedsReview);
        let attention = items.iter().filter(|it| it.needs_attention()).count();

        Self {
            total,
            ok,
            fixed,
            attention,
            needs_review,
            ok_pct: percent(ok, total),
            fixed_pct: percent(fixed, total),
            attention_pct: percent(attention, total),
            needs_review_pct: percent(needs_review, total),
        }
    }
}

/// How safe normalization would change the selected name columns, without
/// persisting anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    /// Header cells (trimmed).
    pub headers: Vec<String>,
    /// Data rows read.
    pub rows_read: usize,
    /// One item per row and selected name part.
    pub items: Vec<PreviewItem>,
    pub stats: PreviewStats,
}

impl Preview {
    /// Preview the first `limit` rows of `source` with default review flag
    /// thresholds.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fio_curate::input::CsvSource;
    /// use fio_curate::preview::{Preview, PREVIEW_ROWS};
    /// use fio_curate::suggestion::Selection;
    ///
    /// let preview = Preview::build(&CsvSource::new("people.csv"), &Selection::single("ФИО"), PREVIEW_ROWS).unwrap();
    /// println!("{} of {} need review", preview.stats.needs_review, preview.stats.total);
    /// ```
    pub fn build(source: &CsvSource, selection: &Selection, limit: usize) -> Result<Self> {
        let table = source.read_head(limit)?;
        Self::from_table(&table, selection, &FlagThresholds::default())
    }

    /// Preview rows already read into memory.
    ///
    /// Fails with a configuration error when the selection names no column.
    pub fn from_table(table: &DataTable, selection: &Selection, thresholds: &FlagThresholds) -> Result<Self> {
        selection.validate()?;

        let fields: Vec<(NamePart, &str, Option<usize>)> = selection
            .parts()
            .into_iter()
            .map(|(part, column)| (part, column, table.column_index(column)))
            .collect();

        let mut items = Vec::with_capacity(table.row_count() * fields.len());
        for row in 0..table.row_count() {
            for &(part, column, index) in &fields {
                let before = index.and_then(|i| table.get(row, i)).unwrap_or("");
                items.push(PreviewItem::new(row + 1, part, column, before, thresholds));
            }
        }

        let stats = PreviewStats::from_items(&items);
        Ok(Self {
            headers: table.headers.clone(),
            rows_read: table.row_count(),
            items,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Rule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_single_mode_items() {
        let t = table(
            &["ФИО"],
            &[&["Иванов Иван"], &["ИВАНОВ   иВАН"], &["Г еоргиевна"], &["Ivanov Иван"]],
        );
        let preview = Preview::from_table(&t, &Selection::single("ФИО"), &FlagThresholds::default()).unwrap();

        assert_eq!(preview.items.len(), 4);
        assert_eq!(preview.items[0].status, DisplayStatus::Ok);
        assert_eq!(preview.items[1].status, DisplayStatus::Fixed);
        assert_eq!(
            preview.items[1].result.applied_rules,
            vec![Rule::NormalizeSpaces, Rule::TitleCase]
        );
        assert!(preview.items[2].needs_attention());
        assert_eq!(preview.items[3].status, DisplayStatus::NeedsReview);
        assert!(preview.items[3].flags.contains(&ReviewFlag::MixedAlphabet));
        assert_eq!(preview.items[0].part.label_ru(), "фио");
    }

    #[test]
    fn test_stats_percentages() {
        let t = table(&["ФИО"], &[&["Иванов Иван"], &["Иванов Иван"], &["ИВАНОВ ИВАН"]]);
        let preview = Preview::from_table(&t, &Selection::single("ФИО"), &FlagThresholds::default()).unwrap();

        assert_eq!(preview.stats.total, 3);
        assert_eq!(preview.stats.ok, 2);
        assert_eq!(preview.stats.fixed, 1);
        assert_eq!(preview.stats.ok_pct, 66.7);
        assert_eq!(preview.stats.fixed_pct, 33.3);
        assert_eq!(preview.stats.needs_review_pct, 0.0);
    }

    #[test]
    fn test_split_mode_missing_column_and_short_rows() {
        let t = table(&["Фамилия", "Имя"], &[&["Иванов", "Иван"], &["Петров"]]);
        let selection = Selection::split(Some("Фамилия"), Some("Имя"), Some("Отчество"));
        let preview = Preview::from_table(&t, &selection, &FlagThresholds::default()).unwrap();

        assert_eq!(preview.items.len(), 6);
        let labels: Vec<_> = preview.items[..3].iter().map(|i| i.part.label_ru()).collect();
        assert_eq!(labels, vec!["фамилия", "имя", "отчество"]);

        // Missing column and short row read as empty values.
        assert_eq!(preview.items[2].before, "");
        assert_eq!(preview.items[4].before, "");
        assert_eq!(preview.items[4].status, DisplayStatus::Ok);
    }

    #[test]
    fn test_empty_table() {
        let t = table(&["ФИО"], &[]);
        let preview = Preview::from_table(&t, &Selection::single("ФИО"), &FlagThresholds::default()).unwrap();
        assert_eq!(preview.stats, PreviewStats::default());
    }

    #[test]
    fn test_empty_selection() {
        let t = table(&["ФИО"], &[&["Иванов"]]);
        assert!(Preview::from_table(&t, &Selection::split(None, None, None), &FlagThresholds::default()).is_err());
    }

    #[test]
    fn test_labels() {
        let t = table(&["ФИО"], &[&["Ivan2"]]);
        let preview = Preview::from_table(&t, &Selection::single("ФИО"), &FlagThresholds::default()).unwrap();
        let item = &preview.items[0];

        assert_eq!(item.attention_reasons_ru(), "содержит цифры, содержит латиницу");
        assert_eq!(item.comment_ru(), "содержит цифры, только латиница");
    }

    #[test]
    fn test_build_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let rows: String = (0..30).map(|i| format!("Иванов{} Иван\n", i)).collect();
        write!(file, "ФИО\n{}", rows).unwrap();

        let preview = Preview::build(&CsvSource::new(file.path()), &Selection::single("ФИО"), PREVIEW_ROWS).unwrap();
        assert_eq!(preview.rows_read, 20);
        assert_eq!(preview.stats.needs_review, 20);
    }
}
