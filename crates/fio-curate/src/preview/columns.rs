//! Fill statistics of selected columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;

use super::percent;

/// Fill statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Rows with a non-empty (trimmed) value.
    pub filled_count: usize,
    /// `filled_count` as a percentage of rows checked, one decimal.
    pub fill_rate: f64,
    /// First distinct non-empty values, in row order.
    pub examples: Vec<String>,
}

/// Fill statistics for a set of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// Rows inspected.
    pub rows_checked: usize,
    /// Statistics per found column, in requested order.
    pub stats: IndexMap<String, ColumnStats>,
    /// Messages for columns that are not in the header.
    pub warnings: Vec<String>,
}

/// Compute fill statistics for `names` over the rows of `table`, keeping at
/// most `examples_limit` distinct example values per column.
pub fn column_stats(table: &DataTable, names: &[&str], examples_limit: usize) -> ColumnReport {
    let rows_checked = table.row_count();
    let mut report = ColumnReport {
        rows_checked,
        ..ColumnReport::default()
    };

    for &name in names {
        let Some(index) = table.column_index(name) else {
            report
                .warnings
                .push(format!("Столбец «{}» не найден в заголовках.", name));
            continue;
        };

        let mut filled_count = 0;
        let mut examples: Vec<String> = Vec::new();
        for value in table.column_values(index).map(str::trim).filter(|v| !v.is_empty()) {
            filled_count += 1;
            if examples.len() < examples_limit && !examples.iter().any(|e| e == value) {
                examples.push(value.to_string());
            }
        }

        report.stats.insert(
            name.to_string(),
            ColumnStats {
                filled_count,
                fill_rate: percent(filled_count, rows_checked),
                examples,
            },
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        let rows = [
            ["Иванов Иван", "1"],
            ["", "2"],
            ["Иванов Иван", "3"],
            ["Петров Пётр", ""],
        ];
        DataTable::new(
            vec!["ФИО".into(), "Номер".into()],
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_fill_rate_and_examples() {
        let report = column_stats(&table(), &["ФИО"], 5);
        let stats = &report.stats["ФИО"];

        assert_eq!(report.rows_checked, 4);
        assert_eq!(stats.filled_count, 3);
        assert_eq!(stats.fill_rate, 75.0);
        assert_eq!(stats.examples, vec!["Иванов Иван", "Петров Пётр"]);
    }

    #[test]
    fn test_examples_limit() {
        let report = column_stats(&table(), &["Номер"], 2);
        assert_eq!(report.stats["Номер"].examples, vec!["1", "2"]);
    }

    #[test]
    fn test_missing_column_warning() {
        let report = column_stats(&table(), &["Имя", "ФИО"], 5);

        assert_eq!(report.warnings, vec!["Столбец «Имя» не найден в заголовках."]);
        assert_eq!(report.stats.len(), 1);
    }

    #[test]
    fn test_no_rows() {
        let empty = DataTable::new(vec!["ФИО".into()], Vec::new());
        let report = column_stats(&empty, &["ФИО"], 5);
        assert_eq!(report.stats["ФИО"].fill_rate, 0.0);
    }
}
