//! Read-only previews of how the selected name columns would be normalized.

mod columns;
mod table;

pub use columns::{column_stats, ColumnReport, ColumnStats};
pub use table::{Preview, PreviewConfig, PreviewItem, PreviewStats, PREVIEW_ROWS};

/// `part` as a percentage of `total`, rounded to one decimal; 0.0 when
/// `total` is zero.
fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
        assert_eq!(percent(3, 3), 100.0);
    }
}
