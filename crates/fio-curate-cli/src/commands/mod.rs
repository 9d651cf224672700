//! CLI command implementations.

pub mod decide;
pub mod dict;
pub mod generate;
pub mod normalize;
pub mod preview;
pub mod status;

use std::path::Path;

use fio_curate::input::{sniff, CsvSource};
use tracing::debug;

use crate::cli::DialectArgs;

/// Build a CSV source, sniffing whatever the user did not give explicitly.
pub(crate) fn resolve_source(file: &Path, dialect: &DialectArgs) -> Result<CsvSource, Box<dyn std::error::Error>> {
    let mut source = match (&dialect.encoding, dialect.delimiter) {
        (Some(_), Some(_)) => CsvSource::new(file),
        _ => {
            let sniffed = sniff(file)?;
            debug!(encoding = %sniffed.encoding, delimiter = ?sniffed.delimiter, "sniffed CSV dialect");
            sniffed.source(file)
        }
    };

    if let Some(encoding) = &dialect.encoding {
        source = source.with_encoding(encoding.as_str());
    }
    if let Some(delimiter) = dialect.delimiter {
        source = source.with_delimiter(delimiter);
    }
    Ok(source)
}

/// Human-readable delimiter.
pub(crate) fn delimiter_display(delimiter: Option<char>) -> String {
    match delimiter {
        Some('\t') => "tab".to_string(),
        Some(c) => format!("'{}'", c),
        None => "','".to_string(),
    }
}

/// Colored status label.
pub(crate) fn status_colored(status: fio_curate::DisplayStatus) -> colored::ColoredString {
    use colored::Colorize;
    use fio_curate::DisplayStatus;

    match status {
        DisplayStatus::Ok => status.label_ru().green(),
        DisplayStatus::Fixed => status.label_ru().blue(),
        DisplayStatus::NeedsReview => status.label_ru().yellow(),
    }
}
