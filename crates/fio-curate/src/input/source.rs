//! CSV sources: streaming rows and small in-memory heads.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CurateError, Result};

use super::encoding::{resolve_encoding, DecodingReader};

type SourceReader = csv::Reader<DecodingReader<BufReader<File>>>;

/// A CSV file with its declared encoding and delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvSource {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Encoding label; `None` means UTF-8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Field delimiter; `None` means `,`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

impl CsvSource {
    /// A UTF-8, comma-separated source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: None,
            delimiter: None,
        }
    }

    /// Set the encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Set the delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Open the source for streaming. The header row is read immediately.
    pub fn open(&self) -> Result<CsvRows> {
        if !self.path.exists() {
            return Err(CurateError::NotFound {
                path: self.path.clone(),
            });
        }

        let encoding = resolve_encoding(self.encoding.as_deref())?;
        let delimiter = delimiter_byte(self.delimiter)?;

        let file = File::open(&self.path).map_err(|e| CurateError::io(&self.path, e))?;
        let decoded = DecodingReader::new(BufReader::new(file), encoding);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(decoded);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let header_end = reader.position().byte();
        reader.get_mut().take_line_breaks(header_end);

        Ok(CsvRows {
            headers,
            reader,
            blank_rows: 0,
            pending: None,
            done: false,
        })
    }

    /// Read the header and at most `limit` data rows into memory.
    ///
    /// Cells are trimmed. Fails with [`CurateError::EmptyData`] when the file
    /// has no header or every header cell is empty.
    pub fn read_head(&self, limit: usize) -> Result<DataTable> {
        let mut rows_iter = self.open()?;
        let headers: Vec<String> = rows_iter.headers().iter().map(|h| h.trim().to_string()).collect();

        if headers.iter().all(String::is_empty) {
            return Err(CurateError::EmptyData(format!(
                "No column headers in '{}'",
                self.path.display()
            )));
        }

        let mut rows = Vec::new();
        let records = rows_iter
            .by_ref()
            .filter(|r| !matches!(r, Ok(record) if record.is_empty()));
        for record in records.take(limit) {
            let record = record?;
            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        Ok(DataTable::new(headers, rows))
    }
}

/// Convert a delimiter to the single byte the CSV reader needs.
fn delimiter_byte(delimiter: Option<char>) -> Result<u8> {
    let delimiter = delimiter.unwrap_or(',');
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| CurateError::Config(format!("Invalid delimiter: {:?}", delimiter)))
}

/// Streaming rows of an open CSV source.
///
/// Every physical blank line yields an empty record, so the n-th item is
/// data row n even when the file has gaps.
pub struct CsvRows {
    headers: Vec<String>,
    reader: SourceReader,
    blank_rows: usize,
    pending: Option<Result<csv::StringRecord>>,
    done: bool,
}

impl std::fmt::Debug for CsvRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvRows")
            .field("headers", &self.headers)
            .field("blank_rows", &self.blank_rows)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl CsvRows {
    /// Header cells as read.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

impl Iterator for CsvRows {
    type Item = Result<csv::StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.blank_rows > 0 {
            self.blank_rows -= 1;
            return Some(Ok(csv::StringRecord::new()));
        }
        if let Some(item) = self.pending.take() {
            return Some(item);
        }
        if self.done {
            return None;
        }

        let mut record = csv::StringRecord::new();
        let item = match self.reader.read_record(&mut record) {
            Ok(true) => Some(Ok(record)),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => Some(Err(CurateError::from(e))),
        };

        // Line breaks consumed = blank lines + breaks inside quoted cells
        // + the record's own terminator.
        let end = self.reader.position().byte();
        let (breaks, terminated) = self.reader.get_mut().take_line_breaks(end);
        let inner: usize = match &item {
            Some(Ok(record)) => record.iter().map(count_line_breaks).sum(),
            _ => 0,
        };
        let own = usize::from(item.is_some() && terminated);
        self.blank_rows = breaks.saturating_sub(inner + own);

        if self.blank_rows > 0 {
            self.pending = item;
            return self.next();
        }
        item
    }
}

/// Line breaks in a cell, counting `\r\n` once.
fn count_line_breaks(cell: &str) -> usize {
    let bytes = cell.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\r' || (b == b'\n' && (i == 0 || bytes[i - 1] != b'\r')))
        .count()
}

/// A small table held in memory (the head of a CSV file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order). Rows may be shorter than the header.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(String::as_str))
    }

    /// All values of a column; missing cells read as empty.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

/// Whether `path` looks like a CSV file by extension.
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
