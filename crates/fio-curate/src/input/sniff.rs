//! Encoding and delimiter detection from the head of a file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CurateError, Result};

use super::encoding::{decode_sample, resolve_encoding, sniff_encoding};
use super::source::CsvSource;

/// Bytes read from the start of a file for detection.
pub const SNIFF_BYTES: usize = 8192;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[char] = &['\t', ',', ';', '|'];

/// Detected dialect of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sniffed {
    /// Encoding label (`utf-8`, `utf-8-sig` or `cp1251`).
    pub encoding: String,
    /// Field delimiter.
    pub delimiter: char,
}

impl Sniffed {
    /// Build a source for `path` with the detected dialect.
    pub fn source(&self, path: impl AsRef<Path>) -> CsvSource {
        CsvSource::new(path.as_ref())
            .with_encoding(self.encoding.clone())
            .with_delimiter(self.delimiter)
    }
}

/// Detect encoding and delimiter from the first [`SNIFF_BYTES`] of a file.
pub fn sniff(path: impl AsRef<Path>) -> Result<Sniffed> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CurateError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| CurateError::io(path, e))?;
    let mut sample = Vec::with_capacity(SNIFF_BYTES);
    file.take(SNIFF_BYTES as u64)
        .read_to_end(&mut sample)
        .map_err(|e| CurateError::io(path, e))?;

    if sample.is_empty() {
        return Err(CurateError::EmptyData(format!(
            "File '{}' is empty",
            path.display()
        )));
    }

    let encoding = sniff_encoding(&sample);
    let text = decode_sample(&sample, resolve_encoding(Some(encoding))?);
    let delimiter = detect_delimiter(&text)?;

    Ok(Sniffed {
        encoding: encoding.to_string(),
        delimiter,
    })
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(text: &str) -> Result<char> {
    let lines: Vec<&str> = text
        .lines()
        .take(10)
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(CurateError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = ',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat a high count on one line.
        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        let score = if consistent {
            first_count * 1000 + (if delim == '\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: char) -> usize {
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
