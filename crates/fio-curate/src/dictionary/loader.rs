//! Loading the canonical names dictionary from CSV.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{CurateError, Result};

/// Columns the dictionary header must consist of, in any order.
pub const REQUIRED_COLUMNS: [&str; 5] = ["canonical", "variant", "enabled", "note", "source"];

/// Value of the `enabled` column that activates a row.
const ENABLED: &str = "1";

/// Chunk size used when hashing the dictionary file.
const HASH_CHUNK_SIZE: usize = 1024 * 1024;

/// Snapshot metadata captured once per load, for audit and reproducibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryMeta {
    /// Path the dictionary was loaded from.
    pub path: PathBuf,
    /// SHA-256 of the raw file bytes (lowercase hex).
    pub sha256: String,
    /// Data rows seen, valid or not.
    pub total_rows: usize,
    /// Rows that were enabled and complete.
    pub enabled_rows: usize,
    /// When the snapshot was loaded.
    pub loaded_at: DateTime<Utc>,
}

/// Immutable `variant → canonical` mapping of given names.
#[derive(Debug, Clone)]
pub struct NameDictionary {
    variants: IndexMap<String, String>,
    meta: DictionaryMeta,
}

impl NameDictionary {
    /// Load a dictionary file.
    ///
    /// Only rows with `enabled == "1"` and non-empty `canonical` and
    /// `variant` participate. When a variant appears more than once, the
    /// first enabled occurrence wins.
    ///
    /// # Errors
    ///
    /// - [`CurateError::NotFound`] if the file does not exist.
    /// - [`CurateError::Validation`] if the header is not exactly the set of
    ///   [`REQUIRED_COLUMNS`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fio_curate::dictionary::NameDictionary;
    ///
    /// let dict = NameDictionary::load("names.csv").unwrap();
    /// println!("{} variants, sha256 {}", dict.len(), dict.meta().sha256);
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CurateError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let sha256 = sha256_file(path)?;

        let file = File::open(path).map_err(|e| CurateError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{FEFF}') } else { h };
                h.to_string()
            })
            .collect();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut variants = IndexMap::new();
        let mut total_rows = 0;
        let mut enabled_rows = 0;

        for record in reader.records() {
            let record = record?;
            total_rows += 1;

            let field = |idx: usize| record.get(idx).unwrap_or("").trim();
            let canonical = field(columns.canonical);
            let variant = field(columns.variant);

            if canonical.is_empty() || variant.is_empty() || field(columns.enabled) != ENABLED {
                continue;
            }

            enabled_rows += 1;
            if variants.contains_key(variant) {
                debug!(row = total_rows, "duplicate dictionary variant ignored");
                continue;
            }
            variants.insert(variant.to_string(), canonical.to_string());
        }

        let meta = DictionaryMeta {
            path: path.to_path_buf(),
            sha256,
            total_rows,
            enabled_rows,
            loaded_at: Utc::now(),
        };

        info!(
            path = %meta.path.display(),
            sha256 = %meta.sha256,
            total_rows,
            enabled_rows,
            variants = variants.len(),
            "loaded names dictionary"
        );

        Ok(Self { variants, meta })
    }

    /// Canonical form of `variant`, looked up verbatim.
    pub fn lookup(&self, variant: &str) -> Option<&str> {
        self.variants.get(variant).map(String::as_str)
    }

    /// Number of distinct variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether no variant is mapped.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Snapshot metadata.
    pub fn meta(&self) -> &DictionaryMeta {
        &self.meta
    }

    /// Iterate `(variant, canonical)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variants.iter().map(|(v, c)| (v.as_str(), c.as_str()))
    }
}

/// Positions of the required columns in the header.
struct ColumnIndex {
    canonical: usize,
    variant: usize,
    enabled: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self> {
        let mut got: Vec<&str> = headers.iter().map(String::as_str).collect();
        got.sort_unstable();
        let mut expected = REQUIRED_COLUMNS.to_vec();
        expected.sort_unstable();

        if got != expected {
            return Err(CurateError::Validation(format!(
                "Invalid names dictionary header. Expected columns: {:?}; got: {:?}",
                expected, headers
            )));
        }

        let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
        Ok(Self {
            canonical: position("canonical"),
            variant: position("variant"),
            enabled: position("enabled"),
        })
    }
}

/// SHA-256 of a file, streamed in fixed-size chunks.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| CurateError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|e| CurateError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
