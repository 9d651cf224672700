//! Generation runs.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::CsvSource;

use super::selection::Selection;

/// One generation pass over a CSV file, with the inputs needed to
/// reproduce it. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Unique identifier for this run.
    pub id: String,

    /// Path of the source CSV file.
    pub source: PathBuf,

    /// Column selection, as given.
    pub selection: Selection,

    /// Declared or detected encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Declared or detected delimiter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,

    /// When the run was created.
    pub created_at: DateTime<Utc>,
}

impl Run {
    /// Record a new run over `source`.
    pub fn new(source: &CsvSource, selection: Selection) -> Self {
        let created_at = Utc::now();
        Self {
            id: generate_run_id(&created_at),
            source: source.path.clone(),
            selection,
            encoding: source.encoding.clone(),
            delimiter: source.delimiter,
            created_at,
        }
    }

    /// The CSV source this run reads.
    pub fn csv_source(&self) -> CsvSource {
        CsvSource {
            path: self.source.clone(),
            encoding: self.encoding.clone(),
            delimiter: self.delimiter,
        }
    }
}

/// Generate a unique run ID.
fn generate_run_id(created_at: &DateTime<Utc>) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!(
        "run_{}_{:03}",
        created_at.format("%Y%m%dT%H%M%S"),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}
