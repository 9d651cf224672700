//! Persistence for run stores - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CurateError, Result};

use super::store::RunStore;

impl RunStore {
    /// Save the store to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use fio_curate::curation::RunStore;
    /// # fn example(store: &RunStore) -> fio_curate::Result<()> {
    /// store.save("people.run.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CurateError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            CurateError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            CurateError::Persistence(format!("Failed to serialize run store: {}", e))
        })?;

        debug!(path = %path.display(), suggestions = self.suggestions.len(), "saved run store");
        Ok(())
    }

    /// Load a store from a JSON file.
    ///
    /// Fails with [`CurateError::Duplicate`] if the file holds two
    /// suggestions with the same uniqueness key.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use fio_curate::curation::RunStore;
    /// let store = RunStore::load("people.run.json").unwrap();
    /// println!("Pending: {}", store.pending().len());
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CurateError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| {
            CurateError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let mut store: RunStore = serde_json::from_reader(reader).map_err(|e| {
            CurateError::Persistence(format!(
                "Failed to parse run store '{}': {}",
                path.display(),
                e
            ))
        })?;
        store.rebuild_index()?;

        Ok(store)
    }
}

/// Default run store path for a CSV file.
///
/// # Example
///
/// ```
/// use fio_curate::curation::run_store_path;
///
/// let path = run_store_path("data/people.csv");
/// assert_eq!(path.to_string_lossy(), "data/people.run.json");
/// ```
pub fn run_store_path(csv_path: impl AsRef<Path>) -> PathBuf {
    let csv_path = csv_path.as_ref();
    let stem = csv_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = csv_path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.run.json", stem))
}
