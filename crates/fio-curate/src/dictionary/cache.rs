//! Reuse of loaded dictionary snapshots across runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;

use super::loader::{sha256_file, NameDictionary};

/// Caches loaded dictionaries by path.
///
/// A cached snapshot is only handed out again after the file's hash has been
/// recomputed and found unchanged; otherwise the file is reloaded.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    entries: HashMap<PathBuf, Arc<NameDictionary>>,
}

impl DictionaryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for `path`, loading or reloading it when
    /// missing or stale.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>) -> Result<Arc<NameDictionary>> {
        let path = path.as_ref();

        if let Some(cached) = self.entries.get(path) {
            let current = sha256_file(path)?;
            if current == cached.meta().sha256 {
                debug!(path = %path.display(), "reusing cached dictionary");
                return Ok(Arc::clone(cached));
            }
            info!(path = %path.display(), "dictionary changed on disk, reloading");
        }

        let dict = Arc::new(NameDictionary::load(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&dict));
        Ok(dict)
    }

    /// Number of cached snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached snapshots.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "canonical,variant,enabled,note,source\n";

    #[test]
    fn test_unchanged_file_is_reused() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}Иван,Ваня,1,,manual").unwrap();

        let mut cache = DictionaryCache::new();
        let a = cache.get_or_load(file.path()).unwrap();
        let b = cache.get_or_load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_file_is_reloaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}Иван,Ваня,1,,manual").unwrap();
        file.flush().unwrap();

        let mut cache = DictionaryCache::new();
        let a = cache.get_or_load(file.path()).unwrap();

        writeln!(file, "Мария,Маша,1,,manual").unwrap();
        file.flush().unwrap();
        let b = cache.get_or_load(file.path()).unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.meta().sha256, b.meta().sha256);
        assert_eq!(b.lookup("Маша"), Some("Мария"));
        assert_eq!(a.lookup("Маша"), None);
    }
}
