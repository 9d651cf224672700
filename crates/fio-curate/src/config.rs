//! Library configuration, loadable from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CurateError, Result};
use crate::preview::PreviewConfig;
use crate::quality::FlagThresholds;
use crate::suggestion::GeneratorConfig;

/// Configuration for a [`Curator`](crate::Curator).
///
/// Every section is optional in the file; missing sections take their
/// defaults.
///
/// ```json
/// {
///   "generator": { "dictionary_path": "data/names.csv" },
///   "flags": { "max_words": 4 },
///   "preview": { "rows": 50 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurateConfig {
    /// Suggestion generator settings.
    pub generator: GeneratorConfig,
    /// Review flag thresholds.
    pub flags: FlagThresholds,
    /// Preview settings.
    pub preview: PreviewConfig,
}

impl CurateConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CurateError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| CurateError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CurateError::Config(format!("Invalid config '{}': {}", path.display(), e))
        })
    }

    /// Set the generator configuration.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Set the review flag thresholds.
    pub fn with_flags(mut self, flags: FlagThresholds) -> Self {
        self.flags = flags;
        self
    }

    /// Set the preview configuration.
    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }
}
