//! fio-curate: safe normalization and dictionary-backed review of Russian
//! full names ("FIO": surname, given name, patronymic) in CSV exports.
//!
//! Every output is advisory and paired with the original value: source data
//! is never modified.
//!
//! # Core Principles
//!
//! - **Safe normalization**: only invisible characters, punctuation,
//!   whitespace, dashes and letter case are touched; name parts are never
//!   reordered and parenthesized annotations are kept verbatim
//! - **Explicit review**: quality problems are reported as warnings and
//!   review flags, never fixed silently
//! - **Full provenance**: every suggestion records the run, the dictionary
//!   snapshot hash and the generator version
//!
//! # Example
//!
//! ```
//! use fio_curate::normalize::{normalize, NormStatus, Rule};
//!
//! let result = normalize("  ИВАНОВ   иВАН  ");
//! assert_eq!(result.after, "Иванов Иван");
//! assert_eq!(result.status, NormStatus::Fixed);
//! assert_eq!(result.applied_rules, vec![Rule::NormalizeSpaces, Rule::TitleCase]);
//! ```

pub mod config;
pub mod curation;
pub mod dictionary;
pub mod error;
pub mod input;
pub mod normalize;
pub mod preview;
pub mod quality;
pub mod suggestion;

mod curator;
mod text;

pub use crate::curator::{Curator, PreviewReport, ValueCheck};
pub use config::CurateConfig;
pub use error::{CurateError, Result};
pub use normalize::{normalize, NormalizationResult};
pub use quality::{detect_flags, detect_warnings, DisplayStatus};
pub use suggestion::{Selection, Suggestion};
