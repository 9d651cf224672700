//! Canonical given-name dictionary.
//!
//! The dictionary is an external CSV file with exactly these columns:
//!
//! ```text
//! canonical,variant,enabled,note,source
//! Мария,Маша,1,diminutive,manual
//! ```
//!
//! It is loaded once per run, hashed for provenance, and never modified.

mod cache;
mod loader;

pub use cache::DictionaryCache;
pub use loader::{sha256_file, DictionaryMeta, NameDictionary, REQUIRED_COLUMNS};
