//! Safe (non-semantic) normalization of full-name values.
//!
//! The pipeline runs five rules in a fixed order and records which of them
//! actually changed the value:
//!
//! ```text
//! strip_invisible → normalize_punctuation → normalize_spaces → normalize_dash → title_case
//! ```
//!
//! Title casing never touches text inside parentheses and is skipped when the
//! value looks like it contains a word broken by a stray space.

mod rules;
mod title_case;
mod value;

pub use rules::Rule;
pub use value::{normalize, NormStatus, NormalizationResult};
