//! Quality classification of raw full-name values.
//!
//! Two independent checks run on the value *before* normalization:
//!
//! - **warnings** are informational and never change the normalized value;
//! - **review flags** block trust in the value: any flag turns the display
//!   status into `needs_review`.

mod flags;
mod status;
mod warnings;

pub use flags::{detect_flags, FlagThresholds, ReviewFlag};
pub use status::DisplayStatus;
pub use warnings::{detect_warnings, Warning, ATTENTION_LABEL_RU};
