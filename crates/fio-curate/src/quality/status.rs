//! Display status combining normalization and review flags.

use serde::{Deserialize, Serialize};

use crate::normalize::{NormStatus, NormalizationResult};

use super::flags::ReviewFlag;

/// Status shown to a reviewer for one value.
///
/// Any review flag overrides the normalizer's `ok`/`fixed` outcome. The
/// normalization result itself is not changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Ok,
    Fixed,
    NeedsReview,
}

impl DisplayStatus {
    /// Derive the display status from a normalization result and its flags.
    pub fn derive(result: &NormalizationResult, flags: &[ReviewFlag]) -> Self {
        if !flags.is_empty() {
            return DisplayStatus::NeedsReview;
        }
        match result.status {
            NormStatus::Ok => DisplayStatus::Ok,
            NormStatus::Fixed => DisplayStatus::Fixed,
        }
    }

    /// Stable status code.
    pub fn code(&self) -> &'static str {
        match self {
            DisplayStatus::Ok => "ok",
            DisplayStatus::Fixed => "fixed",
            DisplayStatus::NeedsReview => "needs_review",
        }
    }

    /// Russian label shown to reviewers.
    pub fn label_ru(&self) -> &'static str {
        match self {
            DisplayStatus::Ok => "ок",
            DisplayStatus::Fixed => "нормализовано",
            DisplayStatus::NeedsReview => "требует проверки",
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
