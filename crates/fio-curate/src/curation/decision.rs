//! Decision tracking for suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CurateError, Result};

/// Status of a decision on a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Not yet reviewed.
    Proposed,
    /// Approved as suggested.
    Accepted,
    /// Not approved.
    Rejected,
    /// Approved with a different final value.
    Edited,
}

impl DecisionStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStatus::Proposed => "Proposed",
            DecisionStatus::Accepted => "Accepted",
            DecisionStatus::Rejected => "Rejected",
            DecisionStatus::Edited => "Edited",
        }
    }

    /// Check if this is a terminal decision (not proposed).
    pub fn is_decided(&self) -> bool {
        !matches!(self, DecisionStatus::Proposed)
    }

    /// Check if this is an approval (accepted or edited).
    pub fn is_approved(&self) -> bool {
        matches!(self, DecisionStatus::Accepted | DecisionStatus::Edited)
    }
}

/// A reviewer's decision on a suggestion.
///
/// Kept apart from the suggestion itself, which is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// ID of the suggestion this decision addresses.
    pub suggestion_id: String,

    /// Current status of the decision.
    pub status: DecisionStatus,

    /// Value chosen by the reviewer (for Edited status).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_value: Option<String>,

    /// When the decision was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,

    /// Optional notes explaining the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Decision {
    /// Create a proposed (undecided) decision for a suggestion.
    pub fn proposed(suggestion_id: impl Into<String>) -> Self {
        Self {
            suggestion_id: suggestion_id.into(),
            status: DecisionStatus::Proposed,
            final_value: None,
            decided_at: None,
            notes: None,
        }
    }

    /// Create an acceptance decision.
    pub fn accept(suggestion_id: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Accepted,
            decided_at: Some(Utc::now()),
            ..Self::proposed(suggestion_id)
        }
    }

    /// Create a rejection decision.
    pub fn reject(suggestion_id: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Rejected,
            decided_at: Some(Utc::now()),
            ..Self::proposed(suggestion_id)
        }
    }

    /// Create an edit decision with the reviewer's own value.
    ///
    /// The value is trimmed; an empty value is a validation error.
    pub fn edit(suggestion_id: impl Into<String>, final_value: &str) -> Result<Self> {
        let final_value = final_value.trim();
        if final_value.is_empty() {
            return Err(CurateError::Validation(
                "Edited value must not be empty".to_string(),
            ));
        }

        Ok(Self {
            status: DecisionStatus::Edited,
            final_value: Some(final_value.to_string()),
            decided_at: Some(Utc::now()),
            ..Self::proposed(suggestion_id)
        })
    }

    /// Set the decision notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_proposed_decision() {
        let dec = Decision::proposed("sug_1_first_name");

        assert_eq!(dec.suggestion_id, "sug_1_first_name");
        assert_eq!(dec.status, DecisionStatus::Proposed);
        assert!(dec.decided_at.is_none());
    }

    #[test]
    fn test_accept_decision() {
        let dec = Decision::accept("sug_1_first_name");

        assert_eq!(dec.status, DecisionStatus::Accepted);
        assert!(dec.decided_at.is_some());
        assert!(dec.final_value.is_none());
    }

    #[test]
    fn test_reject_decision() {
        let dec = Decision::reject("sug_2_first_name").with_notes("Это фамилия");

        assert_eq!(dec.status, DecisionStatus::Rejected);
        assert_eq!(dec.notes, Some("Это фамилия".to_string()));
    }

    #[test]
    fn test_edit_decision() {
        let dec = Decision::edit("sug_3_first_name", " Марья ").unwrap();

        assert_eq!(dec.status, DecisionStatus::Edited);
        assert_eq!(dec.final_value.as_deref(), Some("Марья"));
    }

    #[test]
    fn test_edit_requires_value() {
        assert!(matches!(
            Decision::edit("sug_3_first_name", "  "),
            Err(CurateError::Validation(_))
        ));
    }

    #[test]
    fn test_decision_status_checks() {
        assert!(!DecisionStatus::Proposed.is_decided());
        assert!(DecisionStatus::Accepted.is_decided());
        assert!(DecisionStatus::Rejected.is_decided());

        assert!(DecisionStatus::Accepted.is_approved());
        assert!(DecisionStatus::Edited.is_approved());
        assert!(!DecisionStatus::Rejected.is_approved());
        assert!(!DecisionStatus::Proposed.is_approved());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&Decision::accept("s")).unwrap();
        assert!(json.contains(r#""status":"accepted""#));
        assert!(!json.contains("final_value"));
    }
}
