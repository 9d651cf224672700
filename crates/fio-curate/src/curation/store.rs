//! Run store - one run with its suggestions and review decisions.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CurateError, Result};
use crate::suggestion::{Run, Suggestion, SuggestionKey};

use super::decision::{Decision, DecisionStatus};
use super::repository::{insert_unique, upsert_decision, Repository};

/// Current version of the run store format.
pub const STORE_VERSION: &str = "1.0.0";

/// Counts of suggestions by decision status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionCounts {
    /// Not yet reviewed.
    pub proposed: usize,
    /// Approved as suggested.
    pub accepted: usize,
    /// Not approved.
    pub rejected: usize,
    /// Approved with a different value.
    pub edited: usize,
}

impl DecisionCounts {
    /// Total number of suggestions.
    pub fn total(&self) -> usize {
        self.proposed + self.accepted + self.rejected + self.edited
    }

    /// Number of decided suggestions.
    pub fn decided(&self) -> usize {
        self.accepted + self.rejected + self.edited
    }

    /// Number of approved suggestions (accepted or edited).
    pub fn approved(&self) -> usize {
        self.accepted + self.edited
    }
}

/// Summary of a run store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    /// ID of the stored run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Total number of suggestions.
    pub total_suggestions: usize,
    /// Suggestions by decision status.
    pub by_status: DecisionCounts,
}

/// A serializable document holding one run, its suggestions and the
/// decisions made on them. Sits next to the source CSV, which it never
/// modifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStore {
    /// Version of the store format.
    pub store_version: String,

    /// When the store was created.
    pub created_at: DateTime<Utc>,

    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,

    /// The run these suggestions belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<Run>,

    /// Generated suggestions.
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,

    /// Decisions made on suggestions.
    #[serde(default)]
    pub decisions: Vec<Decision>,

    #[serde(skip)]
    keys: HashSet<SuggestionKey>,
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            store_version: STORE_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            run: None,
            suggestions: Vec::new(),
            decisions: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Accept a suggestion as-is.
    pub fn accept(&mut self, suggestion_id: &str) -> Result<&Decision> {
        self.decide(Decision::accept(suggestion_id))
    }

    /// Reject a suggestion, optionally with notes.
    pub fn reject(&mut self, suggestion_id: &str, notes: Option<&str>) -> Result<&Decision> {
        let mut decision = Decision::reject(suggestion_id);
        if let Some(notes) = notes {
            decision = decision.with_notes(notes);
        }
        self.decide(decision)
    }

    /// Replace the suggested value with the reviewer's own.
    pub fn edit(&mut self, suggestion_id: &str, final_value: &str) -> Result<&Decision> {
        self.ensure_suggestion(suggestion_id)?;
        self.decide(Decision::edit(suggestion_id, final_value)?)
    }

    /// Suggestions without a decision (or still `proposed`).
    pub fn pending(&self) -> Vec<&Suggestion> {
        let decided: HashSet<&str> = self
            .decisions
            .iter()
            .filter(|d| d.status.is_decided())
            .map(|d| d.suggestion_id.as_str())
            .collect();

        self.suggestions
            .iter()
            .filter(|s| !decided.contains(s.id.as_str()))
            .collect()
    }

    /// Counts of suggestions by decision status.
    pub fn summary(&self) -> StoreSummary {
        let mut by_status = DecisionCounts {
            proposed: self.suggestions.len(),
            ..DecisionCounts::default()
        };

        for decision in &self.decisions {
            let slot = match decision.status {
                DecisionStatus::Proposed => continue,
                DecisionStatus::Accepted => &mut by_status.accepted,
                DecisionStatus::Rejected => &mut by_status.rejected,
                DecisionStatus::Edited => &mut by_status.edited,
            };
            *slot += 1;
            by_status.proposed = by_status.proposed.saturating_sub(1);
        }

        StoreSummary {
            run_id: self.run.as_ref().map(|r| r.id.clone()),
            total_suggestions: self.suggestions.len(),
            by_status,
        }
    }

    /// Get the decision for a specific suggestion.
    pub fn decision_for(&self, suggestion_id: &str) -> Option<&Decision> {
        self.decisions
            .iter()
            .find(|d| d.suggestion_id == suggestion_id)
    }

    /// Get a suggestion by ID.
    pub fn suggestion(&self, suggestion_id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == suggestion_id)
    }

    /// The value a reviewer approved for a suggestion: the suggested value
    /// when accepted, the reviewer's value when edited.
    pub fn final_value(&self, suggestion_id: &str) -> Option<&str> {
        let decision = self.decision_for(suggestion_id)?;
        match decision.status {
            DecisionStatus::Accepted => self.suggestion(suggestion_id).map(|s| s.suggested.as_str()),
            DecisionStatus::Edited => decision.final_value.as_deref(),
            DecisionStatus::Proposed | DecisionStatus::Rejected => None,
        }
    }

    /// Check if all suggestions have been decided.
    pub fn is_complete(&self) -> bool {
        self.pending().is_empty()
    }

    /// Get progress as a fraction (0.0 to 1.0).
    pub fn progress(&self) -> f64 {
        if self.suggestions.is_empty() {
            return 1.0;
        }
        self.summary().by_status.decided() as f64 / self.suggestions.len() as f64
    }

    /// Rebuild the uniqueness index after deserialization.
    pub(crate) fn rebuild_index(&mut self) -> Result<()> {
        self.keys.clear();
        for suggestion in &self.suggestions {
            insert_unique(&mut self.keys, suggestion)?;
        }
        Ok(())
    }

    fn ensure_suggestion(&self, suggestion_id: &str) -> Result<()> {
        if self.suggestion(suggestion_id).is_none() {
            return Err(CurateError::SuggestionNotFound(suggestion_id.to_string()));
        }
        Ok(())
    }

    /// Record a decision, replacing any earlier one for the same suggestion.
    pub fn decide(&mut self, decision: Decision) -> Result<&Decision> {
        let index = upsert_decision(&self.suggestions, &mut self.decisions, &decision)?;
        self.touch();
        Ok(&self.decisions[index])
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Repository for RunStore {
    fn save_run(&mut self, run: &Run) -> Result<()> {
        if let Some(existing) = &self.run {
            return Err(CurateError::Duplicate(format!(
                "Store already holds run '{}'",
                existing.id
            )));
        }
        self.run = Some(run.clone());
        self.touch();
        Ok(())
    }

    fn save_suggestion(&mut self, suggestion: &Suggestion) -> Result<()> {
        insert_unique(&mut self.keys, suggestion)?;
        self.suggestions.push(suggestion.clone());
        self.touch();
        Ok(())
    }

    fn save_decision(&mut self, decision: &Decision) -> Result<()> {
        self.decide(decision.clone()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryMeta;
    use crate::input::CsvSource;
    use crate::suggestion::{Selection, SuggestionField};

    fn store_with(rows: &[usize]) -> RunStore {
        let meta = DictionaryMeta {
            path: "names.csv".into(),
            sha256: "f".repeat(64),
            total_rows: 1,
            enabled_rows: 1,
            loaded_at: Utc::now(),
        };
        let run = Run::new(&CsvSource::new("people.csv"), Selection::single("ФИО"));

        let mut store = RunStore::new();
        store.save_run(&run).unwrap();
        for &row in rows {
            let sug = Suggestion::dictionary_variant(
                &run.id,
                row,
                SuggestionField::FioFirstName,
                "Маша",
                "Мария",
                &meta,
            );
            store.save_suggestion(&sug).unwrap();
        }
        store
    }

    #[test]
    fn test_decisions_and_summary() {
        let mut store = store_with(&[1, 2, 3, 4]);

        store.accept("sug_1_fio.first_name").unwrap();
        store.reject("sug_2_fio.first_name", Some("Не имя")).unwrap();
        store.edit("sug_3_fio.first_name", "Марья").unwrap();

        let summary = store.summary();
        assert_eq!(summary.total_suggestions, 4);
        assert_eq!(
            summary.by_status,
            DecisionCounts {
                proposed: 1,
                accepted: 1,
                rejected: 1,
                edited: 1
            }
        );
        assert_eq!(summary.by_status.approved(), 2);
        assert_eq!(store.pending().len(), 1);
        assert_eq!(store.pending()[0].row, 4);
        assert!((store.progress() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_final_value() {
        let mut store = store_with(&[1, 2, 3]);
        store.accept("sug_1_fio.first_name").unwrap();
        store.edit("sug_2_fio.first_name", "Марья").unwrap();
        store.reject("sug_3_fio.first_name", None).unwrap();

        assert_eq!(store.final_value("sug_1_fio.first_name"), Some("Мария"));
        assert_eq!(store.final_value("sug_2_fio.first_name"), Some("Марья"));
        assert_eq!(store.final_value("sug_3_fio.first_name"), None);
    }

    #[test]
    fn test_redecide_replaces() {
        let mut store = store_with(&[1]);
        store.reject("sug_1_fio.first_name", None).unwrap();
        let decision = store.accept("sug_1_fio.first_name").unwrap();

        assert_eq!(decision.status, DecisionStatus::Accepted);
        assert_eq!(store.decisions.len(), 1);
        assert!(store.is_complete());
    }

    #[test]
    fn test_unknown_suggestion() {
        let mut store = store_with(&[1]);
        assert!(matches!(
            store.accept("sug_9_fio.first_name"),
            Err(CurateError::SuggestionNotFound(_))
        ));
        assert!(matches!(
            store.edit("sug_9_fio.first_name", ""),
            Err(CurateError::SuggestionNotFound(_))
        ));
    }

    #[test]
    fn test_empty_edit() {
        let mut store = store_with(&[1]);
        assert!(matches!(
            store.edit("sug_1_fio.first_name", "  "),
            Err(CurateError::Validation(_))
        ));
        assert!(store.decisions.is_empty());
    }

    #[test]
    fn test_single_run_per_store() {
        let mut store = store_with(&[]);
        let other = Run::new(&CsvSource::new("other.csv"), Selection::single("ФИО"));
        assert!(matches!(store.save_run(&other), Err(CurateError::Duplicate(_))));
    }

    #[test]
    fn test_duplicate_suggestion() {
        let mut store = store_with(&[1]);
        let dup = store.suggestions[0].clone();
        assert!(matches!(store.save_suggestion(&dup), Err(CurateError::Duplicate(_))));
    }

    #[test]
    fn test_decision_counts() {
        let counts = DecisionCounts {
            proposed: 5,
            accepted: 3,
            rejected: 1,
            edited: 0,
        };
        assert_eq!(counts.total(), 9);
        assert_eq!(counts.decided(), 4);
        assert_eq!(counts.approved(), 3);
    }
}
