//! Storage boundary for runs, suggestions and decisions.

use std::collections::HashSet;

use crate::error::{CurateError, Result};
use crate::suggestion::{Run, Suggestion, SuggestionKey};

use super::decision::Decision;

/// Where generated records go.
///
/// Implementations enforce the suggestion uniqueness invariant: at most one
/// suggestion per (run, row, field, code, suggested value).
pub trait Repository {
    /// Store a run record.
    fn save_run(&mut self, run: &Run) -> Result<()>;

    /// Store a suggestion.
    ///
    /// Fails with [`CurateError::Duplicate`] when a suggestion with the same
    /// [`SuggestionKey`] already exists.
    fn save_suggestion(&mut self, suggestion: &Suggestion) -> Result<()>;

    /// Store a decision, replacing any earlier decision on the same
    /// suggestion.
    fn save_decision(&mut self, decision: &Decision) -> Result<()>;
}

/// In-process repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    runs: Vec<Run>,
    suggestions: Vec<Suggestion>,
    decisions: Vec<Decision>,
    keys: HashSet<SuggestionKey>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored runs, in insertion order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Stored suggestions, in insertion order.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Stored decisions.
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Suggestions belonging to one run.
    pub fn suggestions_for(&self, run_id: &str) -> impl Iterator<Item = &Suggestion> {
        self.suggestions.iter().filter(move |s| s.run_id == run_id)
    }
}

impl Repository for MemoryRepository {
    fn save_run(&mut self, run: &Run) -> Result<()> {
        if self.runs.iter().any(|r| r.id == run.id) {
            return Err(CurateError::Duplicate(format!("Run '{}'", run.id)));
        }
        self.runs.push(run.clone());
        Ok(())
    }

    fn save_suggestion(&mut self, suggestion: &Suggestion) -> Result<()> {
        insert_unique(&mut self.keys, suggestion)?;
        self.suggestions.push(suggestion.clone());
        Ok(())
    }

    fn save_decision(&mut self, decision: &Decision) -> Result<()> {
        upsert_decision(&self.suggestions, &mut self.decisions, decision).map(|_| ())
    }
}

/// Record the key of `suggestion`, failing if it is already present.
pub(crate) fn insert_unique(keys: &mut HashSet<SuggestionKey>, suggestion: &Suggestion) -> Result<()> {
    let key = suggestion.key();
    if keys.contains(&key) {
        return Err(CurateError::Duplicate(format!(
            "Suggestion for run '{}', row {}, field '{}', code {}, value «{}»",
            key.run_id,
            key.row,
            key.field.code(),
            key.code.code(),
            key.suggested
        )));
    }
    keys.insert(key);
    Ok(())
}

/// Insert or replace the decision for an existing suggestion. Returns the
/// decision's index.
pub(crate) fn upsert_decision(
    suggestions: &[Suggestion],
    decisions: &mut Vec<Decision>,
    decision: &Decision,
) -> Result<usize> {
    if !suggestions.iter().any(|s| s.id == decision.suggestion_id) {
        return Err(CurateError::SuggestionNotFound(decision.suggestion_id.clone()));
    }

    match decisions
        .iter()
        .position(|d| d.suggestion_id == decision.suggestion_id)
    {
        Some(index) => {
            decisions[index] = decision.clone();
            Ok(index)
        }
        None => {
            decisions.push(decision.clone());
            Ok(decisions.len() - 1)
        }
    }
}
