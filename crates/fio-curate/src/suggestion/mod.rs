//! Dictionary-backed name suggestions.
//!
//! A [`SuggestionGenerator`] streams a CSV file, pulls a candidate given name
//! out of each row through a [`CandidateExtractor`] and records a
//! [`Suggestion`] whenever the name dictionary maps the candidate to a
//! different canonical form. Suggestions are advisory; nothing is applied.

mod extract;
mod generator;
mod run;
mod selection;
mod suggestion;

pub use extract::{CandidateExtractor, SecondToken, SplitColumn};
pub use generator::{GenerationRequest, GeneratorConfig, RunSummary, SkipCounts, SuggestionGenerator};
pub use run::Run;
pub use selection::{NamePart, Selection};
pub use suggestion::{
    suggestion_id, Confidence, Evidence, Suggestion, SuggestionCode, SuggestionField, SuggestionKey,
    GENERATOR_ID, GENERATOR_VERSION,
};
