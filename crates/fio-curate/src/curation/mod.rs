//! Run storage and review decisions.
//!
//! Generated records go through the [`Repository`] trait, which enforces
//! suggestion uniqueness. A [`RunStore`] is a JSON document holding one run,
//! its suggestions and the decisions made on them. It sits alongside the
//! source CSV without modifying it.
//!
//! # Overview
//!
//! ```text
//! data/
//! ├── people.csv              # Original data (never modified)
//! └── people.run.json         # Run store
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use fio_curate::curation::{run_store_path, RunStore};
//! use fio_curate::input::CsvSource;
//! use fio_curate::suggestion::{GenerationRequest, Selection, SuggestionGenerator};
//!
//! let request = GenerationRequest::new(CsvSource::new("people.csv"), Selection::single("ФИО"));
//! let mut store = RunStore::new();
//! SuggestionGenerator::new("names.csv")
//!     .generate(&request, &mut store)
//!     .unwrap();
//!
//! // Review and decide on suggestions
//! store.accept("sug_1_fio.first_name").unwrap();
//! store.reject("sug_2_fio.first_name", Some("Это фамилия")).unwrap();
//!
//! // Persist
//! store.save(run_store_path("people.csv")).unwrap();
//!
//! // Later, load and continue
//! let store = RunStore::load("people.run.json").unwrap();
//! println!("Pending: {}", store.pending().len());
//! ```

mod decision;
mod persistence;
mod repository;
mod store;

pub use decision::{Decision, DecisionStatus};
pub use persistence::run_store_path;
pub use repository::{MemoryRepository, Repository};
pub use store::{DecisionCounts, RunStore, StoreSummary, STORE_VERSION};
