//! Decide command - accept, reject or edit one suggestion.

use std::path::PathBuf;

use colored::Colorize;
use fio_curate::curation::{Decision, DecisionStatus, RunStore};
use tracing::{info, trace};

use crate::logging::redact_value;

pub fn run(
    store_path: PathBuf,
    id: String,
    accept: bool,
    reject: bool,
    edit: Option<String>,
    notes: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RunStore::load(&store_path)?;

    let Some(suggestion) = store.suggestion(&id) else {
        return Err(format!(
            "Suggestion '{}' not found in {}\nRun 'fio-curate status {}' to list pending suggestions.",
            id,
            store_path.display(),
            store_path.display()
        )
        .into());
    };
    trace!(
        id = %id,
        before = redact_value(&suggestion.before),
        suggested = redact_value(&suggestion.suggested),
        "deciding"
    );

    let mut decision = match (accept, reject, edit) {
        (true, _, _) => Decision::accept(id.as_str()),
        (_, true, _) => Decision::reject(id.as_str()),
        (_, _, Some(value)) => Decision::edit(id.as_str(), &value)?,
        _ => return Err("Choose one of --accept, --reject or --edit".into()),
    };
    if let Some(notes) = notes {
        decision = decision.with_notes(notes);
    }

    let status = store.decide(decision)?.status;
    store.save(&store_path)?;
    info!(id = %id, status = status.label(), "decision recorded");

    let label = match status {
        DecisionStatus::Accepted => "accepted".green().bold(),
        DecisionStatus::Rejected => "rejected".red().bold(),
        DecisionStatus::Edited => "edited".blue().bold(),
        DecisionStatus::Proposed => "proposed".white(),
    };
    println!("{} {}", id.white(), label);
    if let Some(value) = store.final_value(&id) {
        println!("  Final value: {}", value.white().bold());
    }

    let pending = store.pending().len();
    if pending == 0 {
        println!("{}", "All suggestions reviewed!".green().bold());
    } else {
        println!("  {} suggestion(s) still pending", pending.to_string().yellow());
    }

    Ok(())
}
