//! Status command - show review progress of a run store.

use std::path::PathBuf;

use colored::Colorize;
use fio_curate::curation::{run_store_path, RunStore};
use fio_curate::input::is_csv_path;

/// Pending suggestions listed in human output.
const PENDING_SHOWN: usize = 20;

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = if is_csv_path(&file) {
        run_store_path(&file)
    } else {
        file.clone()
    };

    if !store_path.exists() {
        return Err(format!(
            "Run store not found: {}\nRun 'fio-curate generate {}' first.",
            store_path.display(),
            file.display()
        )
        .into());
    }

    let store = RunStore::load(&store_path)?;
    let summary = store.summary();

    if json_output {
        let status = serde_json::json!({
            "store": store_path.display().to_string(),
            "run": store.run,
            "progress": store.progress(),
            "summary": summary,
            "pending": store.pending().iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            "is_complete": store.is_complete(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{} {}", "Review status for".cyan().bold(), store_path.display().to_string().white());
    if let Some(run) = &store.run {
        println!("  Run {} on {}", run.id.white(), run.source.display());
    }
    println!();

    let progress = store.progress();
    let total = summary.total_suggestions;
    let decided = summary.by_status.decided();
    let bar_width = 30;
    let filled = (progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Progress: {} {}/{} ({:.0}%)",
        bar.cyan(),
        decided.to_string().white().bold(),
        total,
        progress * 100.0
    );
    println!();

    let counts = &summary.by_status;
    println!("{}", "Decisions:".yellow().bold());
    println!("  Pending:  {}", counts.proposed.to_string().white());
    println!("  Accepted: {}", counts.accepted.to_string().green());
    println!("  Edited:   {}", counts.edited.to_string().blue());
    println!("  Rejected: {}", counts.rejected.to_string().red());
    println!();

    let pending = store.pending();
    if pending.is_empty() {
        println!("{}", "All suggestions reviewed!".green().bold());
        return Ok(());
    }

    println!("{}", "Pending:".yellow().bold());
    for suggestion in pending.iter().take(PENDING_SHOWN) {
        println!(
            "  {}  {} → {}",
            suggestion.id.dimmed(),
            suggestion.before,
            suggestion.suggested.green()
        );
    }
    if pending.len() > PENDING_SHOWN {
        println!("  {}", format!("... and {} more", pending.len() - PENDING_SHOWN).dimmed());
    }
    println!();
    println!(
        "Run {} to record a decision.",
        format!("fio-curate decide {} <SUGGESTION_ID> --accept", store_path.display())
            .cyan()
            .bold()
    );

    Ok(())
}
