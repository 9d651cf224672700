//! Dict command - load a name dictionary and report its snapshot.

use std::path::PathBuf;

use colored::Colorize;
use fio_curate::dictionary::NameDictionary;

/// Variants listed in human output.
const SAMPLE_SIZE: usize = 10;

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = NameDictionary::load(&file)?;
    let meta = dictionary.meta();

    if json_output {
        let output = serde_json::json!({
            "meta": meta,
            "variants": dictionary.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", "Dictionary".cyan().bold(), meta.path.display().to_string().white());
    println!("  SHA-256:      {}", meta.sha256.dimmed());
    println!("  Rows:         {}", meta.total_rows);
    println!("  Enabled rows: {}", meta.enabled_rows.to_string().green());
    println!("  Variants:     {}", dictionary.len().to_string().white().bold());
    println!();

    if dictionary.is_empty() {
        println!("{}", "No enabled variants; generation will produce no suggestions.".yellow());
        return Ok(());
    }

    println!("{}", "Sample:".yellow().bold());
    for (variant, canonical) in dictionary.iter().take(SAMPLE_SIZE) {
        println!("  {} → {}", variant, canonical.green());
    }
    if dictionary.len() > SAMPLE_SIZE {
        println!("  {}", format!("... and {} more", dictionary.len() - SAMPLE_SIZE).dimmed());
    }

    Ok(())
}
