//! Generate command - scan a CSV file for dictionary suggestions.

use std::path::PathBuf;

use colored::Colorize;
use fio_curate::curation::run_store_path;
use fio_curate::suggestion::{GenerationRequest, GeneratorConfig};
use fio_curate::Curator;
use tracing::info;

use super::resolve_source;
use crate::cli::{DialectArgs, SelectionArgs};

pub fn run(
    curator: Curator,
    file: PathBuf,
    dictionary: Option<PathBuf>,
    selection: SelectionArgs,
    dialect: DialectArgs,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = selection.selection()?;
    let source = resolve_source(&file, &dialect)?;

    let mut curator = match dictionary {
        Some(path) => {
            let config = curator.config().clone();
            Curator::with_config(config.with_generator(GeneratorConfig::new().with_dictionary(path)))
        }
        None => curator,
    };
    if curator.config().generator.dictionary_path.is_none() {
        return Err("No name dictionary given. Use --dictionary or set generator.dictionary_path in the config file.".into());
    }

    println!("{} {}", "Scanning".cyan().bold(), file.display().to_string().white());

    let request = GenerationRequest::new(source, selection);
    let (store, summary) = curator.generate(&request)?;

    let store_path = output.unwrap_or_else(|| run_store_path(&file));
    store.save(&store_path)?;
    info!(path = %store_path.display(), "run store saved");

    println!();
    println!("{}", "Run:".yellow().bold());
    println!("  ID:         {}", summary.run.id.white());
    println!("  Mode:       {}", summary.run.selection.mode());
    println!(
        "  Dictionary: {} ({} variants, sha256 {})",
        summary.dictionary.path.display(),
        summary.dictionary.enabled_rows,
        short_hash(&summary.dictionary.sha256).dimmed()
    );
    println!();

    let skipped = &summary.skipped;
    println!("{}", "Rows:".yellow().bold());
    println!("  Scanned:           {}", summary.rows_scanned.to_string().white());
    println!("  Suggestions:       {}", summary.suggestions.to_string().green().bold());
    println!("  No candidate:      {}", skipped.no_candidate);
    println!("  Not in dictionary: {}", skipped.not_in_dictionary);
    println!("  Already canonical: {}", skipped.already_canonical);
    if skipped.no_column > 0 {
        println!("  Missing column:    {}", skipped.no_column.to_string().yellow());
    }
    if skipped.malformed > 0 {
        println!("  Malformed:         {}", skipped.malformed.to_string().red());
    }
    println!();

    println!("Saved run store to {}", store_path.display().to_string().green());
    if summary.suggestions > 0 {
        println!(
            "Run {} to record decisions.",
            format!("fio-curate decide {} <SUGGESTION_ID> --accept", store_path.display())
                .cyan()
                .bold()
        );
    }

    Ok(())
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}
