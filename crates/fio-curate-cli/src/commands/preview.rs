//! Preview command - show how the first rows would be normalized.

use std::path::PathBuf;

use colored::Colorize;
use fio_curate::quality::ATTENTION_LABEL_RU;
use fio_curate::{CurateConfig, Curator};
use tracing::trace;

use super::{delimiter_display, resolve_source, status_colored};
use crate::cli::{DialectArgs, SelectionArgs};
use crate::logging::redact_value;

pub fn run(
    curator: Curator,
    file: PathBuf,
    selection: SelectionArgs,
    dialect: DialectArgs,
    rows: Option<usize>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = selection.selection()?;
    let source = resolve_source(&file, &dialect)?;

    let curator = match rows {
        Some(rows) => {
            let config: CurateConfig = curator.config().clone();
            let preview = config.preview.clone().with_rows(rows);
            Curator::with_config(config.with_preview(preview))
        }
        None => curator,
    };

    let report = curator.preview(&source, &selection)?;

    if json_output {
        let output = serde_json::json!({
            "file": file.display().to_string(),
            "encoding": source.encoding,
            "delimiter": source.delimiter,
            "selection": selection,
            "preview": report.preview,
            "columns": report.columns,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let preview = &report.preview;
    println!("{} {}", "Preview of".cyan().bold(), file.display().to_string().white());
    println!(
        "  Encoding: {}, delimiter: {}, rows read: {}",
        source.encoding.as_deref().unwrap_or("utf-8"),
        delimiter_display(source.delimiter),
        preview.rows_read
    );
    println!();

    for item in &preview.items {
        trace!(row = item.row, column = %item.column, value = redact_value(&item.before), "preview item");

        let marker = if item.result.is_fixed() { "→".blue() } else { "=".dimmed() };
        println!(
            "{:>4}  {:<10} {} {} {}  [{}]",
            item.row,
            item.part.label_ru(),
            item.before,
            marker,
            item.result.after.white().bold(),
            status_colored(item.status)
        );
        if item.needs_attention() {
            println!("{:>16} {}: {}", "⚠".yellow(), ATTENTION_LABEL_RU, item.attention_reasons_ru());
        }
        if !item.flags.is_empty() {
            println!("{:>16} {}", "⚑".red(), item.comment_ru());
        }
    }
    println!();

    let stats = &preview.stats;
    println!("{}", "Summary:".yellow().bold());
    println!("  Values:       {}", stats.total.to_string().white());
    println!("  OK:           {} ({}%)", stats.ok.to_string().green(), stats.ok_pct);
    println!("  Normalized:   {} ({}%)", stats.fixed.to_string().blue(), stats.fixed_pct);
    println!("  Needs review: {} ({}%)", stats.needs_review.to_string().yellow(), stats.needs_review_pct);
    println!("  Warnings:     {} ({}%)", stats.attention.to_string().red(), stats.attention_pct);
    println!();

    let columns = &report.columns;
    println!("{}", "Columns:".yellow().bold());
    for (name, column) in &columns.stats {
        println!(
            "  {}: {}/{} filled ({}%)",
            name.white().bold(),
            column.filled_count,
            columns.rows_checked,
            column.fill_rate
        );
        if !column.examples.is_empty() {
            println!("    e.g. {}", column.examples.join(", ").dimmed());
        }
    }
    for warning in &columns.warnings {
        println!("  {} {}", "⚠".yellow(), warning);
    }

    Ok(())
}
