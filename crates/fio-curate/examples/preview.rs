//! Example: Preview normalization of a name column.
//!
//! Usage:
//!   cargo run --example preview -- <csv_path> <fio_column>
//!
//! Example:
//!   cargo run --example preview -- people.csv ФИО

use std::env;

use fio_curate::input::sniff;
use fio_curate::{Curator, Selection};

fn main() -> fio_curate::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example preview -- <csv_path> <fio_column>");
        std::process::exit(1);
    }

    let sniffed = sniff(&args[1])?;
    let source = sniffed.source(&args[1]);
    println!("Encoding: {}, delimiter: {:?}", sniffed.encoding, sniffed.delimiter);

    let report = Curator::new().preview(&source, &Selection::single(args[2].as_str()))?;

    for item in &report.preview.items {
        println!(
            "{:>4}  {:<30} -> {:<30} {}",
            item.row,
            item.before,
            item.result.after,
            item.status.label_ru()
        );
    }

    let stats = &report.preview.stats;
    println!();
    println!(
        "ok {} ({}%), fixed {} ({}%), needs review {} ({}%)",
        stats.ok, stats.ok_pct, stats.fixed, stats.fixed_pct, stats.needs_review, stats.needs_review_pct
    );

    Ok(())
}
