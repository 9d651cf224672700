//! fio-curate CLI - safe normalization and dictionary review of Russian
//! full names in CSV exports.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use fio_curate::{CurateConfig, Curator};
use logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let result = load_curator(&cli).and_then(|curator| run(cli.command, curator));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_curator(cli: &Cli) -> Result<Curator, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => CurateConfig::from_file(path)?,
        None => CurateConfig::default(),
    };
    Ok(Curator::with_config(config))
}

fn run(command: Commands, curator: Curator) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Normalize { values, json } => commands::normalize::run(&curator, values, json),

        Commands::Preview {
            file,
            selection,
            dialect,
            rows,
            json,
        } => commands::preview::run(curator, file, selection, dialect, rows, json),

        Commands::Dict { file, json } => commands::dict::run(file, json),

        Commands::Generate {
            file,
            dictionary,
            selection,
            dialect,
            output,
        } => commands::generate::run(curator, file, dictionary, selection, dialect, output),

        Commands::Decide {
            store,
            id,
            accept,
            reject,
            edit,
            notes,
        } => commands::decide::run(store, id, accept, reject, edit, notes),

        Commands::Status { file, json } => commands::status::run(file, json),
    }
}
