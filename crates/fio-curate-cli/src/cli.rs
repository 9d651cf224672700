//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use fio_curate::Selection;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// fio-curate: safe normalization and dictionary review of Russian full names
#[derive(Parser)]
#[command(name = "fio-curate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format: pretty, compact or json
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow name values in trace logs (personal data)
    #[arg(long, global = true)]
    pub log_data: bool,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize and classify values given on the command line
    Normalize {
        /// Values to check
        #[arg(value_name = "VALUE", required = true)]
        values: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview normalization of the first rows of a CSV file
    Preview {
        /// Path to the CSV file
        #[arg(value_name = "CSV")]
        file: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        dialect: DialectArgs,

        /// Number of rows to preview
        #[arg(short = 'n', long)]
        rows: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a name dictionary and show its metadata
    Dict {
        /// Path to the dictionary CSV
        #[arg(value_name = "DICTIONARY")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate dictionary suggestions for a CSV file
    Generate {
        /// Path to the CSV file
        #[arg(value_name = "CSV")]
        file: PathBuf,

        /// Name dictionary (overrides the config file)
        #[arg(short, long, value_name = "PATH")]
        dictionary: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        dialect: DialectArgs,

        /// Output path for the run store (default: <csv>.run.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record a decision on a suggestion
    Decide {
        /// Path to the run store
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// Suggestion ID (e.g. sug_3_fio.first_name)
        #[arg(value_name = "SUGGESTION_ID")]
        id: String,

        /// Accept the suggested value
        #[arg(long, conflicts_with_all = ["reject", "edit"], required_unless_present_any = ["reject", "edit"])]
        accept: bool,

        /// Reject the suggestion
        #[arg(long, conflicts_with = "edit")]
        reject: bool,

        /// Replace the suggested value with your own
        #[arg(long, value_name = "VALUE")]
        edit: Option<String>,

        /// Notes explaining the decision
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show review progress of a run store
    Status {
        /// Path to the run store or its CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Which columns hold the name.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Column with the full name (single mode)
    #[arg(long, conflicts_with_all = ["last_name_column", "first_name_column", "middle_name_column"])]
    pub fio_column: Option<String>,

    /// Surname column (split mode)
    #[arg(long)]
    pub last_name_column: Option<String>,

    /// Given-name column (split mode)
    #[arg(long)]
    pub first_name_column: Option<String>,

    /// Patronymic column (split mode)
    #[arg(long)]
    pub middle_name_column: Option<String>,
}

impl SelectionArgs {
    /// Build and validate the selection.
    pub fn selection(&self) -> Result<Selection, Box<dyn std::error::Error>> {
        let selection = match &self.fio_column {
            Some(column) => Selection::single(column.as_str()),
            None => Selection::split(
                self.last_name_column.as_deref(),
                self.first_name_column.as_deref(),
                self.middle_name_column.as_deref(),
            ),
        };
        selection.validate().map_err(|_| {
            "Select the name columns with --fio-column, or with any of \
             --last-name-column, --first-name-column, --middle-name-column"
        })?;
        Ok(selection)
    }
}

/// CSV encoding and delimiter; sniffed from the file when omitted.
#[derive(Args, Debug, Clone, Default)]
pub struct DialectArgs {
    /// Encoding (utf-8, utf-8-sig, cp1251)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Field delimiter (use '\t' for tab)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "\\t" | "tab" => Ok('\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("Delimiter must be a single character, got '{}'", s)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert!(parse_delimiter(";;").is_err());
    }

    #[test]
    fn test_selection_args() {
        let single = SelectionArgs {
            fio_column: Some("ФИО".into()),
            ..Default::default()
        };
        assert_eq!(single.selection().unwrap(), Selection::single("ФИО"));

        let split = SelectionArgs {
            first_name_column: Some("Имя".into()),
            ..Default::default()
        };
        assert_eq!(split.selection().unwrap().mode(), "split");

        assert!(SelectionArgs::default().selection().is_err());
    }

    #[test]
    fn test_parse_decide() {
        let cli = Cli::try_parse_from(["fio-curate", "decide", "a.run.json", "sug_1_first_name", "--edit", "Мария"]).unwrap();
        match cli.command {
            Commands::Decide { edit, accept, .. } => {
                assert_eq!(edit.as_deref(), Some("Мария"));
                assert!(!accept);
            }
            _ => panic!("expected decide"),
        }

        assert!(Cli::try_parse_from(["fio-curate", "decide", "a.run.json", "sug_1_first_name"]).is_err());
        assert!(
            Cli::try_parse_from(["fio-curate", "decide", "a.run.json", "s", "--accept", "--reject"]).is_err()
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["fio-curate", "-vv", "normalize", "Иванов", "--log-format", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
