//! Normalize command - check values given on the command line.

use colored::Colorize;
use fio_curate::Curator;

use super::status_colored;

pub fn run(curator: &Curator, values: Vec<String>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let checks: Vec<_> = values.iter().map(|v| curator.check(v.as_str())).collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&checks)?);
        return Ok(());
    }

    for check in &checks {
        let before = check.result.before.as_str().unwrap_or_default();
        println!("{} {}", "Before:".dimmed(), before);
        println!("{} {}", "After: ".dimmed(), check.result.after.white().bold());
        println!("  Status: {}", status_colored(check.status));

        if !check.result.applied_rules.is_empty() {
            println!("  Rules:  {}", check.result.rules_display().cyan());
        }
        for warning in &check.warnings {
            println!("  {} {}", "⚠".yellow(), warning.label_ru());
        }
        for flag in &check.flags {
            println!("  {} {}", "⚑".red(), flag.label_ru());
        }
        println!();
    }

    Ok(())
}
