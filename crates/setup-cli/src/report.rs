//! Plain-text output printed outside the interactive UI.

use colored::Colorize;
use setup_meta::DetectedTarget;
use setup_tools::{BatchSummary, EntryAction, InjectionResult};

use crate::error::Result;

/// Print the detection report, as a table or as JSON.
pub fn print_detection(detected: &[DetectedTarget], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(detected)?);
        return Ok(());
    }

    println!("{}", "Supported tools".bold());
    for target in detected {
        let scopes: Vec<&str> = target
            .descriptor
            .scopes
            .iter()
            .map(|sp| sp.scope.as_str())
            .collect();
        let marker = if target.installed {
            "✓".green()
        } else {
            "✗".dimmed()
        };
        let evidence = target
            .evidence_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!(
            "  {} {:<16} {:<14} {:<14} {}",
            marker,
            target.descriptor.display_name,
            target.id().cyan(),
            scopes.join(", "),
            evidence.dimmed()
        );
    }
    Ok(())
}

/// Print the outcome of every target after the terminal has been restored.
pub fn print_results(results: &[InjectionResult]) {
    if results.is_empty() {
        println!("{}", "Nothing was installed.".dimmed());
        return;
    }

    for result in results {
        let path = result
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if result.success {
            let action = match result.action {
                Some(EntryAction::Added) => "added",
                Some(EntryAction::Replaced) => "updated",
                Some(EntryAction::Unchanged) => "unchanged",
                None => "done",
            };
            println!("{} {} {} ({})", "✓".green(), result.target_id.bold(), path, action);
            if let Some(backup) = &result.backup_name {
                println!("    backup: {}", backup.dimmed());
            }
        } else {
            println!(
                "{} {} {}",
                "✗".red(),
                result.target_id.bold(),
                result.message.as_deref().unwrap_or("failed").red()
            );
        }
    }

    let summary = BatchSummary::from_results(results);
    println!();
    if summary.all_succeeded() {
        println!("{} {} tool(s) configured", "Done:".green().bold(), summary.succeeded);
    } else {
        println!(
            "{} {} succeeded, {} failed",
            "Finished with errors:".yellow().bold(),
            summary.succeeded,
            summary.failed
        );
    }
}
