//! Pure formatting functions for UI output.
//!
//! Everything that prints goes through here so styling stays consistent.
//! `console` drops the colors when the stream is not a terminal.

use console::style;

use crate::external::Invocation;
use crate::release::{PlannedStep, ReleaseWarning};

/// Format and print an error message: a single `Error: <message>` line.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print an informational note.
pub fn display_info(message: &str) {
    println!("{} {}", style("ℹ").cyan(), message);
}

/// Display a non-fatal warning.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Echo a command before it runs (verbose mode).
pub fn display_command(invocation: &Invocation) {
    println!("{}", style(format!("→ {}", invocation)).dim());
}

/// Indented output of a command that ran in verbose mode.
pub fn display_command_output(output: &str) {
    for line in output.lines() {
        println!("  {}", style(line).dim());
    }
}

pub fn format_plan_step(step: &PlannedStep) -> String {
    format!("→ {}", step)
}

/// Display the commands a dry run would execute.
pub fn display_plan(steps: &[PlannedStep]) {
    println!(
        "\n{}\n",
        style("🔍 Dry run mode - commands that would be executed:").bold()
    );
    for step in steps {
        println!("{}", format_plan_step(step));
    }
    println!("\nRun without --dry-run to execute these commands.");
}

/// Display the manual steps left after a release with skipped push/commit.
pub fn display_next_steps(steps: &[String]) {
    if steps.is_empty() {
        return;
    }
    println!("{}", style("Next steps:").bold());
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, style(step).cyan());
    }
}
