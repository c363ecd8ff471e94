//! Formatting functions for terminal output.
//!
//! Everything user-facing goes through here so the wording and colours stay
//! consistent between commands. Diagnostics for developers go to `tracing`.

use crate::boundary::BoundaryWarning;
use crate::runner::CommandSpec;
use console::style;

const RULE_WIDTH: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("  {} {}", style("[OK]").green(), message);
}

/// Format and print a failure line for a single item.
pub fn display_failure(message: &str) {
    println!("  {} {}", style("[FAIL]").red(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Indented secondary line under a previous message.
pub fn display_detail(message: &str) {
    println!("  {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Top-level banner framed by `#` rules.
///
/// Extra lines (such as `Mode: Auto-fix`) are printed inside the frame.
pub fn display_banner(title: &str, extra: &[&str]) {
    let rule = "#".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("#  {}", style(title).bold());
    for line in extra {
        println!("#  {}", line);
    }
    println!("{}", rule);
}

/// Section header framed by `=` rules.
pub fn display_section(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("  {}", style(title).bold());
    println!("{}", rule);
}

/// `[2/5] Building Release...`
pub fn display_step(index: usize, total: usize, message: &str) {
    println!("\n{} {}", style(format!("[{}/{}]", index, total)).cyan(), message);
}

/// Banner printed before a streamed subprocess
pub fn display_command_banner(description: &str, spec: &CommandSpec) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("  {}", style(description).bold());
    println!("  Command: {}", spec);
    if let Some(dir) = &spec.cwd {
        println!("  Working directory: {}", dir.display());
    }
    println!("{}\n", rule);
}

/// Aligned `label: value` line used in summaries.
pub fn display_field(label: &str, value: &str) {
    println!("  {:<15}{}", format!("{}:", label), value);
}

/// Print a block of shell commands for the user to copy.
pub fn display_commands(comment: &str, commands: &[String]) {
    println!("\n  {}", style(format!("# {}", comment)).dim());
    for command in commands {
        println!("  {}", style(command).cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        // Visual verification test - output goes to stdout/stderr
        display_error("test error");
        display_success("test success");
        display_failure("test failure");
        display_status("test status");
    }

    #[test]
    fn test_display_frames() {
        display_banner("Linting Frontend", &["Mode: Auto-fix"]);
        display_section("ALL LINTS PASSED");
        display_step(1, 5, "Running checks...");
        display_command_banner(
            "Biome lint",
            &CommandSpec::new("bun").args(["run", "lint"]).cwd("frontend"),
        );
    }
}
