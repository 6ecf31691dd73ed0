//! Formats command implementation
//!
//! Lists the built-in MML dialects.

use colored::Colorize;
use mmlopt_core::DIALECTS;
use std::process::ExitCode;

/// Supported formats, one `name  description` line each.
pub fn listing() -> String {
    DIALECTS
        .iter()
        .map(|(name, description)| format!("{:<10} {}\n", name, description))
        .collect()
}

/// Run the formats command
pub fn run() -> ExitCode {
    println!("{}", "Supported formats:".cyan().bold());
    for line in listing().lines() {
        println!("  {}", line);
    }
    ExitCode::SUCCESS
}
