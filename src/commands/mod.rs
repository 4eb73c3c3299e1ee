//! CLI command implementations.

pub mod check;
pub mod hash;
pub mod snapshot;
pub mod watch;

use crate::snapshot::{ChangeKind, ChangeRecord};
use colored::Colorize;

/// Prints a success message with a leading check mark.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an informational message with a leading marker.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Prints a warning message with a leading marker.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Renders a classified change list, one `<kind> <path>  <digest>` line
/// per record. The list is already sorted by the differ.
pub fn print_changes(changes: &[ChangeRecord]) {
    for change in changes {
        let label = match change.kind {
            ChangeKind::Added => "A".green().bold(),
            ChangeKind::Modified => "M".yellow().bold(),
            ChangeKind::Removed => "D".red().bold(),
        };
        println!(
            "{} {}  {}",
            label,
            change.path.display(),
            change.digest.dimmed()
        );
    }
}
