use colored::Colorize;

use crate::cli::context::{Verbosity, verbosity};

/// Print a success message.
pub fn success(msg: &str) {
    if verbosity() != Verbosity::Quiet {
        eprintln!("  {} {}", "✓".green(), msg);
    }
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if verbosity() != Verbosity::Quiet {
        eprintln!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    if verbosity() != Verbosity::Quiet {
        eprintln!("\n{}", msg.bold());
    }
}

/// Print a detail line, only in verbose mode.
pub fn detail(msg: &str) {
    if verbosity() == Verbosity::Verbose {
        eprintln!("    {}", msg.dimmed());
    }
}
