//! Pure formatting functions for UI output.
//!
//! The computed version is the only thing written to stdout, so that build
//! pipelines can capture it directly. Everything else goes to stderr.

use crate::boundary::BoundaryWarning;
use crate::domain::SemanticVersion;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the computed version, unstyled, on stdout.
pub fn display_version(version: &SemanticVersion) {
    println!("{}", version);
}

/// Describe where a version came from, e.g. "tag 'v1.2.3' at height 2"
pub fn describe_origin(tag: Option<&str>, height: u32) -> String {
    match tag {
        Some(tag) if height == 0 => format!("tag '{}' on the current commit", tag),
        Some(tag) => format!("tag '{}' at height {}", tag, height),
        None => "no tag (default version)".to_string(),
    }
}
