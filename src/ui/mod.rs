//! User interface module - output formatting and verbosity.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Verbosity levels and logger setup

use std::str::FromStr;

use log::LevelFilter;

use crate::error::{MinverError, Result};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    describe_origin, display_boundary_warning, display_error, display_status, display_version,
};

/// How much diagnostic output to write to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }

    /// Whether per-commit walk logging is worth producing at this level
    pub fn logs_walk(self) -> bool {
        self >= Verbosity::Debug
    }
}

impl FromStr for Verbosity {
    type Err = MinverError;

    /// Accepts full level names, their first letters, and the MSBuild-style
    /// names quiet/minimal/normal/detailed/diagnostic.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "e" | "error" | "q" | "quiet" => Ok(Verbosity::Error),
            "w" | "warn" | "m" | "minimal" => Ok(Verbosity::Warn),
            "i" | "info" | "n" | "normal" => Ok(Verbosity::Info),
            "d" | "debug" | "detailed" => Ok(Verbosity::Debug),
            "t" | "trace" | "diag" | "diagnostic" => Ok(Verbosity::Trace),
            other => Err(MinverError::config(format!(
                "Invalid verbosity: '{}' - expected error, warn, info, debug or trace",
                other
            ))),
        }
    }
}

/// Initialize the `log` backend at `verbosity`; `RUST_LOG` still takes precedence
pub fn init_logging(verbosity: Verbosity) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(verbosity.level_filter())
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();
    // a second initialization, e.g. from tests, keeps the first logger
    let _ = builder.try_init();
}
