pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod resolver;
pub mod ui;
pub mod versioner;

pub use error::{MinverError, Result};
pub use versioner::{compute_version, VersionOptions, VersionReport, Versioner};
