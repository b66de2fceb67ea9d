//! Main workflow orchestration logic
//!
//! Layers configuration (defaults, config file, command line), validates it
//! before touching the repository, then computes the version. Kept apart from
//! the clap definitions so the workflow can be driven programmatically.

use std::path::{Path, PathBuf};

use log::debug;

use crate::boundary::BoundaryWarning;
use crate::config::{load_config, BehaviorConfig, Config};
use crate::domain::{AutoIncrement, SemanticVersion};
use crate::error::Result;
use crate::git::Git2Repository;
use crate::versioner::{VersionOptions, VersionReport, Versioner};

/// Arguments for the version workflow
///
/// Mirrors the CLI Args; `None` means "not given on the command line".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionWorkflowArgs {
    /// Working directory inside the repository
    pub work_dir: PathBuf,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    pub tag_prefix: Option<String>,
    pub major_minor: Option<String>,
    pub build_metadata: Option<String>,
    pub default_pre_release_identifiers: Option<String>,
    pub auto_increment: Option<String>,
    pub version_override: Option<String>,

    /// Append "dirty" to the build metadata for a dirty working tree
    pub mark_dirty: bool,

    /// Log every visited commit
    pub debug_log: bool,
}

/// Result of the version workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub version: SemanticVersion,
    pub tag: Option<String>,
    pub height: u32,
    pub warnings: Vec<BoundaryWarning>,
}

impl From<VersionReport> for WorkflowResult {
    fn from(report: VersionReport) -> Self {
        WorkflowResult {
            version: report.version,
            tag: report.tag,
            height: report.height,
            warnings: report.warnings,
        }
    }
}

impl VersionWorkflowArgs {
    /// Command line values as a configuration layer
    pub fn as_config(&self) -> Result<Config> {
        let auto_increment = self
            .auto_increment
            .as_deref()
            .map(str::parse::<AutoIncrement>)
            .transpose()?;

        Ok(Config {
            tag_prefix: self.tag_prefix.clone(),
            major_minor: self.major_minor.clone(),
            build_metadata: self.build_metadata.clone(),
            default_pre_release_identifiers: self.default_pre_release_identifiers.clone(),
            auto_increment,
            version_override: self.version_override.clone(),
            behavior: BehaviorConfig {
                mark_dirty: self.mark_dirty.then_some(true),
                debug_log: self.debug_log.then_some(true),
            },
        })
    }
}

/// Layer the configuration file and command line, then validate
///
/// # Returns
/// * `Ok(VersionOptions)` - Validated options, defaults filled in
/// * `Err` - If the configuration file cannot be read or a value is invalid
pub fn resolve_options(args: &VersionWorkflowArgs) -> Result<VersionOptions> {
    let file_config = load_config(args.config_path.as_deref(), &args.work_dir)?;
    file_config.merge(args.as_config()?).into_options()
}

/// Compute the version for `work_dir` with already resolved options
///
/// The repository is only opened when no version override is set.
pub fn run_with_options(work_dir: &Path, options: VersionOptions) -> Result<WorkflowResult> {
    debug!("Resolved options: {:?}", options);
    let report = Versioner::new(options).version_with(|| Git2Repository::open(work_dir))?;
    Ok(report.into())
}

/// Run the version workflow
///
/// # Returns
/// * `Ok(WorkflowResult)` - The computed version and how it was derived
/// * `Err` - A configuration error (before any repository access), or a
///   repository error
pub fn run(args: &VersionWorkflowArgs) -> Result<WorkflowResult> {
    let options = resolve_options(args)?;
    run_with_options(&args.work_dir, options)
}
