//! Version calculation from the resolved tag and height
//!
//! Three cases:
//! - no tag: the baseline `0.0.0.0-alpha.0`
//! - tag on the current commit: the tag version, metadata merged
//! - tag behind the current commit: the bumped version with the height in
//!   the pre-release

use crate::boundary::BoundaryWarning;
use crate::domain::{AutoIncrement, MajorMinor, PreReleaseIdentifiers, SemanticVersion};
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::resolver::{Candidate, TagResolver};
use log::{debug, info};
use std::path::Path;

/// Build metadata token appended for a dirty working tree
pub const DIRTY_METADATA: &str = "dirty";

/// Validated settings for a version calculation
///
/// Construct through [crate::config::Config::into_options] to get eager
/// validation, or directly in code where the values are known to be valid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionOptions {
    /// Only tags starting with this prefix are considered; stripped before parsing
    pub tag_prefix: String,
    /// Forced major/minor for the computed version
    pub major_minor: Option<MajorMinor>,
    /// Build metadata tokens attached to the computed version
    pub build_metadata: Vec<String>,
    /// Pre-release used without a tag and after a release tag
    pub default_pre_release: PreReleaseIdentifiers,
    /// Component bumped after a release tag
    pub auto_increment: AutoIncrement,
    /// Log every commit visited during the walk
    pub debug_log: bool,
    /// Append [DIRTY_METADATA] when the working tree has changes
    pub mark_dirty: bool,
    /// Returned as-is without reading the repository
    pub version_override: Option<SemanticVersion>,
}

/// Computed version together with how it was derived
#[derive(Debug, Clone, PartialEq)]
pub struct VersionReport {
    pub version: SemanticVersion,
    /// Raw name of the tag the version derives from
    pub tag: Option<String>,
    pub height: u32,
    pub warnings: Vec<BoundaryWarning>,
}

impl VersionReport {
    fn overridden(version: SemanticVersion) -> Self {
        VersionReport {
            version,
            tag: None,
            height: 0,
            warnings: Vec::new(),
        }
    }
}

/// Computes versions from repository state
pub struct Versioner {
    options: VersionOptions,
}

impl Versioner {
    pub fn new(options: VersionOptions) -> Self {
        Versioner { options }
    }

    pub fn options(&self) -> &VersionOptions {
        &self.options
    }

    /// Resolve the nearest tag in `repo` and compute the version from it
    pub fn version_for<R: Repository>(&self, repo: &R) -> Result<VersionReport> {
        self.version_with(|| Ok(repo))
    }

    /// Like [Versioner::version_for], opening the repository only when the
    /// version is not overridden
    pub fn version_with<R, F>(&self, open: F) -> Result<VersionReport>
    where
        R: Repository,
        F: FnOnce() -> Result<R>,
    {
        if let Some(version) = &self.options.version_override {
            info!("Using version override {}", version);
            return Ok(VersionReport::overridden(version.clone()));
        }

        let repo = open()?;
        let resolution = TagResolver::new(self.options.tag_prefix.as_str())
            .with_debug_log(self.options.debug_log)
            .resolve(&repo)?;
        let mut warnings = resolution.warnings;

        let mut metadata = self.options.build_metadata.clone();
        if self.options.mark_dirty && repo.is_dirty()? {
            warnings.push(BoundaryWarning::DirtyWorkingTree);
            metadata.push(DIRTY_METADATA.to_string());
        }

        let version = self.calculate(resolution.candidate.as_ref(), &metadata);
        info!("Calculated version {}", version);

        Ok(VersionReport {
            version,
            tag: resolution.candidate.map(|c| c.tag.name),
            height: resolution.height,
            warnings,
        })
    }

    /// Compute the version for a resolved candidate, without repository access
    ///
    /// `metadata` replaces the configured build metadata, so callers can add
    /// tokens such as the dirty marker.
    pub fn calculate(&self, candidate: Option<&Candidate>, metadata: &[String]) -> SemanticVersion {
        let options = &self.options;

        let version = match candidate {
            None => {
                debug!(
                    "No tag found, using default version with pre-release '{}'",
                    options.default_pre_release
                );
                SemanticVersion::baseline(&options.default_pre_release)
            }
            Some(candidate) => {
                if candidate.height == 0 {
                    debug!("Current commit is tagged '{}'", candidate.tag);
                } else {
                    debug!(
                        "{} commit(s) since tag '{}', auto-incrementing {}",
                        candidate.height, candidate.tag, options.auto_increment
                    );
                }
                candidate.version.with_height(
                    candidate.height,
                    options.auto_increment,
                    &options.default_pre_release,
                )
            }
        };

        let version = match options.major_minor {
            Some(major_minor) => {
                debug!("Applying major/minor override {}", major_minor);
                major_minor.apply(&version)
            }
            None => version,
        };

        version.with_appended_metadata(metadata)
    }
}

/// Compute the version of the git working directory at `path`
///
/// # Arguments
/// * `path` - Any path inside the working directory
/// * `options` - Validated settings
///
/// # Returns
/// * `Ok(SemanticVersion)` - The computed version
/// * `Err` - If `path` is not a git working directory or it cannot be read
///
/// # Example
/// ```no_run
/// # use minver::versioner::{compute_version, VersionOptions};
/// let version = compute_version(".", &VersionOptions::default())?;
/// println!("{}", version);
/// # Ok::<(), minver::MinverError>(())
/// ```
pub fn compute_version(path: impl AsRef<Path>, options: &VersionOptions) -> Result<SemanticVersion> {
    let report = Versioner::new(options.clone()).version_with(|| Git2Repository::open(path))?;
    Ok(report.version)
}
