use crate::domain::{
    parse_build_metadata, AutoIncrement, MajorMinor, PreReleaseIdentifiers, SemanticVersion,
};
use crate::error::{MinverError, Result};
use crate::versioner::VersionOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "minver.toml";

/// Represents the complete configuration for minver.
///
/// Every field is optional; unset fields fall back to the built-in defaults
/// when converted with [Config::into_options]. Values are kept as written so
/// that they can be layered (file, then command line) before validation.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Only tags starting with this prefix are considered, e.g. "v"
    #[serde(default)]
    pub tag_prefix: Option<String>,

    /// Forced "MAJOR.MINOR" for the computed version
    #[serde(default)]
    pub major_minor: Option<String>,

    /// Dot-separated build metadata appended to the version
    #[serde(default)]
    pub build_metadata: Option<String>,

    /// Pre-release used without a tag and after a release tag, default "alpha.0"
    #[serde(default)]
    pub default_pre_release_identifiers: Option<String>,

    /// Component bumped after a release tag, default "build"
    #[serde(default)]
    pub auto_increment: Option<AutoIncrement>,

    /// Fixed version returned without reading the repository
    #[serde(default)]
    pub version_override: Option<String>,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior without affecting how tags are selected.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Append a "dirty" build metadata token when the working tree has changes
    #[serde(default)]
    pub mark_dirty: Option<bool>,

    /// Log every commit visited while looking for a tag
    #[serde(default)]
    pub debug_log: Option<bool>,
}

impl Config {
    /// Layer `overrides` on top of this configuration
    ///
    /// Fields set in `overrides` win; unset fields keep the current value.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            tag_prefix: overrides.tag_prefix.or(self.tag_prefix),
            major_minor: overrides.major_minor.or(self.major_minor),
            build_metadata: overrides.build_metadata.or(self.build_metadata),
            default_pre_release_identifiers: overrides
                .default_pre_release_identifiers
                .or(self.default_pre_release_identifiers),
            auto_increment: overrides.auto_increment.or(self.auto_increment),
            version_override: overrides.version_override.or(self.version_override),
            behavior: BehaviorConfig {
                mark_dirty: overrides.behavior.mark_dirty.or(self.behavior.mark_dirty),
                debug_log: overrides.behavior.debug_log.or(self.behavior.debug_log),
            },
        }
    }

    /// Validate the configuration and convert it to version options
    ///
    /// # Returns
    /// * `Ok(VersionOptions)` - Validated options with defaults filled in
    /// * `Err` - A configuration error for the first invalid value
    pub fn into_options(self) -> Result<VersionOptions> {
        let major_minor = self
            .major_minor
            .as_deref()
            .map(MajorMinor::parse)
            .transpose()?;

        let build_metadata = match self.build_metadata.as_deref() {
            Some(metadata) => parse_build_metadata(metadata)?,
            None => Vec::new(),
        };

        let default_pre_release = match self.default_pre_release_identifiers.as_deref() {
            Some(identifiers) => PreReleaseIdentifiers::parse(identifiers).map_err(|_| {
                MinverError::config(format!(
                    "Invalid default pre-release identifiers: '{}'",
                    identifiers
                ))
            })?,
            None => PreReleaseIdentifiers::default(),
        };

        let version_override = self
            .version_override
            .as_deref()
            .map(|version| {
                version.parse::<SemanticVersion>().map_err(|_| {
                    MinverError::config(format!("Invalid version override: '{}'", version))
                })
            })
            .transpose()?;

        Ok(VersionOptions {
            tag_prefix: self.tag_prefix.unwrap_or_default(),
            major_minor,
            build_metadata,
            default_pre_release,
            auto_increment: self.auto_increment.unwrap_or_default(),
            debug_log: self.behavior.debug_log.unwrap_or(false),
            mark_dirty: self.behavior.mark_dirty.unwrap_or(false),
            version_override,
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `minver.toml` in `work_dir` or its nearest ancestor, up to the
///    repository root
/// 3. `minver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `work_dir` - Directory searched for a project configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, work_dir: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if let Some(project_config) = find_project_config(work_dir) {
        fs::read_to_string(project_config)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Nearest `minver.toml` from `work_dir` upwards, stopping at the first
/// directory that contains `.git`
fn find_project_config(work_dir: &Path) -> Option<PathBuf> {
    let work_dir = work_dir
        .canonicalize()
        .unwrap_or_else(|_| work_dir.to_path_buf());

    for dir in work_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}
