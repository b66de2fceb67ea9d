use crate::domain::prerelease::PreReleaseIdentifiers;
use crate::error::{MinverError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const VERSION_PATTERN: &str = r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:\.(0|[1-9]\d*))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$";

fn version_regex() -> Option<&'static Regex> {
    static VERSION_RE: OnceLock<Option<Regex>> = OnceLock::new();
    VERSION_RE
        .get_or_init(|| Regex::new(VERSION_PATTERN).ok())
        .as_ref()
}

/// Semantic version with an optional fourth numeric component
///
/// Renders as `MAJOR.MINOR.PATCH[.BUILD][-PRE][+META]`. Values are never
/// mutated; every transformation returns a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    build: Option<u64>,
    pre_release: PreReleaseIdentifiers,
    build_metadata: Vec<String>,
}

impl SemanticVersion {
    /// Create a three-component release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            build: None,
            pre_release: PreReleaseIdentifiers::empty(),
            build_metadata: Vec::new(),
        }
    }

    /// The version used when no tag is reachable: `0.0.0.0-<pre_release>`
    pub fn baseline(pre_release: &PreReleaseIdentifiers) -> Self {
        SemanticVersion::new(0, 0, 0)
            .with_build_number(0)
            .with_pre_release(pre_release.clone())
    }

    /// Parse a version from a tag, stripping `tag_prefix` first
    ///
    /// Returns `None` when the tag does not start with the prefix or the
    /// remainder is not a valid version.
    ///
    /// # Example
    /// ```
    /// # use minver::domain::SemanticVersion;
    /// let v = SemanticVersion::parse("v1.2.3.4-rc.1+ci", "v").unwrap();
    /// assert_eq!(v.to_string(), "1.2.3.4-rc.1+ci");
    /// assert!(SemanticVersion::parse("1.2.3", "v").is_none());
    /// ```
    pub fn parse(text: &str, tag_prefix: &str) -> Option<Self> {
        let remainder = text.strip_prefix(tag_prefix)?;
        let captures = version_regex()?.captures(remainder)?;

        let number = |index: usize| captures.get(index).map(|m| m.as_str().parse::<u64>());

        let major = number(1)?.ok()?;
        let minor = number(2)?.ok()?;
        let patch = number(3)?.ok()?;
        let build = number(4).transpose().ok()?;

        let pre_release = match captures.get(5) {
            Some(m) => PreReleaseIdentifiers::parse_lenient(m.as_str())?,
            None => PreReleaseIdentifiers::empty(),
        };

        let build_metadata = match captures.get(6) {
            Some(m) => metadata_tokens(m.as_str())?,
            None => Vec::new(),
        };

        Some(SemanticVersion {
            major,
            minor,
            patch,
            build,
            pre_release,
            build_metadata,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The fourth component, if the version carries one
    pub fn build(&self) -> Option<u64> {
        self.build
    }

    pub fn pre_release(&self) -> &PreReleaseIdentifiers {
        &self.pre_release
    }

    pub fn build_metadata(&self) -> &[String] {
        &self.build_metadata
    }

    /// A release (RTM) version has no pre-release identifiers
    pub fn is_release(&self) -> bool {
        self.pre_release.is_empty()
    }

    pub fn with_major_minor(&self, major: u64, minor: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            ..self.clone()
        }
    }

    pub fn with_build_number(self, build: u64) -> Self {
        SemanticVersion {
            build: Some(build),
            ..self
        }
    }

    pub fn with_pre_release(self, pre_release: PreReleaseIdentifiers) -> Self {
        SemanticVersion {
            pre_release,
            ..self
        }
    }

    pub fn with_build_metadata(self, build_metadata: Vec<String>) -> Self {
        SemanticVersion {
            build_metadata,
            ..self
        }
    }

    /// Promote to four components, the fourth defaulting to 0
    pub fn normalized(&self) -> Self {
        SemanticVersion {
            build: Some(self.build.unwrap_or(0)),
            ..self.clone()
        }
    }

    /// Increment `field` by one and zero every lower-order component
    ///
    /// The result always has four components.
    pub fn bump(&self, field: AutoIncrement) -> Self {
        let build = self.build.unwrap_or(0);
        let (major, minor, patch, build) = match field {
            AutoIncrement::Major => (self.major.saturating_add(1), 0, 0, 0),
            AutoIncrement::Minor => (self.major, self.minor.saturating_add(1), 0, 0),
            AutoIncrement::Patch => (self.major, self.minor, self.patch.saturating_add(1), 0),
            AutoIncrement::Build => (self.major, self.minor, self.patch, build.saturating_add(1)),
        };

        SemanticVersion {
            major,
            minor,
            patch,
            build: Some(build),
            ..self.clone()
        }
    }

    /// Derive the version for a commit `height` commits after this tag
    ///
    /// - height 0: the tag version itself
    /// - release tag: `auto_increment` is bumped and the default pre-release
    ///   gets the height appended, e.g. `1.2.3.4` -> `1.2.3.5-alpha.0.1`
    /// - pre-release tag: no numeric bump, the height is merged into the
    ///   existing pre-release, e.g. `1.2.3.4-pre` -> `1.2.3.4-pre.1`
    ///
    /// For height > 0 the tag's own build metadata is dropped: it describes
    /// the tagged build, not the derived one.
    pub fn with_height(
        &self,
        height: u32,
        auto_increment: AutoIncrement,
        default_pre_release: &PreReleaseIdentifiers,
    ) -> Self {
        if height == 0 {
            return self.clone();
        }

        let next = if self.is_release() {
            self.bump(auto_increment)
                .with_pre_release(default_pre_release.with_height(height))
        } else {
            let pre_release = self.pre_release.merge(height, default_pre_release);
            self.normalized().with_pre_release(pre_release)
        };

        next.with_build_metadata(Vec::new())
    }

    /// Append build metadata tokens after any the version already carries
    ///
    /// Attaching metadata promotes the version to four components. An empty
    /// `tokens` slice leaves the version untouched.
    pub fn with_appended_metadata(&self, tokens: &[String]) -> Self {
        if tokens.is_empty() {
            return self.clone();
        }

        let mut build_metadata = self.build_metadata.clone();
        build_metadata.extend(tokens.iter().cloned());
        self.normalized().with_build_metadata(build_metadata)
    }

    /// Compare by SemVer precedence, with the fourth component sorting
    /// between patch and the pre-release
    ///
    /// An absent fourth component compares as 0. Build metadata is ignored.
    pub fn precedence_cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then(self.build.unwrap_or(0).cmp(&other.build.unwrap_or(0)))
            .then_with(|| {
                match (self.pre_release.is_empty(), other.pre_release.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.pre_release.cmp(&other.pre_release),
                }
            })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
        }
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = MinverError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s, "")
            .ok_or_else(|| MinverError::version(format!("Invalid version: '{}'", s)))
    }
}

/// Split build metadata into tokens, `None` if it is not valid SemVer metadata
fn metadata_tokens(s: &str) -> Option<Vec<String>> {
    semver::BuildMetadata::new(s).ok()?;
    Some(s.split('.').map(str::to_string).collect())
}

/// Parse configured build metadata, e.g. "ci.42"
///
/// An empty string means no metadata.
pub fn parse_build_metadata(s: &str) -> Result<Vec<String>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }

    metadata_tokens(s)
        .ok_or_else(|| MinverError::config(format!("Invalid build metadata: '{}'", s)))
}

/// The version component bumped when moving past a release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoIncrement {
    Major,
    Minor,
    Patch,
    #[default]
    Build,
}

impl FromStr for AutoIncrement {
    type Err = MinverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(AutoIncrement::Major),
            "minor" => Ok(AutoIncrement::Minor),
            "patch" => Ok(AutoIncrement::Patch),
            "build" => Ok(AutoIncrement::Build),
            other => Err(MinverError::config(format!(
                "Invalid auto-increment field: '{}' - expected major, minor, patch or build",
                other
            ))),
        }
    }
}

impl fmt::Display for AutoIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AutoIncrement::Major => "major",
            AutoIncrement::Minor => "minor",
            AutoIncrement::Patch => "patch",
            AutoIncrement::Build => "build",
        };
        write!(f, "{}", name)
    }
}
