use crate::domain::version::SemanticVersion;
use crate::error::{MinverError, Result};
use std::fmt;
use std::str::FromStr;

/// Forced major/minor pair for the computed version
///
/// Only major and minor are replaced; patch, build, pre-release and
/// metadata are left as computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorMinor {
    pub major: u64,
    pub minor: u64,
}

impl MajorMinor {
    pub fn new(major: u64, minor: u64) -> Self {
        MajorMinor { major, minor }
    }

    /// Parse "MAJOR.MINOR", e.g. "1.2"
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn apply(&self, version: &SemanticVersion) -> SemanticVersion {
        version.with_major_minor(self.major, self.minor)
    }
}

impl FromStr for MajorMinor {
    type Err = MinverError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            MinverError::config(format!(
                "Invalid major/minor override: '{}' - expected MAJOR.MINOR",
                s
            ))
        };

        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let component = |part: &str| {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u64>().map_err(|_| invalid())
        };

        Ok(MajorMinor {
            major: component(major)?,
            minor: component(minor)?,
        })
    }
}

impl fmt::Display for MajorMinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
