use crate::domain::version::SemanticVersion;
use crate::error::{MinverError, Result};
use std::fmt;

/// Represents a git tag by its raw name
///
/// The raw text is kept even when it does not parse, so that ignored tags
/// can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Parse the version this tag denotes under `tag_prefix`
    ///
    /// # Returns
    /// * `Ok(SemanticVersion)` - The tag is a version candidate
    /// * `Err` - Why the tag is not a candidate (prefix mismatch or invalid version)
    ///
    /// # Example
    /// ```
    /// # use minver::domain::Tag;
    /// let tag = Tag::new("v1.2.3");
    /// assert_eq!(tag.version("v").unwrap().to_string(), "1.2.3");
    /// assert!(tag.version("release-").is_err());
    /// ```
    pub fn version(&self, tag_prefix: &str) -> Result<SemanticVersion> {
        let remainder = self.name.strip_prefix(tag_prefix).ok_or_else(|| {
            MinverError::tag(format!("does not start with prefix '{}'", tag_prefix))
        })?;

        SemanticVersion::parse(remainder, "").ok_or_else(|| {
            MinverError::tag(format!("'{}' is not a valid version", remainder))
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
