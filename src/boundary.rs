use std::fmt;

/// Non-fatal findings made while resolving a version.
/// They never change the computed version but are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no commits; the baseline version is used
    EmptyRepository,
    /// No reachable tag parses as a version under the configured prefix
    NoVersionTag {
        tag_prefix: String,
        commits_walked: usize,
    },
    /// Tag exists but is not a version candidate
    IgnoredTag { tag: String, reason: String },
    /// Working tree has uncommitted changes
    DirtyWorkingTree,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::EmptyRepository => {
                write!(f, "No commits found; using the default version")
            }
            BoundaryWarning::NoVersionTag {
                tag_prefix,
                commits_walked,
            } => {
                if tag_prefix.is_empty() {
                    write!(
                        f,
                        "No version tag found in {} commit(s); using the default version",
                        commits_walked
                    )
                } else {
                    write!(
                        f,
                        "No version tag with prefix '{}' found in {} commit(s); using the default version",
                        tag_prefix, commits_walked
                    )
                }
            }
            BoundaryWarning::IgnoredTag { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
            BoundaryWarning::DirtyWorkingTree => {
                write!(f, "Working tree has uncommitted changes")
            }
        }
    }
}
