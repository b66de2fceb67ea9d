//! Domain logic - pure version rules independent of git operations

pub mod major_minor;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use major_minor::MajorMinor;
pub use prerelease::{Identifier, PreReleaseIdentifiers};
pub use tag::Tag;
pub use version::{parse_build_metadata, AutoIncrement, SemanticVersion};
