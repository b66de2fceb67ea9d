//! Git repository query abstraction
//!
//! This module provides a trait-based abstraction over the few read-only
//! repository queries the version resolution needs, allowing for a real
//! Git backend and synthetic commit graphs in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! # Usage
//!
//! Resolution code depends on the [Repository] trait rather than a concrete
//! implementation, so the graph walk can be tested without a repository on disk.
//!
//! ```rust
//! # use minver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> minver::Result<()> {
//! if let Some(head) = repo.head()? {
//!     for parent in repo.parents(head)? {
//!         println!("{} has tags {:?}", parent, repo.tags_at(parent)?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Read-only repository queries used by the tag resolver
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// backend failures (like `git2::Error`) to [crate::error::MinverError]
/// variants; the resolver propagates them unchanged.
pub trait Repository {
    /// The commit currently checked out
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - The current commit
    /// * `Ok(None)` - The repository has no commits yet
    /// * `Err` - If the repository cannot be read
    fn head(&self) -> Result<Option<Oid>>;

    /// Parents of a commit, in order
    ///
    /// An empty list means `commit` is a root commit.
    fn parents(&self, commit: Oid) -> Result<Vec<Oid>>;

    /// Names of all tags pointing at `commit`
    ///
    /// Annotated tags are peeled, so they are reported at the commit they
    /// reference.
    fn tags_at(&self, commit: Oid) -> Result<Vec<String>>;

    /// Whether the working tree has uncommitted or untracked changes
    fn is_dirty(&self) -> Result<bool>;
}

impl<T: Repository + ?Sized> Repository for &T {
    fn head(&self) -> Result<Option<Oid>> {
        (**self).head()
    }

    fn parents(&self, commit: Oid) -> Result<Vec<Oid>> {
        (**self).parents(commit)
    }

    fn tags_at(&self, commit: Oid) -> Result<Vec<String>> {
        (**self).tags_at(commit)
    }

    fn is_dirty(&self) -> Result<bool> {
        (**self).is_dirty()
    }
}

/// Abbreviated commit id for log output
pub fn short_id(oid: Oid) -> String {
    let full = oid.to_string();
    full[..7.min(full.len())].to_string()
}
