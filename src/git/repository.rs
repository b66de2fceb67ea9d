use crate::error::{MinverError, Result};
use git2::{ErrorCode, Oid, Repository as Git2Repo, StatusOptions};
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
///
/// Tags are indexed by the commit they peel to when the repository is
/// opened, so `tags_at` is a map lookup during the walk.
pub struct Git2Repository {
    repo: Git2Repo,
    tags: HashMap<Oid, Vec<String>>,
}

impl Git2Repository {
    /// Discover the git repository containing `path`
    ///
    /// # Returns
    /// * `Ok(Git2Repository)` - Opened repository with its tag index
    /// * `Err` - If `path` is not inside a git working directory, or tags cannot be read
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                MinverError::repository(format!(
                    "'{}' is not a valid git working directory",
                    path.display()
                ))
            } else {
                MinverError::Git(e)
            }
        })?;

        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let tags = index_tags(&repo)?;
        Ok(Git2Repository { repo, tags })
    }
}

/// Map every commit to the names of the tags that peel to it
fn index_tags(repo: &Git2Repo) -> Result<HashMap<Oid, Vec<String>>> {
    let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

    for tag_name in repo.tag_names(None)?.iter().flatten() {
        let reference = repo.find_reference(&format!("refs/tags/{}", tag_name))?;
        match reference.peel_to_commit() {
            Ok(commit) => tags.entry(commit.id()).or_default().push(tag_name.to_string()),
            Err(e) => debug!("Ignoring tag '{}' which does not point at a commit: {}", tag_name, e),
        }
    }

    Ok(tags)
}

impl super::Repository for Git2Repository {
    fn head(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn parents(&self, commit: Oid) -> Result<Vec<Oid>> {
        let commit = self.repo.find_commit(commit)?;
        Ok(commit.parent_ids().collect())
    }

    fn tags_at(&self, commit: Oid) -> Result<Vec<String>> {
        Ok(self.tags.get(&commit).cloned().unwrap_or_default())
    }

    fn is_dirty(&self) -> Result<bool> {
        if self.repo.is_bare() {
            return Ok(false);
        }

        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::Signature;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_empty_repository_has_no_head() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repo::init(temp_dir.path()).unwrap();

        let repo = Git2Repository::open(temp_dir.path()).unwrap();
        assert_eq!(repo.head().unwrap(), None);
    }

    #[test]
    fn test_parents_and_tags() {
        let temp_dir = TempDir::new().unwrap();
        let git = Git2Repo::init(temp_dir.path()).unwrap();
        let first = commit(&git);
        git.tag_lightweight("1.0.0", &git.find_object(first, None).unwrap(), false)
            .unwrap();
        let second = commit(&git);

        let sig = Signature::now("Test User", "test@example.com").unwrap();
        git.tag("2.0.0-rc.1", &git.find_object(second, None).unwrap(), &sig, "rc", false)
            .unwrap();

        let repo = Git2Repository::from_git2(git).unwrap();
        assert_eq!(repo.head().unwrap(), Some(second));
        assert_eq!(repo.parents(second).unwrap(), vec![first]);
        assert!(repo.parents(first).unwrap().is_empty());
        assert_eq!(repo.tags_at(first).unwrap(), vec!["1.0.0".to_string()]);
        assert_eq!(repo.tags_at(second).unwrap(), vec!["2.0.0-rc.1".to_string()]);
    }

    #[test]
    fn test_is_dirty_with_untracked_file() {
        let temp_dir = TempDir::new().unwrap();
        let git = Git2Repo::init(temp_dir.path()).unwrap();
        commit(&git);

        let repo = Git2Repository::from_git2(git).unwrap();
        assert!(!repo.is_dirty().unwrap());

        std::fs::write(temp_dir.path().join("new.txt"), "content").unwrap();
        assert!(repo.is_dirty().unwrap());
    }
}
