use crate::error::{MinverError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashMap;

/// In-memory commit graph for testing without a repository on disk
pub struct MockRepository {
    head: Option<Oid>,
    parents: HashMap<Oid, Vec<Oid>>,
    tags: HashMap<Oid, Vec<String>>,
    dirty: bool,
    next_id: u64,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            head: None,
            parents: HashMap::new(),
            tags: HashMap::new(),
            dirty: false,
            next_id: 1,
        }
    }

    /// Add a commit with the given parents and move HEAD to it
    pub fn commit(&mut self, parents: &[Oid]) -> Result<Oid> {
        let oid = self.detached_commit(parents)?;
        self.head = Some(oid);
        Ok(oid)
    }

    /// Add a commit without moving HEAD, e.g. on a side branch
    pub fn detached_commit(&mut self, parents: &[Oid]) -> Result<Oid> {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&self.next_id.to_be_bytes());
        self.next_id += 1;

        let oid = Oid::from_bytes(&bytes)?;
        self.parents.insert(oid, parents.to_vec());
        Ok(oid)
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.entry(oid).or_default().push(name.into());
    }

    /// Move HEAD to a commit
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head(&self) -> Result<Option<Oid>> {
        Ok(self.head)
    }

    fn parents(&self, commit: Oid) -> Result<Vec<Oid>> {
        self.parents
            .get(&commit)
            .cloned()
            .ok_or_else(|| MinverError::repository(format!("Commit not found: {}", commit)))
    }

    fn tags_at(&self, commit: Oid) -> Result<Vec<String>> {
        Ok(self.tags.get(&commit).cloned().unwrap_or_default())
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }
}
