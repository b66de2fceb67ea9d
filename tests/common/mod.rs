// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// Temporary git repository with commits on an empty tree
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Could not create signature")
    }

    /// Commit on top of HEAD and advance the current branch
    pub fn commit(&self, message: &str) -> Oid {
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        self.write_commit(Some("HEAD"), message, &parents)
    }

    /// Commit with explicit parents without moving any reference
    pub fn commit_with_parents(&self, message: &str, parents: &[Oid]) -> Oid {
        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parents: Vec<_> = parents.iter().collect();
        self.write_commit(None, message, &parents)
    }

    fn write_commit(
        &self,
        update_ref: Option<&str>,
        message: &str,
        parents: &[&git2::Commit<'_>],
    ) -> Oid {
        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let signature = Self::signature();
        self.repo
            .commit(update_ref, &signature, &signature, message, &tree, parents)
            .expect("Could not create commit")
    }

    pub fn checkout(&self, oid: Oid) {
        self.repo
            .set_head_detached(oid)
            .expect("Could not detach HEAD");
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag(name, &object, &Self::signature(), "release", false)
            .expect("Could not create annotated tag");
    }

    /// Leave an untracked file in the working tree
    pub fn make_dirty(&self) {
        fs::write(self.path().join("untracked.txt"), b"changes\n").expect("Could not write file");
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.path().join("minver.toml"), content).expect("Could not write config");
    }
}
