use crate::boundary::BoundaryWarning;
use crate::domain::{SemanticVersion, Tag};
use crate::error::Result;
use crate::git::{short_id, Repository};
use git2::Oid;
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

/// A tag that parses as a version, found during the walk
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub tag: Tag,
    pub commit: Oid,
    pub version: SemanticVersion,
    pub height: u32,
}

impl Candidate {
    /// Higher precedence wins; equal precedence falls back to the raw tag
    /// name so the choice is deterministic.
    fn rank(&self, other: &Candidate) -> Ordering {
        self.version
            .precedence_cmp(&other.version)
            .then_with(|| self.tag.name.cmp(&other.tag.name))
    }
}

/// Outcome of a tag resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The selected tag, `None` when no version tag is reachable
    pub candidate: Option<Candidate>,
    /// Commits between the current commit and the selected tag, 0 without a tag
    pub height: u32,
    pub warnings: Vec<BoundaryWarning>,
}

/// Finds the nearest ancestor tag that parses as a version
pub struct TagResolver {
    tag_prefix: String,
    debug_log: bool,
}

impl TagResolver {
    /// Create a resolver that only considers tags starting with `tag_prefix`
    pub fn new(tag_prefix: impl Into<String>) -> Self {
        TagResolver {
            tag_prefix: tag_prefix.into(),
            debug_log: false,
        }
    }

    /// Log every visited commit at debug level
    ///
    /// Off by default since it produces one line per commit walked.
    pub fn with_debug_log(mut self, enabled: bool) -> Self {
        self.debug_log = enabled;
        self
    }

    /// Walk the ancestry of the current commit, breadth first
    ///
    /// A commit carrying a version tag ends the walk along that path. The
    /// walk stops once every commit at the lowest tagged height has been
    /// checked, and the greatest version among the tags at that height wins.
    /// Each commit is visited at most once, at its minimum distance.
    ///
    /// # Returns
    /// * `Ok(Resolution)` - Selected tag and height, or no tag with height 0
    /// * `Err` - If the repository cannot be read
    pub fn resolve<R: Repository>(&self, repo: &R) -> Result<Resolution> {
        let mut warnings = Vec::new();

        let head = match repo.head()? {
            Some(head) => head,
            None => {
                debug!("No commits found");
                warnings.push(BoundaryWarning::EmptyRepository);
                return Ok(Resolution {
                    candidate: None,
                    height: 0,
                    warnings,
                });
            }
        };

        let mut heights: HashMap<Oid, u32> = HashMap::from([(head, 0)]);
        let mut queue: VecDeque<(Oid, u32)> = VecDeque::from([(head, 0)]);
        let mut best: Option<Candidate> = None;

        while let Some((commit, height)) = queue.pop_front() {
            if best.as_ref().is_some_and(|found| height > found.height) {
                break;
            }

            if self.debug_log {
                debug!("Checking commit {} (height {})", short_id(commit), height);
            }

            let found = self.candidates_at(repo, commit, height, &mut warnings)?;
            if let Some(candidate) = found.into_iter().max_by(|a, b| a.rank(b)) {
                debug!(
                    "Found version tag '{}' on commit {} (height {})",
                    candidate.tag,
                    short_id(commit),
                    height
                );
                best = match best {
                    Some(current) if current.rank(&candidate) == Ordering::Greater => Some(current),
                    _ => Some(candidate),
                };
                continue;
            }

            for parent in repo.parents(commit)? {
                if heights.contains_key(&parent) {
                    continue;
                }
                heights.insert(parent, height + 1);
                queue.push_back((parent, height + 1));
            }
        }

        match best {
            Some(candidate) => {
                info!(
                    "Using tag '{}' on commit {} at height {}",
                    candidate.tag,
                    short_id(candidate.commit),
                    candidate.height
                );
                Ok(Resolution {
                    height: candidate.height,
                    candidate: Some(candidate),
                    warnings,
                })
            }
            None => {
                debug!("No version tag found in {} commit(s)", heights.len());
                warnings.push(BoundaryWarning::NoVersionTag {
                    tag_prefix: self.tag_prefix.clone(),
                    commits_walked: heights.len(),
                });
                Ok(Resolution {
                    candidate: None,
                    height: 0,
                    warnings,
                })
            }
        }
    }

    /// Version candidates among the tags on one commit; the rest become warnings
    fn candidates_at<R: Repository>(
        &self,
        repo: &R,
        commit: Oid,
        height: u32,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();

        for name in repo.tags_at(commit)? {
            let tag = Tag::new(name);
            match tag.version(&self.tag_prefix) {
                Ok(version) => candidates.push(Candidate {
                    tag,
                    commit,
                    version,
                    height,
                }),
                Err(e) => {
                    debug!("Ignoring tag '{}' on commit {}: {}", tag, short_id(commit), e);
                    warnings.push(BoundaryWarning::IgnoredTag {
                        reason: e.to_string(),
                        tag: tag.name,
                    });
                }
            }
        }

        Ok(candidates)
    }
}
