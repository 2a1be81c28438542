//! Commit creation and history operations

use chrono::{DateTime, Utc};
use git2::{IndexAddOption, Sort};
use tracing::debug;

use crate::repository::{commit_to_info, GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Stage every change in the working tree (additions, modifications,
    /// deletions)
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    /// Stage everything and commit with the given message and timestamp.
    ///
    /// Author and committer dates are both set to `when`, mirroring
    /// `git commit --date` with `GIT_COMMITTER_DATE` pinned.
    pub fn commit_all(&self, message: &str, when: DateTime<Utc>) -> Result<CommitInfo> {
        self.stage_all()?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let sig = self.signature_at(when)?;

        // Unborn HEAD means this is the initial commit
        let head = self.repo.head().ok();
        let parent = match &head {
            Some(reference) => Some(reference.peel_to_commit()?),
            None => None,
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        debug!(sha = %oid, "created commit");

        let commit = self.repo.find_commit(oid)?;
        Ok(commit_to_info(&commit))
    }

    /// All commits reachable from HEAD, newest first
    pub fn commits_on_head(&self) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }
}
