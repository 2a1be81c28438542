//! Merge operations: fast-forward, no-ff merge commits, and squash merges

use chrono::{DateTime, Utc};
use git2::{build::CheckoutBuilder, BranchType, FileFavor, MergeOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use gantry_core::error::GitError;

use crate::repository::{commit_to_info, GitRepo, Result};
use crate::types::CommitInfo;

/// Conflict resolution preference, the analog of `git merge -X <option>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeFavor {
    /// Keep the current branch's side of conflicting hunks
    Ours,
    /// Keep the merged branch's side of conflicting hunks
    Theirs,
}

impl From<MergeFavor> for FileFavor {
    fn from(favor: MergeFavor) -> Self {
        match favor {
            MergeFavor::Ours => FileFavor::Ours,
            MergeFavor::Theirs => FileFavor::Theirs,
        }
    }
}

impl GitRepo {
    fn branch_commit(&self, branch: &str) -> Result<git2::Commit<'_>> {
        let branch_ref = self
            .repo
            .find_branch(branch, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(branch.to_string()))?;
        branch_ref.get().peel_to_commit().map_err(GitError::Git2)
    }

    fn merged_tree(
        &self,
        branch: &str,
        ours: &git2::Commit<'_>,
        theirs: &git2::Commit<'_>,
        favor: MergeFavor,
    ) -> Result<git2::Tree<'_>> {
        let mut opts = MergeOptions::new();
        opts.file_favor(favor.into());

        let mut index = self.repo.merge_commits(ours, theirs, Some(&opts))?;
        if index.has_conflicts() {
            return Err(GitError::MergeConflict(branch.to_string()));
        }

        let tree_id = index.write_tree_to(&self.repo)?;
        self.repo.find_tree(tree_id).map_err(GitError::Git2)
    }

    fn refresh_worktree(&self) -> Result<()> {
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))?;
        Ok(())
    }

    /// Fast-forward the current branch to another branch's tip
    #[instrument(skip(self))]
    pub fn merge_ff(&self, branch: &str) -> Result<CommitInfo> {
        let target = self.branch_commit(branch)?;
        let target_id = target.id();

        let head = self.repo.head()?;
        let refname = head.name().ok_or(GitError::InvalidReference)?.to_string();

        self.repo.reference(
            &refname,
            target_id,
            true,
            &format!("merge {}: Fast-forward", branch),
        )?;
        self.refresh_worktree()?;
        debug!(branch, sha = %target_id, "fast-forward merge");

        self.head_info()
    }

    /// Merge a branch with a dedicated merge commit (two parents)
    #[instrument(skip(self, message))]
    pub fn merge_no_ff(
        &self,
        branch: &str,
        message: &str,
        when: DateTime<Utc>,
        favor: MergeFavor,
    ) -> Result<CommitInfo> {
        let ours = self.head_commit()?;
        let theirs = self.branch_commit(branch)?;
        let tree = self.merged_tree(branch, &ours, &theirs, favor)?;

        let sig = self.signature_at(when)?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&ours, &theirs])?;
        self.refresh_worktree()?;
        debug!(branch, sha = %oid, "merge commit created");

        let commit = self.repo.find_commit(oid)?;
        Ok(commit_to_info(&commit))
    }

    /// Squash-merge a branch: merged tree committed with a single parent
    #[instrument(skip(self, message))]
    pub fn merge_squash(
        &self,
        branch: &str,
        message: &str,
        when: DateTime<Utc>,
        favor: MergeFavor,
    ) -> Result<CommitInfo> {
        let ours = self.head_commit()?;
        let theirs = self.branch_commit(branch)?;
        let tree = self.merged_tree(branch, &ours, &theirs, favor)?;

        let sig = self.signature_at(when)?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&ours])?;
        self.refresh_worktree()?;
        debug!(branch, sha = %oid, "squash merge commit created");

        let commit = self.repo.find_commit(oid)?;
        Ok(commit_to_info(&commit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepoIdentity;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn setup() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = GitRepo::init(
            temp.path(),
            "main",
            RepoIdentity::new("gantry testing", "not_a_real@email.com"),
            "https://example.com/acme/example-project.git",
        )
        .unwrap();
        std::fs::write(temp.path().join("file.txt"), "base\n").unwrap();
        repo.commit_all(
            "Initial commit",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .unwrap();
        (temp, repo)
    }

    fn commit_on_branch(temp: &TempDir, repo: &GitRepo, branch: &str, content: &str, msg: &str) {
        repo.create_branch(branch, "main").unwrap();
        repo.checkout_branch(branch).unwrap();
        std::fs::write(temp.path().join("file.txt"), content).unwrap();
        repo.commit_all(msg, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 1).unwrap())
            .unwrap();
        repo.checkout_branch("main").unwrap();
    }

    #[test]
    fn test_merge_ff_moves_head() {
        let (temp, repo) = setup();
        commit_on_branch(&temp, &repo, "feature", "base\nmore\n", "feat: more");

        let merged = repo.merge_ff("feature").unwrap();
        assert_eq!(merged.summary, "feat: more");
        assert_eq!(repo.current_branch().unwrap(), "main");
        assert_eq!(
            std::fs::read_to_string(temp.path().join("file.txt")).unwrap(),
            "base\nmore\n"
        );
    }

    #[test]
    fn test_merge_no_ff_has_two_parents() {
        let (temp, repo) = setup();
        commit_on_branch(&temp, &repo, "feature", "base\nmore\n", "feat: more");

        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 2).unwrap();
        let merged = repo
            .merge_no_ff(
                "feature",
                "Merge branch 'feature' into 'main'",
                when,
                MergeFavor::Theirs,
            )
            .unwrap();

        let head = repo.head_commit().unwrap();
        assert_eq!(head.parent_count(), 2);
        assert_eq!(merged.summary, "Merge branch 'feature' into 'main'");
        assert_eq!(merged.timestamp, when);
    }

    #[test]
    fn test_merge_squash_has_one_parent() {
        let (temp, repo) = setup();
        commit_on_branch(&temp, &repo, "feature", "base\nmore\n", "feat: more");

        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 2).unwrap();
        repo.merge_squash("feature", "feat: squashed", when, MergeFavor::Theirs)
            .unwrap();

        let head = repo.head_commit().unwrap();
        assert_eq!(head.parent_count(), 1);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("file.txt")).unwrap(),
            "base\nmore\n"
        );
    }
}
