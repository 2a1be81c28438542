//! Branch operations

use git2::{build::CheckoutBuilder, BranchType};
use tracing::debug;

use gantry_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Create a branch starting at another branch's tip
    pub fn create_branch(&self, name: &str, start_branch: &str) -> Result<()> {
        let start = self
            .repo
            .find_branch(start_branch, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(start_branch.to_string()))?;
        let commit = start.get().peel_to_commit()?;

        self.repo.branch(name, &commit, false)?;
        debug!(branch = name, start = start_branch, "created branch");
        Ok(())
    }

    /// Check out an existing local branch
    pub fn checkout_branch(&self, name: &str) -> Result<()> {
        self.repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(name.to_string()))?;

        self.repo.set_head(&format!("refs/heads/{}", name))?;
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))?;
        debug!(branch = name, "checked out branch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepoIdentity;
    use chrono::TimeZone;
    use chrono::Utc;
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
        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        repo.commit_all("Initial commit", when).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_create_and_checkout_branch() {
        let (_temp, repo) = setup();

        repo.create_branch("feature/one", "main").unwrap();
        repo.checkout_branch("feature/one").unwrap();
        assert_eq!(repo.current_branch().unwrap(), "feature/one");

        repo.checkout_branch("main").unwrap();
        assert_eq!(repo.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_checkout_missing_branch() {
        let (_temp, repo) = setup();
        let result = repo.checkout_branch("does-not-exist");
        assert!(matches!(result, Err(GitError::BranchNotFound(_))));
    }
}
