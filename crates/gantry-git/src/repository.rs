//! Git repository operations

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::{Repository, RepositoryInitOptions, Signature, Time};
use tracing::{info, instrument};

use gantry_core::error::GitError;

use crate::types::CommitInfo;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Author identity used for every commit and tag in a fixture repository
#[derive(Debug, Clone)]
pub struct RepoIdentity {
    pub name: String,
    pub email: String,
}

impl RepoIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    pub(crate) identity: RepoIdentity,
    path: PathBuf,
}

impl GitRepo {
    /// Initialize a fixture repository at the given path.
    ///
    /// Sets the default branch name, commits author identity into the repo
    /// config, disables commit/tag signing, and registers an `origin` remote.
    #[instrument(skip(identity), fields(path = %path.display(), branch = default_branch))]
    pub fn init(
        path: &Path,
        default_branch: &str,
        identity: RepoIdentity,
        remote_url: &str,
    ) -> Result<Self> {
        info!(path = %path.display(), "initializing fixture repository");

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(default_branch);
        let repo = Repository::init_opts(path, &opts)?;

        {
            let mut config = repo.config()?;
            config.set_str("user.name", &identity.name)?;
            config.set_str("user.email", &identity.email)?;
            config.set_bool("commit.gpgsign", false)?;
            config.set_bool("tag.gpgsign", false)?;
        }

        repo.remote("origin", remote_url)?;

        Ok(Self {
            path: path.to_path_buf(),
            identity,
            repo,
        })
    }

    /// Open an existing repository at the given path
    #[instrument(skip(identity), fields(path = %path.display()))]
    pub fn open(path: &Path, identity: RepoIdentity) -> Result<Self> {
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            identity,
            repo,
        })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the inner git2 Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Get the HEAD commit
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head()?;
        head.peel_to_commit().map_err(GitError::Git2)
    }

    /// Get CommitInfo for the HEAD commit
    pub fn head_info(&self) -> Result<CommitInfo> {
        let commit = self.head_commit()?;
        Ok(commit_to_info(&commit))
    }

    /// Name of the branch HEAD points at
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        let name = head.shorthand().ok_or(GitError::InvalidReference)?;
        Ok(name.to_string())
    }

    /// Build a signature with an explicit timestamp
    pub(crate) fn signature_at(&self, when: DateTime<Utc>) -> Result<Signature<'static>> {
        Signature::new(
            &self.identity.name,
            &self.identity.email,
            &Time::new(when.timestamp(), 0),
        )
        .map_err(GitError::Git2)
    }
}

/// Convert a git2 Commit to CommitInfo
pub(crate) fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let summary = commit.summary().unwrap_or("(no message)").to_string();
    let body = commit.body().map(|b| b.to_string()).unwrap_or_default();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_default();

    CommitInfo::new(
        hash,
        summary,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn test_identity() -> RepoIdentity {
        RepoIdentity::new("gantry testing", "not_a_real@email.com")
    }

    #[test]
    fn test_init_sets_branch_and_remote() {
        let temp = TempDir::new().unwrap();
        let repo = GitRepo::init(
            temp.path(),
            "main",
            test_identity(),
            "https://example.com/acme/example-project.git",
        )
        .unwrap();

        let remote = repo.inner().find_remote("origin").unwrap();
        assert_eq!(
            remote.url(),
            Some("https://example.com/acme/example-project.git")
        );

        let config = repo.inner().config().unwrap();
        assert_eq!(config.get_string("user.name").unwrap(), "gantry testing");
        assert!(!config.get_bool("commit.gpgsign").unwrap());
    }

    #[test]
    fn test_open_missing_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::open(temp.path(), test_identity());
        assert!(result.is_err());
    }
}
