//! Fixture repository builder
//!
//! Executes a list of [`RepoAction`] steps against a destination directory
//! and returns the completed list with real commit hashes, messages, and
//! timestamps filled in. Rebuilding the same definition produces a
//! byte-identical repository because every timestamp comes either from the
//! step itself or from a [`FixtureClock`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

use gantry_changelog::{write_changelog, CommitDetail, ReleaseHistory, RenderOptions, VersionChanges};
use gantry_core::config::CommitConvention;
use gantry_core::error::{GantryError, Result};
use gantry_core::version::TagFormat;
use gantry_git::{GitRepo, RepoIdentity};
use gantry_hvcs::{hvcs_client, HvcsClient};

use crate::actions::{
    CheckoutDetails, ConfigureDetails, MergeDetails, RepoAction, WriteChangelogsDetails,
};
use crate::commits::separate_squashed_commit;
use crate::consts::{
    example_remote_url, fixture_epoch, release_commit_message, COMMIT_AUTHOR_EMAIL,
    COMMIT_AUTHOR_NAME, DEFAULT_BRANCH_NAME,
};
use crate::project::ExampleProject;

/// Hands out strictly increasing timestamps, one second apart
#[derive(Debug, Clone)]
pub struct FixtureClock {
    next: DateTime<Utc>,
}

impl FixtureClock {
    pub fn new() -> Self {
        Self {
            next: fixture_epoch(),
        }
    }

    /// Take the next timestamp
    pub fn now(&mut self) -> DateTime<Utc> {
        let when = self.next;
        self.next += Duration::seconds(1);
        when
    }

    /// Move past an externally supplied timestamp so later implicit
    /// timestamps stay unique and ordered
    pub fn observe(&mut self, when: DateTime<Utc>) {
        if when >= self.next {
            self.next = when + Duration::seconds(1);
        }
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::new()
    }
}

struct RepoBuilder {
    project: Option<ExampleProject>,
    repo: Option<GitRepo>,
    hvcs: Option<Box<dyn HvcsClient>>,
    convention: CommitConvention,
    tag_format: TagFormat,
    mask_initial_release: bool,
    current_commits: Vec<CommitDetail>,
    history: ReleaseHistory,
    clock: FixtureClock,
}

impl RepoBuilder {
    fn new() -> Self {
        Self {
            project: None,
            repo: None,
            hvcs: None,
            convention: CommitConvention::Conventional,
            tag_format: TagFormat::default(),
            mask_initial_release: true,
            current_commits: Vec::new(),
            history: ReleaseHistory::new(),
            clock: FixtureClock::new(),
        }
    }

    fn project(&self) -> Result<&ExampleProject> {
        self.project
            .as_ref()
            .ok_or_else(|| GantryError::Other("no configure step has run yet".to_string()))
    }

    fn repo(&self) -> Result<&GitRepo> {
        self.repo
            .as_ref()
            .ok_or_else(|| GantryError::Other("no configure step has run yet".to_string()))
    }

    fn hvcs(&self) -> Result<&dyn HvcsClient> {
        self.hvcs
            .as_deref()
            .ok_or_else(|| GantryError::Other("no configure step has run yet".to_string()))
    }

    fn timestamp_for(&mut self, explicit: Option<DateTime<Utc>>) -> DateTime<Utc> {
        match explicit {
            Some(when) => {
                self.clock.observe(when);
                when
            }
            None => self.clock.now(),
        }
    }

    fn configure(&mut self, dest_dir: &Path, details: &mut ConfigureDetails) -> Result<()> {
        let project = ExampleProject::scaffold(dest_dir)?;

        let remote_url = example_remote_url(&details.hvcs_domain);
        let repo = GitRepo::init(
            dest_dir,
            DEFAULT_BRANCH_NAME,
            RepoIdentity::new(COMMIT_AUTHOR_NAME, COMMIT_AUTHOR_EMAIL),
            &remote_url,
        )?;

        // fill in the default so completed definitions are self-contained
        let tag_format = details.tag_format.clone().unwrap_or_default();
        details.tag_format = Some(tag_format.clone());

        project.set_config_value(
            "tool.gantry.commit_parser",
            &toml::Value::from(details.commit_convention.as_str()),
        )?;
        project.set_config_value(
            "tool.gantry.hvcs.kind",
            &toml::Value::from(details.hvcs_kind.as_str()),
        )?;
        project.set_config_value(
            "tool.gantry.hvcs.domain",
            &toml::Value::from(details.hvcs_domain.as_str()),
        )?;
        project.set_config_value(
            "tool.gantry.tag_format",
            &toml::Value::from(tag_format.pattern()),
        )?;
        project.set_config_value(
            "tool.gantry.changelog.mask_initial_release",
            &toml::Value::from(details.mask_initial_release),
        )?;
        for (key, value) in &details.extra_configs {
            project.set_config_value(key, value)?;
        }

        repo.stage_all()?;

        self.hvcs = Some(hvcs_client(details.hvcs_kind, &remote_url)?);
        self.convention = details.commit_convention;
        self.tag_format = tag_format;
        self.mask_initial_release = details.mask_initial_release;
        self.project = Some(project);
        self.repo = Some(repo);
        Ok(())
    }

    fn make_commits(&mut self, commits: &mut [CommitDetail]) -> Result<()> {
        for commit in commits.iter_mut() {
            self.project()?.change_work_file()?;
            self.repo()?.stage_all()?;

            let when = self.timestamp_for(commit.timestamp);
            let info = self.repo()?.commit_all(&commit.message, when)?;

            commit.message = info.full_message();
            commit.sha = info.hash.clone();
            commit.timestamp = Some(info.timestamp);
        }

        self.current_commits
            .extend(commits.iter().filter(|c| c.include_in_changelog).cloned());
        Ok(())
    }

    fn write_changelogs(&mut self, details: &WriteChangelogsDetails) -> Result<()> {
        self.history.push_version(
            details.new_version.clone(),
            VersionChanges::new(std::mem::take(&mut self.current_commits)),
        );

        let root = self.project()?.root().to_path_buf();
        for dest in &details.dest_files {
            let path = root.join(&dest.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let opts = RenderOptions::new(dest.format, fixture_epoch().date_naive())
                .with_mask_initial_release(self.mask_initial_release)
                .with_max_version(details.max_version.clone());
            write_changelog(&path, &self.history, self.hvcs()?, &opts)?;
        }
        Ok(())
    }

    fn release(&mut self, version: &str, when: DateTime<Utc>) -> Result<()> {
        self.project()?.stamp_version(version)?;
        self.repo()?.stage_all()?;

        self.clock.observe(when);
        self.repo()?
            .commit_all(&release_commit_message(version), when)?;

        // the tag lands one second after its commit
        let tag_when = when + Duration::seconds(1);
        self.clock.observe(tag_when);
        let tag_name = self.tag_format.format(version);
        self.repo()?.create_tag(&tag_name, &tag_name, tag_when)?;
        debug!(version, tag = %tag_name, "released");
        Ok(())
    }

    fn checkout(&mut self, details: &CheckoutDetails) -> Result<()> {
        match details {
            CheckoutDetails::CreateBranch { name, start_branch } => {
                self.repo()?.create_branch(name, start_branch)?;
                self.repo()?.checkout_branch(name)?;
            }
            CheckoutDetails::Existing { branch } => {
                self.repo()?.checkout_branch(branch)?;
            }
        }
        Ok(())
    }

    fn squash(
        &mut self,
        branch: &str,
        favor: gantry_git::MergeFavor,
        commit: &mut CommitDetail,
    ) -> Result<()> {
        let when = self.timestamp_for(commit.timestamp);
        let info = self.repo()?.merge_squash(branch, &commit.message, when, favor)?;

        commit.message = info.full_message();
        commit.sha = info.hash.clone();
        commit.timestamp = Some(info.timestamp);

        if commit.include_in_changelog {
            self.current_commits
                .extend(separate_squashed_commit(commit, self.convention));
        }
        Ok(())
    }

    fn merge(&mut self, details: &mut MergeDetails) -> Result<()> {
        match details {
            MergeDetails::FastForward { branch } => {
                self.repo()?.merge_ff(branch)?;
            }
            MergeDetails::Commit {
                branch,
                favor,
                commit,
            } => {
                let when = self.timestamp_for(commit.timestamp);
                let info = self
                    .repo()?
                    .merge_no_ff(branch, &commit.message, when, *favor)?;

                commit.message = info.full_message();
                commit.sha = info.hash.clone();
                commit.timestamp = Some(info.timestamp);

                if commit.include_in_changelog {
                    self.current_commits.push(commit.clone());
                }
            }
        }
        Ok(())
    }
}

/// Execute construction steps in `dest_dir` and return the completed
/// definition
#[instrument(skip_all, fields(dest = %dest_dir.display(), steps = steps.len()))]
pub fn build_repo_from_definition(
    dest_dir: &Path,
    steps: &[RepoAction],
) -> Result<Vec<RepoAction>> {
    let mut builder = RepoBuilder::new();
    let mut completed: Vec<RepoAction> = Vec::with_capacity(steps.len());

    for step in steps {
        let mut step = step.clone();
        match &mut step {
            RepoAction::Configure(details) => builder.configure(dest_dir, details)?,
            RepoAction::MakeCommits(details) => builder.make_commits(&mut details.commits)?,
            RepoAction::WriteChangelogs(details) => builder.write_changelogs(details)?,
            RepoAction::Release(details) => builder.release(&details.version, details.when)?,
            RepoAction::Checkout(details) => builder.checkout(details)?,
            RepoAction::Squash(details) => {
                let branch = details.branch.clone();
                let favor = details.favor;
                builder.squash(&branch, favor, &mut details.commit)?;
            }
            RepoAction::Merge(details) => builder.merge(details)?,
        }
        completed.push(step);
    }

    Ok(completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn test_clock_monotonic() {
        let mut clock = FixtureClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(b - a, Duration::seconds(1));
    }

    #[test]
    fn test_clock_observe_advances() {
        let mut clock = FixtureClock::new();
        let later = fixture_epoch() + Duration::minutes(10);
        clock.observe(later);
        assert!(clock.now() > later);
    }

    #[test]
    fn test_clock_observe_ignores_past() {
        let mut clock = FixtureClock::new();
        let first = clock.now();
        clock.observe(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert!(clock.now() > first);
    }
}
