//! Repository construction steps
//!
//! A fixture repository is described as an ordered list of [`RepoAction`]
//! values. The builder executes them in order and returns a completed copy
//! of the list with real commit hashes and messages filled in, which queries
//! and renderers then consume.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use gantry_changelog::CommitDetail;
use gantry_core::config::{ChangelogOutputFormat, CommitConvention, HvcsKind};
use gantry_core::version::{TagFormat, Version};
use gantry_git::MergeFavor;

use crate::consts::{DEFAULT_MERGE_STRATEGY, EXAMPLE_HVCS_DOMAIN};

/// One scripted repository construction step
#[derive(Debug, Clone)]
pub enum RepoAction {
    /// Scaffold the project, initialize git, and write the configuration
    Configure(ConfigureDetails),
    /// Change the work file and commit once per detail
    MakeCommits(MakeCommitsDetails),
    /// Stamp the version, commit, and tag
    Release(ReleaseDetails),
    /// Switch branches, optionally creating one
    Checkout(CheckoutDetails),
    /// Squash-merge a branch into the current one
    Squash(SquashDetails),
    /// Merge a branch into the current one
    Merge(MergeDetails),
    /// Write the changelog files the release tool would have written
    WriteChangelogs(WriteChangelogsDetails),
}

#[derive(Debug, Clone)]
pub struct ConfigureDetails {
    pub commit_convention: CommitConvention,
    pub hvcs_kind: HvcsKind,
    pub hvcs_domain: String,
    /// `None` means the default format; the builder fills it in
    pub tag_format: Option<TagFormat>,
    pub mask_initial_release: bool,
    /// Extra dotted-path keys applied to the configuration file
    pub extra_configs: Vec<(String, toml::Value)>,
}

impl ConfigureDetails {
    pub fn new(commit_convention: CommitConvention, hvcs_kind: HvcsKind) -> Self {
        Self {
            commit_convention,
            hvcs_kind,
            hvcs_domain: EXAMPLE_HVCS_DOMAIN.to_string(),
            tag_format: None,
            mask_initial_release: true,
            extra_configs: Vec::new(),
        }
    }

    pub fn with_tag_format(mut self, tag_format: TagFormat) -> Self {
        self.tag_format = Some(tag_format);
        self
    }

    pub fn with_mask_initial_release(mut self, mask: bool) -> Self {
        self.mask_initial_release = mask;
        self
    }

    pub fn with_extra_config(mut self, key: impl Into<String>, value: toml::Value) -> Self {
        self.extra_configs.push((key.into(), value));
        self
    }
}

#[derive(Debug, Clone)]
pub struct MakeCommitsDetails {
    pub commits: Vec<CommitDetail>,
}

#[derive(Debug, Clone)]
pub struct ReleaseDetails {
    pub version: String,
    pub when: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum CheckoutDetails {
    /// Create a branch off `start_branch` and switch to it
    CreateBranch { name: String, start_branch: String },
    /// Switch to an existing branch
    Existing { branch: String },
}

#[derive(Debug, Clone)]
pub struct SquashDetails {
    pub branch: String,
    pub favor: MergeFavor,
    /// Definition of the squash commit; sha and message are filled in by the
    /// builder
    pub commit: CommitDetail,
}

impl SquashDetails {
    pub fn new(branch: impl Into<String>, commit: CommitDetail) -> Self {
        Self {
            branch: branch.into(),
            favor: DEFAULT_MERGE_STRATEGY,
            commit,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MergeDetails {
    FastForward {
        branch: String,
    },
    Commit {
        branch: String,
        favor: MergeFavor,
        commit: CommitDetail,
    },
}

impl MergeDetails {
    pub fn commit(branch: impl Into<String>, commit: CommitDetail) -> Self {
        Self::Commit {
            branch: branch.into(),
            favor: DEFAULT_MERGE_STRATEGY,
            commit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WriteChangelogsDetails {
    /// Version the pending commits are attributed to
    pub new_version: String,
    /// Restrict rendered output to versions at or below this one
    pub max_version: Option<Version>,
    pub dest_files: Vec<ChangelogDestFile>,
}

#[derive(Debug, Clone)]
pub struct ChangelogDestFile {
    pub path: PathBuf,
    pub format: ChangelogOutputFormat,
}

impl WriteChangelogsDetails {
    /// The standard pair of changelog files fixtures maintain
    pub fn default_files(new_version: impl Into<String>) -> Self {
        Self {
            new_version: new_version.into(),
            max_version: None,
            dest_files: vec![
                ChangelogDestFile {
                    path: PathBuf::from("CHANGELOG.md"),
                    format: ChangelogOutputFormat::Markdown,
                },
                ChangelogDestFile {
                    path: PathBuf::from("docs/CHANGELOG.rst"),
                    format: ChangelogOutputFormat::RestructuredText,
                },
            ],
        }
    }
}
