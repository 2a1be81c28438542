//! Canned fixture repositories
//!
//! Ready-made definitions for the repository shapes tests reach for most:
//! a linear trunk with two releases, the same trunk with unreleased work on
//! top, and a branched history with a squash merge and a merge commit.
//! Each definition is parameterized by commit convention and hosting
//! service so one test can run against every parser.

use chrono::{DateTime, Duration, Utc};
use tempfile::TempDir;

use gantry_changelog::UNRELEASED;
use gantry_core::config::{CommitConvention, HvcsKind};
use gantry_core::error::Result;

use crate::actions::{
    CheckoutDetails, ConfigureDetails, MakeCommitsDetails, MergeDetails, ReleaseDetails,
    RepoAction, SquashDetails, WriteChangelogsDetails,
};
use crate::builder::build_repo_from_definition;
use crate::commits::{commit_detail_for_message, commit_details_for_specs, CommitSpec};
use crate::consts::fixture_epoch;
use crate::messages::{merge_message_github, squash_message_github};

/// A fixture repository built into a temporary directory. Dropping it
/// removes the directory.
pub struct BuiltRepo {
    pub dir: TempDir,
    pub definition: Vec<RepoAction>,
}

impl BuiltRepo {
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}

/// Build any definition into a fresh temporary directory
pub fn build_fixture(definition: Vec<RepoAction>) -> Result<BuiltRepo> {
    let dir = TempDir::new()?;
    let definition = build_repo_from_definition(dir.path(), &definition)?;
    Ok(BuiltRepo { dir, definition })
}

fn release_when(hours: i64) -> DateTime<Utc> {
    fixture_epoch() + Duration::hours(hours)
}

fn initial_specs() -> Vec<CommitSpec> {
    vec![
        CommitSpec::new("Initial commit", "Initial commit", "Initial commit").hidden(),
        CommitSpec::new(
            "feat: add project scaffolding",
            ":sparkles: add project scaffolding",
            "ENH: add project scaffolding",
        ),
    ]
}

fn second_release_specs() -> Vec<CommitSpec> {
    vec![
        CommitSpec::new(
            "fix(parser): handle empty scope (#11)",
            ":bug: (parser) handle empty scope (#11)",
            "BUG(parser): handle empty scope (#11)",
        ),
        CommitSpec::new(
            "feat: support rst output",
            ":sparkles: support rst output",
            "ENH: support rst output",
        ),
    ]
}

fn unreleased_specs() -> Vec<CommitSpec> {
    vec![CommitSpec::new(
        "docs: update usage examples",
        ":memo: update usage examples",
        "DOC: update usage examples",
    )]
}

fn feature_branch_specs() -> Vec<CommitSpec> {
    vec![
        CommitSpec::new(
            "feat: add feature one",
            ":sparkles: add feature one",
            "ENH: add feature one",
        ),
        CommitSpec::new(
            "fix: correct feature edge case",
            ":bug: correct feature edge case",
            "BUG: correct feature edge case",
        ),
    ]
}

fn fix_branch_specs() -> Vec<CommitSpec> {
    vec![CommitSpec::new(
        "fix: guard against empty input",
        ":bug: guard against empty input",
        "BUG: guard against empty input",
    )]
}

/// Linear history on the default branch with two tagged releases
pub fn trunk_repo_definition(
    convention: CommitConvention,
    hvcs_kind: HvcsKind,
) -> Vec<RepoAction> {
    vec![
        RepoAction::Configure(ConfigureDetails::new(convention, hvcs_kind)),
        RepoAction::MakeCommits(MakeCommitsDetails {
            commits: commit_details_for_specs(&initial_specs(), convention),
        }),
        RepoAction::WriteChangelogs(WriteChangelogsDetails::default_files("0.1.0")),
        RepoAction::Release(ReleaseDetails {
            version: "0.1.0".to_string(),
            when: release_when(1),
        }),
        RepoAction::MakeCommits(MakeCommitsDetails {
            commits: commit_details_for_specs(&second_release_specs(), convention),
        }),
        RepoAction::WriteChangelogs(WriteChangelogsDetails::default_files("0.2.0")),
        RepoAction::Release(ReleaseDetails {
            version: "0.2.0".to_string(),
            when: release_when(2),
        }),
    ]
}

/// The trunk history plus commits that have not been released yet
pub fn trunk_repo_with_unreleased_definition(
    convention: CommitConvention,
    hvcs_kind: HvcsKind,
) -> Vec<RepoAction> {
    let mut definition = trunk_repo_definition(convention, hvcs_kind);
    definition.push(RepoAction::MakeCommits(MakeCommitsDetails {
        commits: commit_details_for_specs(&unreleased_specs(), convention),
    }));
    definition.push(RepoAction::WriteChangelogs(
        WriteChangelogsDetails::default_files(UNRELEASED),
    ));
    definition
}

/// History with a squash-merged feature branch and a no-ff merged fix
/// branch, three releases total
pub fn branched_repo_definition(
    convention: CommitConvention,
    hvcs_kind: HvcsKind,
) -> Vec<RepoAction> {
    // branch commits are hidden; the squash commit carries their messages
    // and is split back into pieces for the changelog
    let feature_commits: Vec<_> = commit_details_for_specs(&feature_branch_specs(), convention)
        .into_iter()
        .map(|mut c| {
            c.include_in_changelog = false;
            c
        })
        .collect();

    let squash_message = squash_message_github(
        feature_branch_specs()[0].message_for(convention),
        2,
        &feature_branch_specs()
            .iter()
            .map(|spec| spec.message_for(convention).to_string())
            .collect::<Vec<_>>(),
    );
    let squash_commit = commit_detail_for_message(&squash_message, convention);

    let merge_message = merge_message_github(3, "fix/empty-input");
    let merge_commit = commit_detail_for_message(&merge_message, convention);

    vec![
        RepoAction::Configure(ConfigureDetails::new(convention, hvcs_kind)),
        RepoAction::MakeCommits(MakeCommitsDetails {
            commits: commit_details_for_specs(&initial_specs(), convention),
        }),
        RepoAction::WriteChangelogs(WriteChangelogsDetails::default_files("0.1.0")),
        RepoAction::Release(ReleaseDetails {
            version: "0.1.0".to_string(),
            when: release_when(1),
        }),
        RepoAction::Checkout(CheckoutDetails::CreateBranch {
            name: "feat/feature-one".to_string(),
            start_branch: "main".to_string(),
        }),
        RepoAction::MakeCommits(MakeCommitsDetails {
            commits: feature_commits,
        }),
        RepoAction::Checkout(CheckoutDetails::Existing {
            branch: "main".to_string(),
        }),
        RepoAction::Squash(SquashDetails::new("feat/feature-one", squash_commit)),
        RepoAction::WriteChangelogs(WriteChangelogsDetails::default_files("0.2.0")),
        RepoAction::Release(ReleaseDetails {
            version: "0.2.0".to_string(),
            when: release_when(2),
        }),
        RepoAction::Checkout(CheckoutDetails::CreateBranch {
            name: "fix/empty-input".to_string(),
            start_branch: "main".to_string(),
        }),
        RepoAction::MakeCommits(MakeCommitsDetails {
            commits: commit_details_for_specs(&fix_branch_specs(), convention),
        }),
        RepoAction::Checkout(CheckoutDetails::Existing {
            branch: "main".to_string(),
        }),
        RepoAction::Merge(MergeDetails::commit("fix/empty-input", merge_commit)),
        RepoAction::WriteChangelogs(WriteChangelogsDetails::default_files("0.2.1")),
        RepoAction::Release(ReleaseDetails {
            version: "0.2.1".to_string(),
            when: release_when(3),
        }),
    ]
}
