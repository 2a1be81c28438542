//! Gantry Testkit - scripted, reproducible fixture repositories
//!
//! Tests describe a repository as a list of construction steps (configure,
//! commit, branch, merge, release, write changelogs) and build it into a
//! temporary directory. The completed step list comes back with real commit
//! hashes filled in, so a test can independently re-derive the changelog or
//! release notes the build wrote and compare the files byte-for-byte.
//!
//! All timestamps are scripted or handed out by [`builder::FixtureClock`],
//! so building the same definition twice yields identical repositories.

pub mod actions;
pub mod builder;
pub mod commits;
pub mod consts;
pub mod definition;
pub mod fixtures;
pub mod messages;
pub mod project;

pub use actions::{
    ChangelogDestFile, CheckoutDetails, ConfigureDetails, MakeCommitsDetails, MergeDetails,
    ReleaseDetails, RepoAction, SquashDetails, WriteChangelogsDetails,
};
pub use builder::{build_repo_from_definition, FixtureClock};
pub use commits::{
    commit_detail_for_message, commit_detail_for_spec, commit_details_for_specs,
    separate_squashed_commit, CommitSpec,
};
pub use definition::{
    commits_in_definition, configure_in_definition, hvcs_client_for_definition,
    split_actions_by_release_tag, versions_in_definition, CommitFilter,
};
pub use fixtures::{
    branched_repo_definition, build_fixture, trunk_repo_definition,
    trunk_repo_with_unreleased_definition, BuiltRepo,
};
pub use project::ExampleProject;
