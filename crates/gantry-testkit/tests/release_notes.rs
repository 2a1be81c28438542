//! Release notes derived from a completed fixture definition.

use gantry_changelog::{render_release_notes, ReleaseNotesOptions};
use gantry_core::config::{CommitConvention, HvcsKind};
use gantry_core::version::Version;
use gantry_testkit::consts::fixture_epoch;
use gantry_testkit::{
    build_fixture, commits_in_definition, configure_in_definition, hvcs_client_for_definition,
    split_actions_by_release_tag, trunk_repo_definition, CommitFilter,
};

fn notes_options() -> ReleaseNotesOptions {
    ReleaseNotesOptions::new(fixture_epoch().date_naive())
}

#[test]
fn notes_for_a_followup_release_link_the_comparison() {
    let built = build_fixture(trunk_repo_definition(
        CommitConvention::Conventional,
        HvcsKind::Github,
    ))
    .unwrap();

    let tag_format = configure_in_definition(&built.definition)
        .unwrap()
        .tag_format
        .clone()
        .unwrap();
    let groups = split_actions_by_release_tag(&built.definition, &tag_format);
    let (_, version_actions) = groups
        .iter()
        .find(|(tag, _)| tag == "v0.2.0")
        .expect("actions for v0.2.0");

    let history = commits_in_definition(version_actions, CommitFilter::for_changelog());
    let changes = history.get("0.2.0").unwrap();
    let hvcs = hvcs_client_for_definition(&built.definition).unwrap();

    let notes = render_release_notes(
        &Version::parse("0.2.0").unwrap(),
        changes,
        hvcs.as_ref(),
        &notes_options().with_previous_version(Some(Version::parse("0.1.0").unwrap())),
    );

    assert!(notes.starts_with("## v0.2.0 (2024-05-01)\n"));
    assert!(notes.contains("### Bug Fixes\n"));
    assert!(notes.contains("### Features\n"));
    assert!(notes.ends_with(
        "---\n\n\
         **Detailed Changes**: [v0.1.0...v0.2.0]\
         (https://example.com/acme/example-project/compare/v0.1.0...v0.2.0)\n"
    ));
}

#[test]
fn notes_for_the_first_release_are_masked() {
    let built = build_fixture(trunk_repo_definition(
        CommitConvention::Conventional,
        HvcsKind::Github,
    ))
    .unwrap();

    let history = commits_in_definition(&built.definition, CommitFilter::for_changelog());
    let changes = history.get("0.1.0").unwrap();
    let hvcs = hvcs_client_for_definition(&built.definition).unwrap();

    let notes = render_release_notes(
        &Version::parse("0.1.0").unwrap(),
        changes,
        hvcs.as_ref(),
        &notes_options(),
    );
    assert_eq!(notes, "## v0.1.0 (2024-05-01)\n\n- Initial Release\n");
}

#[test]
fn gitea_notes_skip_the_comparison_footer() {
    let built = build_fixture(trunk_repo_definition(
        CommitConvention::Conventional,
        HvcsKind::Gitea,
    ))
    .unwrap();

    let history = commits_in_definition(&built.definition, CommitFilter::for_changelog());
    let changes = history.get("0.2.0").unwrap();
    let hvcs = hvcs_client_for_definition(&built.definition).unwrap();

    let notes = render_release_notes(
        &Version::parse("0.2.0").unwrap(),
        changes,
        hvcs.as_ref(),
        &notes_options().with_previous_version(Some(Version::parse("0.1.0").unwrap())),
    );
    assert!(!notes.contains("Detailed Changes"));
}

#[test]
fn license_line_sits_under_the_heading() {
    let built = build_fixture(trunk_repo_definition(
        CommitConvention::Conventional,
        HvcsKind::Github,
    ))
    .unwrap();

    let history = commits_in_definition(&built.definition, CommitFilter::for_changelog());
    let changes = history.get("0.2.0").unwrap();
    let hvcs = hvcs_client_for_definition(&built.definition).unwrap();

    let notes = render_release_notes(
        &Version::parse("0.2.0").unwrap(),
        changes,
        hvcs.as_ref(),
        &notes_options()
            .with_license_name("Apache-2.0")
            .with_previous_version(Some(Version::parse("0.1.0").unwrap())),
    );
    assert!(notes.starts_with(
        "## v0.2.0 (2024-05-01)\n\n\
         _This release is published under the Apache-2.0 License._\n\n"
    ));
}
