//! Queries over completed repository definitions
//!
//! After [`build_repo_from_definition`](crate::builder::build_repo_from_definition)
//! returns, the definition carries real hashes and messages. These helpers
//! extract the view a test needs: released versions, per-version commits,
//! configuration, or the actions belonging to each release.

use gantry_changelog::{CommitDetail, ReleaseHistory, VersionChanges, UNRELEASED};
use gantry_core::config::CommitConvention;
use gantry_core::error::{GantryError, Result};
use gantry_core::version::TagFormat;
use gantry_hvcs::{hvcs_client, HvcsClient};

use crate::actions::{ConfigureDetails, MergeDetails, RepoAction};
use crate::commits::separate_squashed_commit;
use crate::consts::example_remote_url;

/// How [`commits_in_definition`] selects commits
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitFilter {
    /// Keep only commits marked for the changelog, splitting squash commits
    /// into their original pieces
    pub for_changelog: bool,
    /// Drop merge commits entirely
    pub ignore_merge_commits: bool,
}

impl CommitFilter {
    pub fn for_changelog() -> Self {
        Self {
            for_changelog: true,
            ignore_merge_commits: false,
        }
    }
}

/// Versions in release order
pub fn versions_in_definition(steps: &[RepoAction]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|step| match step {
            RepoAction::Release(details) => Some(details.version.clone()),
            _ => None,
        })
        .collect()
}

/// The effective configuration, i.e. the last configure step
pub fn configure_in_definition(steps: &[RepoAction]) -> Option<&ConfigureDetails> {
    steps.iter().rev().find_map(|step| match step {
        RepoAction::Configure(details) => Some(details),
        _ => None,
    })
}

/// Group the definition's commits by the version that released them. Commits
/// after the last release land under [`UNRELEASED`].
pub fn commits_in_definition(steps: &[RepoAction], filter: CommitFilter) -> ReleaseHistory {
    let convention = configure_in_definition(steps)
        .map(|cfg| cfg.commit_convention)
        .unwrap_or(CommitConvention::Conventional);

    let mut history = ReleaseHistory::new();
    let mut commits: Vec<CommitDetail> = Vec::new();

    for step in steps {
        match step {
            RepoAction::MakeCommits(details) => {
                let mut made = details.commits.clone();
                if filter.for_changelog {
                    made.retain(|c| c.include_in_changelog);
                }
                commits.extend(made);
            }
            RepoAction::Squash(details) => {
                if filter.for_changelog {
                    if details.commit.include_in_changelog {
                        commits.extend(separate_squashed_commit(&details.commit, convention));
                    }
                } else {
                    commits.push(details.commit.clone());
                }
            }
            RepoAction::Merge(MergeDetails::Commit { commit, .. }) => {
                if filter.ignore_merge_commits
                    || (filter.for_changelog && !commit.include_in_changelog)
                {
                    continue;
                }
                commits.push(commit.clone());
            }
            RepoAction::Release(details) => {
                history.push_version(
                    details.version.clone(),
                    VersionChanges::new(std::mem::take(&mut commits)),
                );
            }
            _ => {}
        }
    }

    if !commits.is_empty() {
        history.push_version(UNRELEASED, VersionChanges::new(commits));
    }

    history
}

/// Split a definition into the actions that belong to each release tag.
///
/// The first group, keyed by the empty string, holds configure steps.
/// Changelog-writing steps are dropped. Actions after the last release are
/// grouped under [`UNRELEASED`], which is omitted when it holds nothing but
/// branch switches.
pub fn split_actions_by_release_tag(
    steps: &[RepoAction],
    tag_format: &TagFormat,
) -> Vec<(String, Vec<RepoAction>)> {
    let mut tags = versions_in_definition(steps)
        .into_iter()
        .map(|v| tag_format.format(&v));

    let mut groups: Vec<(String, Vec<RepoAction>)> = vec![(String::new(), Vec::new())];
    let mut current = tags.next().unwrap_or_else(|| UNRELEASED.to_string());
    groups.push((current.clone(), Vec::new()));

    for step in steps {
        match step {
            RepoAction::Configure(_) => {
                groups[0].1.push(step.clone());
                continue;
            }
            RepoAction::WriteChangelogs(_) => continue,
            _ => {}
        }

        if let Some(group) = groups.iter_mut().find(|(tag, _)| *tag == current) {
            group.1.push(step.clone());
        }

        if matches!(step, RepoAction::Release(_)) {
            current = tags.next().unwrap_or_else(|| UNRELEASED.to_string());
            groups.push((current.clone(), Vec::new()));
        }
    }

    // trailing branch switches carry no release content
    if let Some((tag, actions)) = groups.last_mut() {
        if tag == UNRELEASED {
            actions.retain(|step| !matches!(step, RepoAction::Checkout(_)));
            if actions.is_empty() {
                groups.pop();
            }
        }
    }

    groups
}

/// Build the HVCS client the definition was configured with
pub fn hvcs_client_for_definition(steps: &[RepoAction]) -> Result<Box<dyn HvcsClient>> {
    let cfg = configure_in_definition(steps)
        .ok_or_else(|| GantryError::Other("definition has no configure step".to_string()))?;
    let remote_url = example_remote_url(&cfg.hvcs_domain);
    Ok(hvcs_client(cfg.hvcs_kind, &remote_url)?)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use gantry_core::config::HvcsKind;

    use crate::actions::{MakeCommitsDetails, ReleaseDetails};
    use crate::commits::commit_detail_for_message;
    use crate::consts::fixture_epoch;

    use super::*;

    fn sample_definition() -> Vec<RepoAction> {
        let feat = commit_detail_for_message("feat: add thing", CommitConvention::Conventional);
        let mut chore =
            commit_detail_for_message("chore: cleanup", CommitConvention::Conventional);
        chore.include_in_changelog = false;
        let fix = commit_detail_for_message("fix: repair thing", CommitConvention::Conventional);

        vec![
            RepoAction::Configure(ConfigureDetails::new(
                CommitConvention::Conventional,
                HvcsKind::Github,
            )),
            RepoAction::MakeCommits(MakeCommitsDetails {
                commits: vec![feat, chore],
            }),
            RepoAction::Release(ReleaseDetails {
                version: "1.0.0".to_string(),
                when: fixture_epoch() + Duration::minutes(5),
            }),
            RepoAction::MakeCommits(MakeCommitsDetails {
                commits: vec![fix],
            }),
        ]
    }

    #[test]
    fn test_versions_in_definition() {
        assert_eq!(versions_in_definition(&sample_definition()), vec!["1.0.0"]);
    }

    #[test]
    fn test_commits_in_definition_unfiltered() {
        let history = commits_in_definition(&sample_definition(), CommitFilter::default());
        assert_eq!(history.versions(), vec!["1.0.0", UNRELEASED]);
        assert_eq!(history.get("1.0.0").unwrap().commits.len(), 2);
    }

    #[test]
    fn test_commits_in_definition_filtered() {
        let history =
            commits_in_definition(&sample_definition(), CommitFilter::for_changelog());
        assert_eq!(history.get("1.0.0").unwrap().commits.len(), 1);
        assert_eq!(history.get(UNRELEASED).unwrap().commits.len(), 1);
    }

    #[test]
    fn test_split_actions_by_release_tag() {
        let groups =
            split_actions_by_release_tag(&sample_definition(), &TagFormat::default());

        let tags: Vec<&str> = groups.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tags, vec!["", "v1.0.0", UNRELEASED]);
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[2].1.len(), 1);
    }

    #[test]
    fn test_hvcs_client_for_definition() {
        let client = hvcs_client_for_definition(&sample_definition()).unwrap();
        assert_eq!(client.kind(), HvcsKind::Github);
        assert_eq!(
            client.repo_url(),
            "https://example.com/acme/example-project"
        );
    }

    #[test]
    fn test_unreleased_group_with_only_checkouts_dropped() {
        let mut steps = sample_definition();
        steps.pop();
        steps.push(RepoAction::Checkout(
            crate::actions::CheckoutDetails::Existing {
                branch: "main".to_string(),
            },
        ));
        let groups = split_actions_by_release_tag(&steps, &TagFormat::default());
        let tags: Vec<&str> = groups.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tags, vec!["", "v1.0.0"]);
    }
}
