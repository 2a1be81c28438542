//! Markdown version entries

use gantry_hvcs::HvcsClient;

use crate::types::{VersionChanges, UNRELEASED};

use super::{capitalize, scope_prefix, section_title, wrap_bullet};

const MAX_LINE_LENGTH: usize = 100;

/// One `## vX.Y.Z` changelog entry
pub(crate) fn version_entry(
    version: &str,
    changes: &VersionChanges,
    hvcs: &dyn HvcsClient,
    today: &str,
) -> String {
    let mut entry: Vec<String> = vec![if version == UNRELEASED {
        format!("## {}\n", version)
    } else {
        format!("## v{} ({})\n", version, today)
    }];

    let mut breaking_bullets: Vec<String> = Vec::new();

    for section in changes.categories() {
        entry.push(format!("### {}\n", section_title(&section)));

        let mut section_bullets: Vec<String> = Vec::new();

        for commit in changes.commits_in_category(&section) {
            if !commit.breaking_descriptions.is_empty() {
                breaking_bullets.push(format!(
                    "- {}{}",
                    scope_prefix(&commit.scope),
                    capitalize(&commit.breaking_descriptions.join("\n\n"))
                ));
            }

            let subject_line = format!(
                "- {}{}",
                scope_prefix(&commit.scope),
                capitalize(&commit.descriptions[0])
            );

            let mr_link = if commit.merge_request.is_empty() {
                String::new()
            } else {
                format!(
                    "([{}]({}),",
                    commit.merge_request,
                    hvcs.merge_request_url(&commit.merge_request)
                )
            };

            let mut sha_link = format!(
                "[`{}`]({}))",
                commit.short_sha(),
                hvcs.commit_hash_url(&commit.sha)
            );
            if mr_link.is_empty() {
                sha_link = format!("({}", sha_link);
            }

            let bullet = wrap_bullet(&subject_line, &mr_link, &sha_link, MAX_LINE_LENGTH);
            if !section_bullets.contains(&bullet) {
                section_bullets.push(bullet);
            }
        }

        section_bullets.sort();
        entry.extend(section_bullets);
    }

    if !breaking_bullets.is_empty() {
        entry.push("### Breaking Changes\n".to_string());
        breaking_bullets.sort();
        entry.extend(breaking_bullets);
        entry.push(String::new());
    }

    entry.join("\n")
}

/// The masked entry rendered for a project's first release
pub(crate) fn initial_version_entry(version: &str, today: &str) -> String {
    format!("## v{} ({})\n\n- Initial Release\n", version, today)
}
