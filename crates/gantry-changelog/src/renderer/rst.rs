//! reStructuredText version entries

use gantry_hvcs::HvcsClient;

use crate::types::{VersionChanges, UNRELEASED};

use super::{capitalize, scope_prefix, section_title, wrap_bullet};

const MAX_LINE_LENGTH: usize = 100;

/// One anchored, underlined changelog entry
pub(crate) fn version_entry(
    version: &str,
    changes: &VersionChanges,
    hvcs: &dyn HvcsClient,
    today: &str,
) -> String {
    let mut entry: Vec<String> = Vec::new();
    if version == UNRELEASED {
        entry.push(".. _changelog-unreleased:".to_string());
        entry.push(String::new());
        entry.push(version.to_string());
    } else {
        entry.push(format!(".. _changelog-v{}:", version));
        entry.push(String::new());
        entry.push(format!("v{} ({})", version, today));
    }
    let title_len = entry.last().map(|t| t.chars().count()).unwrap_or(0);
    entry.push("=".repeat(title_len));
    entry.push(String::new());

    let mut breaking_bullets: Vec<String> = Vec::new();
    let mut urls: Vec<String> = Vec::new();

    for section in changes.categories() {
        let title = section_title(&section);
        entry.push(format!("{}\n{}\n", title, "-".repeat(title.chars().count())));

        let mut section_bullets: Vec<String> = Vec::new();
        let commits = changes.commits_in_category(&section);

        for commit in &commits {
            if !commit.breaking_descriptions.is_empty() {
                breaking_bullets.push(format!(
                    "* {}{}",
                    scope_prefix(&commit.scope),
                    capitalize(&commit.breaking_descriptions.join("\n\n"))
                ));
            }

            let subject_line = format!(
                "* {}{}",
                scope_prefix(&commit.scope),
                capitalize(&commit.descriptions[0])
            );

            let mr_link = if commit.merge_request.is_empty() {
                String::new()
            } else {
                format!("(`{}`_,", commit.merge_request)
            };

            let mut sha_link = format!("`{}`_)", commit.short_sha());
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

        for commit in &commits {
            if !commit.merge_request.is_empty() {
                urls.push(format!(
                    ".. _{}: {}",
                    commit.merge_request,
                    hvcs.merge_request_url(&commit.merge_request)
                ));
            }
        }
        for commit in &commits {
            urls.push(format!(
                ".. _{}: {}",
                commit.short_sha(),
                hvcs.commit_hash_url(&commit.sha)
            ));
        }
    }

    if !breaking_bullets.is_empty() {
        entry.push(format!("Breaking Changes\n{}\n", "-".repeat(16)));
        breaking_bullets.sort();
        entry.extend(breaking_bullets);
        entry.push(String::new());
    }

    urls.sort();
    urls.dedup();
    entry.extend(urls);

    if entry.last().is_some_and(|l| l.is_empty()) {
        entry.pop();
    }

    entry.join("\n") + "\n"
}

/// The masked entry rendered for a project's first release
pub(crate) fn initial_version_entry(version: &str, today: &str) -> String {
    let title = format!("v{} ({})", version, today);
    format!(
        ".. _changelog-v{}:\n\n{}\n{}\n\n* Initial Release\n",
        version,
        title,
        "=".repeat(title.chars().count())
    )
}

#[cfg(test)]
mod tests {
    use gantry_hvcs::{Gitlab, RemoteRef};

    use crate::types::{CommitDetail, NULL_SHA};

    use super::*;

    fn hvcs() -> Gitlab {
        Gitlab::new(RemoteRef::parse("https://example.com/acme/example-project.git").unwrap())
    }

    fn commit(category: &str, desc: &str, mr: &str) -> CommitDetail {
        CommitDetail {
            message: desc.to_string(),
            type_tag: "feat".to_string(),
            category: category.to_string(),
            descriptions: vec![desc.to_string()],
            breaking_descriptions: Vec::new(),
            scope: String::new(),
            merge_request: mr.to_string(),
            sha: "abcdef1234567890abcdef1234567890abcdef12".to_string(),
            timestamp: None,
            include_in_changelog: true,
        }
    }

    #[test]
    fn test_version_entry_with_links() {
        let changes = VersionChanges::new(vec![commit("Features", "add thing", "!3")]);
        let entry = version_entry("1.2.0", &changes, &hvcs(), "2024-05-01");
        assert_eq!(
            entry,
            ".. _changelog-v1.2.0:\n\n\
             v1.2.0 (2024-05-01)\n\
             ===================\n\n\
             Features\n\
             --------\n\n\
             * Add thing (`!3`_, `abcdef1`_)\n\n\
             .. _!3: https://example.com/acme/example-project/-/merge_requests/3\n\
             .. _abcdef1: https://example.com/acme/example-project/-/commit/abcdef1234567890abcdef1234567890abcdef12\n"
        );
    }

    #[test]
    fn test_unreleased_anchor() {
        let changes = VersionChanges::new(vec![commit("Bug Fixes", "patch it", "")]);
        let entry = version_entry(UNRELEASED, &changes, &hvcs(), "2024-05-01");
        assert!(entry.starts_with(
            ".. _changelog-unreleased:\n\nUnreleased\n==========\n"
        ));
    }

    #[test]
    fn test_initial_version_entry() {
        assert_eq!(
            initial_version_entry("0.1.0", "2024-05-01"),
            ".. _changelog-v0.1.0:\n\n\
             v0.1.0 (2024-05-01)\n\
             ===================\n\n\
             * Initial Release\n"
        );
    }

    #[test]
    fn test_null_sha_placeholder_still_renders() {
        let mut c = commit("Features", "pending", "");
        c.sha = NULL_SHA.to_string();
        let changes = VersionChanges::new(vec![c]);
        let entry = version_entry("1.0.0", &changes, &hvcs(), "2024-05-01");
        assert!(entry.contains("`0000000`_"));
    }
}
