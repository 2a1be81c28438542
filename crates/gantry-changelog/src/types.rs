//! Changelog data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gantry_core::version::Version;

/// Pseudo-version key for commits that are not part of any release yet
pub const UNRELEASED: &str = "Unreleased";

/// Placeholder sha for a commit definition that has not been written to a
/// repository yet
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// A classified commit as it appears in changelog bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Full commit message
    pub message: String,
    /// Convention tag, e.g. `feat`, `:boom:`, `ENH`, or `unknown`
    pub type_tag: String,
    /// Changelog section this commit belongs to
    pub category: String,
    /// Description paragraphs (subject first)
    pub descriptions: Vec<String>,
    /// Breaking-change paragraphs
    pub breaking_descriptions: Vec<String>,
    /// Scope, empty when absent
    pub scope: String,
    /// Linked merge request reference (`#42`, `!42`), empty when absent
    pub merge_request: String,
    /// Commit sha (40 hex chars, [`NULL_SHA`] until the commit exists)
    pub sha: String,
    /// Commit timestamp, filled in once the commit exists
    pub timestamp: Option<DateTime<Utc>>,
    /// Whether the commit shows up in rendered changelogs
    pub include_in_changelog: bool,
}

impl CommitDetail {
    /// A detail for a message no parser recognized
    pub fn unknown(message: impl Into<String>, category: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            descriptions: vec![message.clone()],
            message,
            type_tag: "unknown".to_string(),
            category: category.into(),
            breaking_descriptions: Vec::new(),
            scope: String::new(),
            merge_request: String::new(),
            sha: NULL_SHA.to_string(),
            timestamp: None,
            include_in_changelog: false,
        }
    }

    /// First 7 characters of the sha
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Whether the detail carries a breaking change
    pub fn is_breaking(&self) -> bool {
        !self.breaking_descriptions.is_empty()
    }
}

/// The commits attributed to one released version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChanges {
    pub commits: Vec<CommitDetail>,
}

impl VersionChanges {
    pub fn new(commits: Vec<CommitDetail>) -> Self {
        Self { commits }
    }

    /// Sorted unique changelog categories across the commits
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.commits.iter().map(|c| c.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Commits in a given category, original order preserved
    pub fn commits_in_category<'a>(&'a self, category: &str) -> Vec<&'a CommitDetail> {
        self.commits
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }
}

/// Insertion-ordered map of `version -> changes`, oldest release first.
///
/// The [`UNRELEASED`] pseudo-version, when present, is always the newest
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseHistory {
    entries: Vec<(String, VersionChanges)>,
}

impl ReleaseHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a version's changes, preserving insertion order for
    /// new versions
    pub fn push_version(&mut self, version: impl Into<String>, changes: VersionChanges) {
        let version = version.into();
        if let Some(entry) = self.entries.iter_mut().find(|(v, _)| *v == version) {
            entry.1 = changes;
        } else {
            self.entries.push((version, changes));
        }
    }

    pub fn get(&self, version: &str) -> Option<&VersionChanges> {
        self.entries
            .iter()
            .find(|(v, _)| v == version)
            .map(|(_, c)| c)
    }

    /// Iterate oldest release first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionChanges)> {
        self.entries.iter().map(|(v, c)| (v.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Versions in insertion order
    pub fn versions(&self) -> Vec<&str> {
        self.entries.iter().map(|(v, _)| v.as_str()).collect()
    }

    /// Restrict to releases up to and including `max`. Drops entries whose
    /// key is not a parseable version (notably [`UNRELEASED`]).
    pub fn limited_to(&self, max: &Version) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(v, _)| match Version::parse(v) {
                Ok(version) => version <= *max,
                Err(_) => false,
            })
            .cloned()
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(category: &str) -> CommitDetail {
        let mut d = CommitDetail::unknown("msg", category);
        d.include_in_changelog = true;
        d
    }

    #[test]
    fn test_categories_sorted_unique() {
        let changes = VersionChanges::new(vec![
            detail("Features"),
            detail("Bug Fixes"),
            detail("Features"),
        ]);
        assert_eq!(changes.categories(), vec!["Bug Fixes", "Features"]);
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut history = ReleaseHistory::new();
        history.push_version("0.1.0", VersionChanges::default());
        history.push_version("0.2.0", VersionChanges::default());
        history.push_version(UNRELEASED, VersionChanges::default());

        assert_eq!(history.versions(), vec!["0.1.0", "0.2.0", UNRELEASED]);
    }

    #[test]
    fn test_limited_to_drops_newer_and_unreleased() {
        let mut history = ReleaseHistory::new();
        history.push_version("0.1.0", VersionChanges::default());
        history.push_version("0.2.0", VersionChanges::default());
        history.push_version(UNRELEASED, VersionChanges::default());

        let max = Version::parse("0.1.0").unwrap();
        let limited = history.limited_to(&max);
        assert_eq!(limited.versions(), vec!["0.1.0"]);
    }

    #[test]
    fn test_push_version_replaces() {
        let mut history = ReleaseHistory::new();
        history.push_version("0.1.0", VersionChanges::default());
        history.push_version("0.1.0", VersionChanges::new(vec![detail("Features")]));

        assert_eq!(history.len(), 1);
        assert_eq!(history.get("0.1.0").unwrap().commits.len(), 1);
    }
}
