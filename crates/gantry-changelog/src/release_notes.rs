//! Release notes rendering
//!
//! Release notes are Markdown only and differ from the changelog entry for
//! the same version: lines are allowed to run much longer since the hosting
//! service wraps them, duplicate bullets are kept, and a compare-link footer
//! is appended when a previous release exists.

use chrono::NaiveDate;

use gantry_core::version::{TagFormat, Version};
use gantry_hvcs::HvcsClient;

use crate::renderer::{capitalize, scope_prefix, section_title, wrap_bullet};
use crate::types::VersionChanges;

const MAX_LINE_LENGTH: usize = 1000;

/// Controls for [`render_release_notes`]
#[derive(Debug, Clone)]
pub struct ReleaseNotesOptions {
    /// SPDX name rendered in the license line, empty to omit the line
    pub license_name: String,
    /// Render a bare "Initial Release" body for a first release
    pub mask_initial_release: bool,
    /// The release preceding this one, `None` for a first release
    pub previous_version: Option<Version>,
    /// Date stamped on the heading
    pub today: NaiveDate,
    /// Tag format used to build compare-link refs
    pub tag_format: TagFormat,
}

impl ReleaseNotesOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            license_name: String::new(),
            mask_initial_release: true,
            previous_version: None,
            today,
            tag_format: TagFormat::default(),
        }
    }

    pub fn with_license_name(mut self, license_name: impl Into<String>) -> Self {
        self.license_name = license_name.into();
        self
    }

    pub fn with_previous_version(mut self, previous_version: Option<Version>) -> Self {
        self.previous_version = previous_version;
        self
    }

    pub fn with_mask_initial_release(mut self, mask: bool) -> Self {
        self.mask_initial_release = mask;
        self
    }
}

/// Render the release notes body for one version
pub fn render_release_notes(
    version: &Version,
    changes: &VersionChanges,
    hvcs: &dyn HvcsClient,
    opts: &ReleaseNotesOptions,
) -> String {
    let today = opts.today.format("%Y-%m-%d").to_string();

    let entry = if opts.mask_initial_release && opts.previous_version.is_none() {
        initial_version_entry(version, &today, &opts.license_name)
    } else {
        version_entry(version, changes, hvcs, &today, &opts.license_name)
    };

    let mut parts: Vec<String> = vec![entry.trim_end().to_string()];

    if let Some(previous) = &opts.previous_version {
        if hvcs.supports_compare_url() {
            let prev_tag = opts.tag_format.format(&previous.to_string());
            let new_tag = opts.tag_format.format(&version.to_string());
            parts.push("---".to_string());
            parts.push(format!(
                "**Detailed Changes**: [{}...{}]({})",
                prev_tag,
                new_tag,
                hvcs.compare_url(&prev_tag, &new_tag)
            ));
        }
    }

    parts.join("\n\n").trim_end().to_string() + "\n"
}

fn heading(version: &Version, today: &str, license_name: &str) -> Vec<String> {
    let mut lines = vec![format!("## v{} ({})", version, today)];
    if license_name.is_empty() {
        lines.push(String::new());
    } else {
        lines.push(String::new());
        lines.push(format!(
            "_This release is published under the {} License._",
            license_name
        ));
        lines.push(String::new());
    }
    lines
}

fn version_entry(
    version: &Version,
    changes: &VersionChanges,
    hvcs: &dyn HvcsClient,
    today: &str,
    license_name: &str,
) -> String {
    let mut entry = heading(version, today, license_name);

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

            // duplicates are kept here, unlike the changelog
            section_bullets.push(wrap_bullet(&subject_line, &mr_link, &sha_link, MAX_LINE_LENGTH));
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

fn initial_version_entry(version: &Version, today: &str, license_name: &str) -> String {
    let mut lines = heading(version, today, license_name);
    lines.push("- Initial Release".to_string());
    lines.push(String::new());
    lines.join("\n")
}
