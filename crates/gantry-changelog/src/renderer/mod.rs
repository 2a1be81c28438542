//! Changelog renderers
//!
//! Builds the exact file content the release tool writes, so tests can
//! compare files byte-for-byte.

mod markdown;
mod rst;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use gantry_core::config::ChangelogOutputFormat;
use gantry_core::error::ChangelogError;
use gantry_core::version::Version;
use gantry_hvcs::HvcsClient;

use crate::types::{ReleaseHistory, UNRELEASED};

/// Marker line under which new Markdown changelog entries are inserted
pub const MD_CHANGELOG_INSERTION_FLAG: &str = "<!-- version list -->";

/// Marker lines under which new reStructuredText changelog entries are
/// inserted
pub const RST_CHANGELOG_INSERTION_FLAG: &str = "..\n    version list";

/// Controls for [`render_changelog`]
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output_format: ChangelogOutputFormat,
    /// Render the oldest release as a bare "Initial Release" entry
    pub mask_initial_release: bool,
    /// Drop releases newer than this version (and any unreleased entry)
    pub max_version: Option<Version>,
    /// Date stamped on every version heading
    pub today: NaiveDate,
}

impl RenderOptions {
    pub fn new(output_format: ChangelogOutputFormat, today: NaiveDate) -> Self {
        Self {
            output_format,
            mask_initial_release: true,
            max_version: None,
            today,
        }
    }

    pub fn with_mask_initial_release(mut self, mask: bool) -> Self {
        self.mask_initial_release = mask;
        self
    }

    pub fn with_max_version(mut self, max_version: Option<Version>) -> Self {
        self.max_version = max_version;
        self
    }
}

/// Render the full changelog for a release history, newest release first
pub fn render_changelog(
    history: &ReleaseHistory,
    hvcs: &dyn HvcsClient,
    opts: &RenderOptions,
) -> String {
    let header = match opts.output_format {
        ChangelogOutputFormat::Markdown => {
            format!("# CHANGELOG\n\n{}", MD_CHANGELOG_INSERTION_FLAG)
        }
        ChangelogOutputFormat::RestructuredText => format!(
            ".. _changelog:\n\n=========\nCHANGELOG\n=========\n\n{}",
            RST_CHANGELOG_INSERTION_FLAG
        ),
    };

    let limited;
    let history = match &opts.max_version {
        Some(max) => {
            limited = history.limited_to(max);
            &limited
        }
        None => history,
    };

    let today = opts.today.format("%Y-%m-%d").to_string();

    let mut entries: Vec<String> = Vec::new();
    for (i, (version, changes)) in history.iter().enumerate() {
        // oldest entry renders first, prepend to get newest-first order
        let entry = if i == 0 && opts.mask_initial_release && version != UNRELEASED {
            match opts.output_format {
                ChangelogOutputFormat::Markdown => markdown::initial_version_entry(version, &today),
                ChangelogOutputFormat::RestructuredText => {
                    rst::initial_version_entry(version, &today)
                }
            }
        } else {
            match opts.output_format {
                ChangelogOutputFormat::Markdown => {
                    markdown::version_entry(version, changes, hvcs, &today)
                }
                ChangelogOutputFormat::RestructuredText => {
                    rst::version_entry(version, changes, hvcs, &today)
                }
            }
        };
        entries.insert(0, entry);
    }

    format!("{}\n\n{}", header, entries.join("\n\n"))
        .trim_end()
        .to_string()
        + "\n"
}

/// Render and write the changelog to a file
pub fn write_changelog(
    path: &Path,
    history: &ReleaseHistory,
    hvcs: &dyn HvcsClient,
    opts: &RenderOptions,
) -> Result<String, ChangelogError> {
    let content = render_changelog(history, hvcs, opts);
    debug!(path = %path.display(), bytes = content.len(), "writing changelog");
    fs::write(path, &content)
        .map_err(|e| ChangelogError::WriteFailed(format!("{}: {}", path.display(), e)))?;
    Ok(content)
}

/// Python-style capitalize: first char uppercased, the rest lowercased
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Python-style title case: every word's first letter uppercased, the rest
/// lowercased. Categories that are emoji codes (leading `:`) pass through
/// untouched.
pub(crate) fn section_title(category: &str) -> String {
    if category.starts_with(':') {
        return category.to_string();
    }
    let mut out = String::with_capacity(category.len());
    let mut at_word_start = true;
    for c in category.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Bold scope prefix for a bullet, empty when the commit has no scope
pub(crate) fn scope_prefix(scope: &str) -> String {
    if scope.is_empty() {
        String::new()
    } else {
        format!("**{}**: ", scope)
    }
}

/// Assemble one bullet with its trailing link block, moving the links to
/// continuation lines when the line would exceed `max_line_length`
pub(crate) fn wrap_bullet(
    subject_line: &str,
    mr_link: &str,
    sha_link: &str,
    max_line_length: usize,
) -> String {
    let mut desc = format!("{} {}", subject_line, mr_link)
        .trim_end()
        .to_string();
    if desc.chars().count() > max_line_length {
        desc = format!("{}\n  {}", subject_line, mr_link)
            .trim_end()
            .to_string();
    }

    if format!("{} {}", desc, sha_link).chars().count() > max_line_length {
        format!("{}\n  {}\n", desc, sha_link)
    } else {
        format!("{} {}\n", desc, sha_link)
    }
}
