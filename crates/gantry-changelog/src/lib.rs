//! Gantry Changelog - reference commit parsers and renderers
//!
//! This crate replicates, for verification purposes, the commit
//! classification and changelog/release-notes output of the gantry release
//! tool. Tests build expected output through these functions and compare the
//! tool's files against it byte-for-byte.

pub mod parser;
pub mod release_notes;
pub mod renderer;
pub mod types;

pub use parser::{parser_for, CommitParser, ParsedMessage};
pub use release_notes::{render_release_notes, ReleaseNotesOptions};
pub use renderer::{
    render_changelog, write_changelog, RenderOptions, MD_CHANGELOG_INSERTION_FLAG,
    RST_CHANGELOG_INSERTION_FLAG,
};
pub use types::{CommitDetail, ReleaseHistory, VersionChanges, NULL_SHA, UNRELEASED};
