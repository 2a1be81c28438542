//! Commit specifications and their conversion into changelog details

use chrono::{DateTime, Utc};

use gantry_changelog::{parser_for, CommitDetail, NULL_SHA};
use gantry_core::config::CommitConvention;

/// One scripted commit, with an equivalent message per supported commit
/// convention so the same fixture can be built for any parser.
#[derive(Debug, Clone)]
pub struct CommitSpec {
    pub conventional: String,
    pub emoji: String,
    pub scipy: String,
    /// Explicit commit timestamp, otherwise the builder clock assigns one
    pub timestamp: Option<DateTime<Utc>>,
    /// Overrides whatever the parser decides about changelog inclusion
    pub include_in_changelog: bool,
}

impl CommitSpec {
    pub fn new(
        conventional: impl Into<String>,
        emoji: impl Into<String>,
        scipy: impl Into<String>,
    ) -> Self {
        Self {
            conventional: conventional.into(),
            emoji: emoji.into(),
            scipy: scipy.into(),
            timestamp: None,
            include_in_changelog: true,
        }
    }

    pub fn at(mut self, when: DateTime<Utc>) -> Self {
        self.timestamp = Some(when);
        self
    }

    /// Keep the commit out of rendered changelogs
    pub fn hidden(mut self) -> Self {
        self.include_in_changelog = false;
        self
    }

    /// The message matching a commit convention
    pub fn message_for(&self, convention: CommitConvention) -> &str {
        match convention {
            CommitConvention::Conventional => &self.conventional,
            CommitConvention::Emoji => &self.emoji,
            CommitConvention::Scipy => &self.scipy,
        }
    }
}

/// Category used for messages no parser recognizes
fn fallback_category(convention: CommitConvention) -> &'static str {
    match convention {
        CommitConvention::Emoji => "Other",
        _ => "Unknown",
    }
}

/// Classify a raw commit message into a [`CommitDetail`] with a placeholder
/// sha. Unrecognized messages land in the convention's fallback category.
pub fn commit_detail_for_message(message: &str, convention: CommitConvention) -> CommitDetail {
    let parser = parser_for(convention);
    match parser.parse_message(message) {
        Some(parsed) => CommitDetail {
            message: message.to_string(),
            type_tag: parsed.type_tag,
            category: parsed.category,
            descriptions: parsed.descriptions,
            breaking_descriptions: parsed.breaking_descriptions,
            scope: parsed.scope,
            merge_request: parsed.merge_request,
            sha: NULL_SHA.to_string(),
            timestamp: None,
            include_in_changelog: true,
        },
        None => {
            let mut detail = CommitDetail::unknown(message, fallback_category(convention));
            detail.include_in_changelog = false;
            detail
        }
    }
}

/// Convert a [`CommitSpec`] for one convention. Its inclusion flag
/// wins over the parse result, so an unparseable message can still be forced
/// into the changelog's fallback section.
pub fn commit_detail_for_spec(spec: &CommitSpec, convention: CommitConvention) -> CommitDetail {
    let mut detail = commit_detail_for_message(spec.message_for(convention), convention);
    detail.timestamp = spec.timestamp;
    detail.include_in_changelog = spec.include_in_changelog;
    detail
}

/// Convert a whole sequence of specs
pub fn commit_details_for_specs(
    specs: &[CommitSpec],
    convention: CommitConvention,
) -> Vec<CommitDetail> {
    specs
        .iter()
        .map(|spec| commit_detail_for_spec(spec, convention))
        .collect()
}

/// Split a squash-merge commit back into per-commit details. Every piece
/// inherits the squash commit's sha and timestamp, and falls back to its
/// merge request reference. Pieces no parser recognizes are dropped.
pub fn separate_squashed_commit(
    squashed: &CommitDetail,
    convention: CommitConvention,
) -> Vec<CommitDetail> {
    let parser = parser_for(convention);

    parser
        .unsquash_message(&squashed.message)
        .into_iter()
        .filter_map(|message| {
            parser.parse_message(&message).map(|parsed| CommitDetail {
                message,
                type_tag: parsed.type_tag,
                category: parsed.category,
                descriptions: parsed.descriptions,
                breaking_descriptions: parsed.breaking_descriptions,
                scope: parsed.scope,
                merge_request: if parsed.merge_request.is_empty() {
                    squashed.merge_request.clone()
                } else {
                    parsed.merge_request
                },
                sha: squashed.sha.clone(),
                timestamp: squashed.timestamp,
                include_in_changelog: true,
            })
        })
        .collect()
}
