//! Commit message parsers
//!
//! One parser per supported commit convention. Each parser classifies a
//! message into a changelog category and knows how to split a squash-merge
//! message back into the original commit messages.

mod conventional;
mod emoji;
mod scipy;

pub use conventional::ConventionalParser;
pub use emoji::EmojiParser;
pub use scipy::ScipyParser;

use std::sync::LazyLock;

use regex::Regex;

use gantry_core::config::CommitConvention;

/// Trailing merge request reference in a subject line, e.g. `(#42)` or
/// `(!42)`
static MR_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\((?P<mr>[#!]\d+)\)\s*$").unwrap());

/// The classification a parser extracted from one commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Convention tag (`feat`, `:bug:`, `ENH`, ...)
    pub type_tag: String,
    /// Changelog section title
    pub category: String,
    /// Description paragraphs, subject first
    pub descriptions: Vec<String>,
    /// Breaking-change paragraphs
    pub breaking_descriptions: Vec<String>,
    /// Scope, empty when absent
    pub scope: String,
    /// Merge request reference stripped from the subject, empty when absent
    pub merge_request: String,
}

/// A commit convention parser
pub trait CommitParser: Send + Sync {
    /// The convention this parser implements
    fn convention(&self) -> CommitConvention;

    /// Classify a full commit message. `None` when the subject does not
    /// follow the convention.
    fn parse_message(&self, message: &str) -> Option<ParsedMessage>;

    /// Split a squash-merge message into the messages of the squashed
    /// commits. Returns the whole message as a single element when no
    /// squashed pieces are recognized.
    fn unsquash_message(&self, message: &str) -> Vec<String>;
}

/// Parser for the given convention
pub fn parser_for(convention: CommitConvention) -> Box<dyn CommitParser> {
    match convention {
        CommitConvention::Conventional => Box::new(ConventionalParser),
        CommitConvention::Emoji => Box::new(EmojiParser),
        CommitConvention::Scipy => Box::new(ScipyParser),
    }
}

/// Strip a trailing `(#N)` / `(!N)` from a subject line, returning the bare
/// subject and the reference
pub(crate) fn split_mr_suffix(subject: &str) -> (String, String) {
    if let Some(caps) = MR_SUFFIX_RE.captures(subject) {
        let mr = caps.name("mr").map(|m| m.as_str()).unwrap_or_default();
        let bare = MR_SUFFIX_RE.replace(subject, "").into_owned();
        (bare, mr.to_string())
    } else {
        (subject.to_string(), String::new())
    }
}

/// Split a message body into paragraphs, trimming each and dropping empties
pub(crate) fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

static SQUASH_COMMIT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^commit [0-9a-f]{7,40}$").unwrap());

/// Split a squash-merge message into individual commit messages.
///
/// Both the GitHub style (`* subject` bullets with indented continuation)
/// and the plain git style (`commit <sha>` / `Author:` / `Date:` blocks
/// under "Squashed commit of the following:") are recognized. Lines are
/// attributed to the most recent piece whose stripped form matched
/// `is_subject`.
pub(crate) fn split_squashed(message: &str, is_subject: impl Fn(&str) -> bool) -> Vec<String> {
    let mut pieces: Vec<Vec<String>> = Vec::new();
    let mut collecting = false;

    for line in message.lines() {
        let trimmed = line.trim_end();
        if SQUASH_COMMIT_LINE_RE.is_match(trimmed.trim())
            || trimmed.trim_start().starts_with("Author: ")
            || trimmed.trim_start().starts_with("Date:")
            || trimmed.trim() == "Squashed commit of the following:"
        {
            collecting = false;
            continue;
        }

        let candidate = if let Some(stripped) = trimmed.strip_prefix("* ") {
            stripped
        } else if let Some(stripped) = trimmed.strip_prefix("    ") {
            stripped
        } else {
            trimmed
        };

        if is_subject(candidate.trim()) {
            pieces.push(vec![candidate.trim().to_string()]);
            collecting = true;
        } else if collecting {
            if let Some(last) = pieces.last_mut() {
                last.push(candidate.to_string());
            }
        }
    }

    let messages: Vec<String> = pieces
        .into_iter()
        .map(|lines| lines.join("\n").trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    if messages.is_empty() {
        vec![message.trim().to_string()]
    } else {
        messages
    }
}
