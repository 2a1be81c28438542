//! Gitmoji-style parser

use std::sync::LazyLock;

use regex::Regex;

use gantry_core::config::CommitConvention;

use super::{paragraphs, split_mr_suffix, split_squashed, CommitParser, ParsedMessage};

static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<emoji>:[a-z0-9_]+:)\s*(?:\((?P<scope>[^)]+)\)\s*)?(?P<desc>.+)$").unwrap()
});

const MAJOR_EMOJI: &[&str] = &[":boom:"];

const MINOR_EMOJI: &[&str] = &[
    ":sparkles:",
    ":children_crossing:",
    ":lipstick:",
    ":iphone:",
    ":egg:",
    ":chart_with_upwards_trend:",
];

const PATCH_EMOJI: &[&str] = &[
    ":ambulance:",
    ":lock:",
    ":bug:",
    ":zap:",
    ":goal_net:",
    ":alien:",
    ":wheelchair:",
    ":speech_balloon:",
    ":mag:",
    ":apple:",
    ":penguin:",
    ":checkered_flag:",
    ":robot:",
    ":green_apple:",
];

fn is_known(emoji: &str) -> bool {
    MAJOR_EMOJI.contains(&emoji) || MINOR_EMOJI.contains(&emoji) || PATCH_EMOJI.contains(&emoji)
}

/// Parser for `:emoji: description` subjects. The changelog category is the
/// emoji itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiParser;

impl CommitParser for EmojiParser {
    fn convention(&self) -> CommitConvention {
        CommitConvention::Emoji
    }

    fn parse_message(&self, message: &str) -> Option<ParsedMessage> {
        let (subject, body) = match message.split_once('\n') {
            Some((s, rest)) => (s.trim_end(), rest),
            None => (message.trim_end(), ""),
        };
        let (subject, merge_request) = split_mr_suffix(subject);

        let caps = SUBJECT_RE.captures(&subject)?;
        let emoji = caps.name("emoji").map(|m| m.as_str())?.to_string();
        if !is_known(&emoji) {
            return None;
        }
        let scope = caps
            .name("scope")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let desc = caps.name("desc").map(|m| m.as_str().trim())?.to_string();

        let body_paragraphs = paragraphs(body);
        let (descriptions, breaking_descriptions) = if MAJOR_EMOJI.contains(&emoji.as_str()) {
            let breaking = if body_paragraphs.is_empty() {
                vec![desc.clone()]
            } else {
                body_paragraphs
            };
            (vec![desc], breaking)
        } else {
            let mut descriptions = vec![desc];
            descriptions.extend(body_paragraphs);
            (descriptions, Vec::new())
        };

        Some(ParsedMessage {
            type_tag: emoji.clone(),
            category: emoji,
            descriptions,
            breaking_descriptions,
            scope,
            merge_request,
        })
    }

    fn unsquash_message(&self, message: &str) -> Vec<String> {
        split_squashed(message, |line| SUBJECT_RE.is_match(line))
    }
}
