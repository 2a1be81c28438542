//! Conventional Commits parser

use std::sync::LazyLock;

use regex::Regex;

use gantry_core::config::CommitConvention;

use super::{paragraphs, split_mr_suffix, split_squashed, CommitParser, ParsedMessage};

static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<desc>.+)$")
        .unwrap()
});

const ALLOWED_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "style", "refactor", "test",
];

const BREAKING_PREFIXES: &[&str] = &["BREAKING CHANGE: ", "BREAKING-CHANGE: "];

fn category_for(type_tag: &str) -> &'static str {
    match type_tag {
        "feat" => "Features",
        "fix" => "Bug Fixes",
        "perf" => "Performance Improvements",
        "docs" => "Documentation",
        _ => "Unknown",
    }
}

/// Parser for `type(scope)!: description` subjects
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl CommitParser for ConventionalParser {
    fn convention(&self) -> CommitConvention {
        CommitConvention::Conventional
    }

    fn parse_message(&self, message: &str) -> Option<ParsedMessage> {
        let (subject, body) = match message.split_once('\n') {
            Some((s, rest)) => (s.trim_end(), rest),
            None => (message.trim_end(), ""),
        };
        let (subject, merge_request) = split_mr_suffix(subject);

        let caps = SUBJECT_RE.captures(&subject)?;
        let type_tag = caps.name("type").map(|m| m.as_str())?.to_lowercase();
        if !ALLOWED_TYPES.contains(&type_tag.as_str()) {
            return None;
        }
        let scope = caps
            .name("scope")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let desc = caps.name("desc").map(|m| m.as_str().trim())?.to_string();
        let bang = caps.name("breaking").is_some();

        let mut descriptions = vec![desc.clone()];
        let mut breaking_descriptions = Vec::new();
        for paragraph in paragraphs(body) {
            if let Some(brk) = BREAKING_PREFIXES
                .iter()
                .find_map(|p| paragraph.strip_prefix(p))
            {
                breaking_descriptions.push(brk.to_string());
            } else {
                descriptions.push(paragraph);
            }
        }
        if bang && breaking_descriptions.is_empty() {
            breaking_descriptions.push(desc);
        }

        Some(ParsedMessage {
            category: category_for(&type_tag).to_string(),
            type_tag,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_feat() {
        let parsed = ConventionalParser
            .parse_message("feat: add changelog output")
            .unwrap();
        assert_eq!(parsed.type_tag, "feat");
        assert_eq!(parsed.category, "Features");
        assert_eq!(parsed.descriptions, vec!["add changelog output"]);
        assert!(parsed.breaking_descriptions.is_empty());
        assert_eq!(parsed.scope, "");
    }

    #[test]
    fn test_parse_scope_and_mr() {
        let parsed = ConventionalParser
            .parse_message("fix(cli): handle empty config (#123)")
            .unwrap();
        assert_eq!(parsed.category, "Bug Fixes");
        assert_eq!(parsed.scope, "cli");
        assert_eq!(parsed.merge_request, "#123");
        assert_eq!(parsed.descriptions, vec!["handle empty config"]);
    }

    #[test]
    fn test_parse_breaking_paragraph() {
        let msg = "feat: change config layout\n\nBREAKING CHANGE: keys moved under tool.gantry\n";
        let parsed = ConventionalParser.parse_message(msg).unwrap();
        assert_eq!(
            parsed.breaking_descriptions,
            vec!["keys moved under tool.gantry"]
        );
        assert_eq!(parsed.descriptions, vec!["change config layout"]);
    }

    #[test]
    fn test_parse_bang_marker() {
        let parsed = ConventionalParser
            .parse_message("feat!: drop legacy format")
            .unwrap();
        assert_eq!(parsed.breaking_descriptions, vec!["drop legacy format"]);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert!(ConventionalParser.parse_message("wat: nope").is_none());
        assert!(ConventionalParser.parse_message("plain message").is_none());
    }

    #[test]
    fn test_parse_body_paragraphs() {
        let msg = "fix: repair wrapping\n\nlong explanation here\n\nmore detail\n";
        let parsed = ConventionalParser.parse_message(msg).unwrap();
        assert_eq!(
            parsed.descriptions,
            vec!["repair wrapping", "long explanation here", "more detail"]
        );
    }

    #[test]
    fn test_unsquash() {
        let msg = "feat: combined work (#9)\n\n\
                   * feat: first piece\n\n\
                   * fix: second piece\n";
        let parts = ConventionalParser.unsquash_message(msg);
        assert_eq!(
            parts,
            vec![
                "feat: combined work (#9)",
                "feat: first piece",
                "fix: second piece"
            ]
        );
    }
}
