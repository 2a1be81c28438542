//! SciPy-style parser

use std::sync::LazyLock;

use regex::Regex;

use gantry_core::config::CommitConvention;

use super::{paragraphs, split_mr_suffix, split_squashed, CommitParser, ParsedMessage};

static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<tag>[A-Z]+)(?:\((?P<scope>[^)]+)\))?: (?P<desc>.+)$").unwrap()
});

const ALLOWED_TAGS: &[&str] = &[
    "API", "BENCH", "BLD", "BUG", "DEP", "DEV", "DOC", "ENH", "MAINT", "REV", "STY", "TST", "REL",
    "TYP",
];

const BREAKING_PREFIXES: &[&str] = &["BREAKING CHANGE: ", "BREAKING-CHANGE: "];

fn category_for(tag: &str) -> &'static str {
    match tag {
        "ENH" | "API" => "Feature",
        "BUG" | "MAINT" | "REV" => "Fix",
        "DOC" => "Documentation",
        "DEP" => "Deprecation",
        _ => "Unknown",
    }
}

/// Parser for `TAG(scope): description` subjects in the numpy/scipy style
#[derive(Debug, Clone, Copy, Default)]
pub struct ScipyParser;

impl CommitParser for ScipyParser {
    fn convention(&self) -> CommitConvention {
        CommitConvention::Scipy
    }

    fn parse_message(&self, message: &str) -> Option<ParsedMessage> {
        let (subject, body) = match message.split_once('\n') {
            Some((s, rest)) => (s.trim_end(), rest),
            None => (message.trim_end(), ""),
        };
        let (subject, merge_request) = split_mr_suffix(subject);

        let caps = SUBJECT_RE.captures(&subject)?;
        let tag = caps.name("tag").map(|m| m.as_str())?.to_string();
        if !ALLOWED_TAGS.contains(&tag.as_str()) {
            return None;
        }
        let scope = caps
            .name("scope")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let desc = caps.name("desc").map(|m| m.as_str().trim())?.to_string();

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
        // API tags change the public interface
        if tag == "API" && breaking_descriptions.is_empty() {
            breaking_descriptions.push(desc);
        }

        Some(ParsedMessage {
            category: category_for(&tag).to_string(),
            type_tag: tag,
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
    fn test_parse_enhancement() {
        let parsed = ScipyParser.parse_message("ENH: add sparse solver").unwrap();
        assert_eq!(parsed.type_tag, "ENH");
        assert_eq!(parsed.category, "Feature");
        assert_eq!(parsed.descriptions, vec!["add sparse solver"]);
    }

    #[test]
    fn test_parse_bug_fix_with_scope() {
        let parsed = ScipyParser
            .parse_message("BUG(interp): clamp out of range values (#88)")
            .unwrap();
        assert_eq!(parsed.category, "Fix");
        assert_eq!(parsed.scope, "interp");
        assert_eq!(parsed.merge_request, "#88");
    }

    #[test]
    fn test_parse_api_marks_breaking() {
        let parsed = ScipyParser
            .parse_message("API: rename public entry point")
            .unwrap();
        assert_eq!(parsed.category, "Feature");
        assert_eq!(
            parsed.breaking_descriptions,
            vec!["rename public entry point"]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        assert!(ScipyParser.parse_message("NOPE: whatever").is_none());
        assert!(ScipyParser.parse_message("lowercase: whatever").is_none());
    }

    #[test]
    fn test_parse_breaking_paragraph() {
        let msg = "ENH: new backend\n\nBREAKING CHANGE: old backend removed\n";
        let parsed = ScipyParser.parse_message(msg).unwrap();
        assert_eq!(parsed.breaking_descriptions, vec!["old backend removed"]);
    }
}
