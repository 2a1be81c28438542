//! Merge and squash commit message formats
//!
//! Each hosting service writes its own message when a merge request lands.
//! Fixtures use these to script histories that look like they came from a
//! real service.

use gantry_changelog::CommitDetail;

use crate::consts::{
    COMMIT_AUTHOR_EMAIL, COMMIT_AUTHOR_NAME, EXAMPLE_REPO_NAME, EXAMPLE_REPO_OWNER,
};

/// Plain `git merge` message
pub fn merge_message_git(branch: &str, target_branch: &str) -> String {
    format!("Merge branch '{}' into '{}'", branch, target_branch)
}

/// GitHub merge-button message
pub fn merge_message_github(pr_number: u32, branch: &str) -> String {
    format!("Merge pull request #{} from '{}'", pr_number, branch)
}

/// GitLab merge message, including the closed-issue statement and the
/// merge request reference trailer
pub fn merge_message_gitlab(
    mr_title: &str,
    mr_number: u32,
    source_branch: &str,
    target_branch: &str,
    closed_issues: &[String],
) -> String {
    let issue_statement = match closed_issues {
        [] => String::new(),
        [single] => format!("Closes {}", single),
        [head @ .., last] => format!("Closes {} and {}", head.join(", "), last),
    };

    let reference = format!("{}/{}!{}", EXAMPLE_REPO_OWNER, EXAMPLE_REPO_NAME, mr_number);

    [
        format!("Merge branch '{}' into '{}'", source_branch, target_branch),
        mr_title.to_string(),
        issue_statement,
        format!("See merge request {}", reference),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}

/// Plain `git merge --squash` message listing the squashed commits
pub fn squash_message_git(squashed_commits: &[CommitDetail]) -> String {
    let mut parts = vec!["Squashed commit of the following:".to_string()];
    for commit in squashed_commits {
        let mut block = vec![
            format!("commit {}", commit.sha),
            format!("Author: {} <{}>", COMMIT_AUTHOR_NAME, COMMIT_AUTHOR_EMAIL),
            // git prints the author date here; the exact value never matters
            // to parsers so a placeholder keeps fixtures reproducible
            "Date:   Day Mon DD HH:MM:SS YYYY +HHMM".to_string(),
            String::new(),
        ];
        block.extend(commit.message.split('\n').map(|line| format!("    {}", line)));
        parts.push(block.join("\n"));
    }
    parts.join("\n\n") + "\n"
}

/// GitHub squash-merge message: PR title plus bulleted commit subjects
pub fn squash_message_github(pr_title: &str, pr_number: u32, squashed_messages: &[String]) -> String {
    let mut parts = vec![format!("{} (#{})", pr_title, pr_number)];
    parts.extend(squashed_messages.iter().map(|msg| format!("* {}", msg)));
    parts.join("\n\n") + "\n"
}

/// Bitbucket squash-merge message
pub fn squash_message_bitbucket(
    branch_name: &str,
    pr_title: &str,
    pr_number: u32,
    squashed_messages: &[String],
) -> String {
    let mut parts = vec![
        format!("Merged in {}  (pull request #{})", branch_name, pr_number),
        pr_title.to_string(),
    ];
    parts.extend(squashed_messages.iter().map(|msg| format!("* {}", msg)));
    parts.join("\n\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_message_git() {
        assert_eq!(
            merge_message_git("feat/thing", "main"),
            "Merge branch 'feat/thing' into 'main'"
        );
    }

    #[test]
    fn test_merge_message_gitlab_with_issues() {
        let msg = merge_message_gitlab(
            "feat: add thing",
            3,
            "feat/thing",
            "main",
            &["#12".to_string(), "#13".to_string()],
        );
        assert_eq!(
            msg,
            "Merge branch 'feat/thing' into 'main'\n\n\
             feat: add thing\n\n\
             Closes #12 and #13\n\n\
             See merge request acme/example-project!3"
        );
    }

    #[test]
    fn test_merge_message_gitlab_no_issues() {
        let msg = merge_message_gitlab("feat: add thing", 3, "feat/thing", "main", &[]);
        assert!(!msg.contains("Closes"));
        assert!(msg.ends_with("See merge request acme/example-project!3"));
    }

    #[test]
    fn test_squash_message_github() {
        let msg = squash_message_github(
            "feat: combined",
            8,
            &["feat: one".to_string(), "fix: two".to_string()],
        );
        assert_eq!(msg, "feat: combined (#8)\n\n* feat: one\n\n* fix: two\n");
    }

    #[test]
    fn test_squash_message_git_indents_messages() {
        let mut commit = CommitDetail::unknown("feat: one\n\nbody line", "Features");
        commit.sha = "1234567890abcdef1234567890abcdef12345678".to_string();
        let msg = squash_message_git(std::slice::from_ref(&commit));
        assert!(msg.starts_with("Squashed commit of the following:\n\n"));
        assert!(msg.contains("commit 1234567890abcdef1234567890abcdef12345678\n"));
        assert!(msg.contains("    feat: one\n    \n    body line"));
        assert!(msg.ends_with("\n"));
    }
}
