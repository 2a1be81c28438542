//! Gitea link builder

use gantry_core::config::HvcsKind;

use crate::{mr_number, HvcsClient, RemoteRef};

/// Link builder for Gitea domains
#[derive(Debug, Clone)]
pub struct Gitea {
    remote: RemoteRef,
}

impl Gitea {
    pub fn new(remote: RemoteRef) -> Self {
        Self { remote }
    }
}

impl HvcsClient for Gitea {
    fn kind(&self) -> HvcsKind {
        HvcsKind::Gitea
    }

    fn remote(&self) -> &RemoteRef {
        &self.remote
    }

    fn commit_hash_url(&self, sha: &str) -> String {
        format!("{}/commit/{}", self.repo_url(), sha)
    }

    fn merge_request_url(&self, mr: &str) -> String {
        format!("{}/pulls/{}", self.repo_url(), mr_number(mr))
    }

    fn compare_url(&self, from_ref: &str, to_ref: &str) -> String {
        format!("{}/compare/{}...{}", self.repo_url(), from_ref, to_ref)
    }

    // Gitea release notes omit the detailed-changes footer
    fn supports_compare_url(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let c =
            Gitea::new(RemoteRef::parse("https://example.com/acme/example-project.git").unwrap());
        assert_eq!(
            c.merge_request_url("#7"),
            "https://example.com/acme/example-project/pulls/7"
        );
        assert!(!c.supports_compare_url());
    }
}
