//! GitHub link builder

use gantry_core::config::HvcsKind;

use crate::{mr_number, HvcsClient, RemoteRef};

/// Link builder for GitHub and GitHub Enterprise domains
#[derive(Debug, Clone)]
pub struct Github {
    remote: RemoteRef,
}

impl Github {
    pub fn new(remote: RemoteRef) -> Self {
        Self { remote }
    }
}

impl HvcsClient for Github {
    fn kind(&self) -> HvcsKind {
        HvcsKind::Github
    }

    fn remote(&self) -> &RemoteRef {
        &self.remote
    }

    fn commit_hash_url(&self, sha: &str) -> String {
        format!("{}/commit/{}", self.repo_url(), sha)
    }

    fn merge_request_url(&self, mr: &str) -> String {
        format!("{}/pull/{}", self.repo_url(), mr_number(mr))
    }

    fn compare_url(&self, from_ref: &str, to_ref: &str) -> String {
        format!("{}/compare/{}...{}", self.repo_url(), from_ref, to_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Github {
        Github::new(RemoteRef::parse("https://example.com/acme/example-project.git").unwrap())
    }

    #[test]
    fn test_urls() {
        let c = client();
        assert_eq!(
            c.commit_hash_url("abcdef1234"),
            "https://example.com/acme/example-project/commit/abcdef1234"
        );
        assert_eq!(
            c.merge_request_url("#42"),
            "https://example.com/acme/example-project/pull/42"
        );
        assert_eq!(
            c.compare_url("v1.0.0", "v1.1.0"),
            "https://example.com/acme/example-project/compare/v1.0.0...v1.1.0"
        );
    }
}
