//! GitLab link builder

use gantry_core::config::HvcsKind;

use crate::{mr_number, HvcsClient, RemoteRef};

/// Link builder for GitLab domains
#[derive(Debug, Clone)]
pub struct Gitlab {
    remote: RemoteRef,
}

impl Gitlab {
    pub fn new(remote: RemoteRef) -> Self {
        Self { remote }
    }
}

impl HvcsClient for Gitlab {
    fn kind(&self) -> HvcsKind {
        HvcsKind::Gitlab
    }

    fn remote(&self) -> &RemoteRef {
        &self.remote
    }

    fn commit_hash_url(&self, sha: &str) -> String {
        format!("{}/-/commit/{}", self.repo_url(), sha)
    }

    fn merge_request_url(&self, mr: &str) -> String {
        format!("{}/-/merge_requests/{}", self.repo_url(), mr_number(mr))
    }

    fn compare_url(&self, from_ref: &str, to_ref: &str) -> String {
        format!("{}/-/compare/{}...{}", self.repo_url(), from_ref, to_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let c = Gitlab::new(
            RemoteRef::parse("https://example.com/acme/example-project.git").unwrap(),
        );
        assert_eq!(
            c.commit_hash_url("abcdef1234"),
            "https://example.com/acme/example-project/-/commit/abcdef1234"
        );
        assert_eq!(
            c.merge_request_url("!42"),
            "https://example.com/acme/example-project/-/merge_requests/42"
        );
    }
}
