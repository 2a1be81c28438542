//! Bitbucket link builder

use gantry_core::config::HvcsKind;

use crate::{mr_number, HvcsClient, RemoteRef};

/// Link builder for Bitbucket domains
#[derive(Debug, Clone)]
pub struct Bitbucket {
    remote: RemoteRef,
}

impl Bitbucket {
    pub fn new(remote: RemoteRef) -> Self {
        Self { remote }
    }
}

impl HvcsClient for Bitbucket {
    fn kind(&self) -> HvcsKind {
        HvcsKind::Bitbucket
    }

    fn remote(&self) -> &RemoteRef {
        &self.remote
    }

    fn commit_hash_url(&self, sha: &str) -> String {
        format!("{}/commits/{}", self.repo_url(), sha)
    }

    fn merge_request_url(&self, mr: &str) -> String {
        format!("{}/pull-requests/{}", self.repo_url(), mr_number(mr))
    }

    // Bitbucket's compare view takes "dest%0Dsource"
    fn compare_url(&self, from_ref: &str, to_ref: &str) -> String {
        format!(
            "{}/branches/compare/{}%0D{}",
            self.repo_url(),
            to_ref,
            from_ref
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let c = Bitbucket::new(
            RemoteRef::parse("https://example.com/acme/example-project.git").unwrap(),
        );
        assert_eq!(
            c.commit_hash_url("abcdef1234"),
            "https://example.com/acme/example-project/commits/abcdef1234"
        );
        assert_eq!(
            c.compare_url("v1.0.0", "v1.1.0"),
            "https://example.com/acme/example-project/branches/compare/v1.1.0%0Dv1.0.0"
        );
    }
}
