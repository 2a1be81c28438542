//! Gantry HVCS - hosted version-control service link builders
//!
//! Clients here never touch the network; they only derive the commit,
//! merge-request, and compare URLs that gantry embeds in changelog text.

mod bitbucket;
mod gitea;
mod github;
mod gitlab;
mod remote;

pub use bitbucket::Bitbucket;
pub use gitea::Gitea;
pub use github::Github;
pub use gitlab::Gitlab;
pub use remote::RemoteRef;

use gantry_core::config::HvcsKind;
use gantry_core::error::HvcsError;
use tracing::debug;

/// A hosted version-control service client used to build links
pub trait HvcsClient: Send + Sync {
    /// Which service this client targets
    fn kind(&self) -> HvcsKind;

    /// Remote reference (domain, owner, repository name)
    fn remote(&self) -> &RemoteRef;

    /// Base URL of the service, e.g. `https://example.com`
    fn server_url(&self) -> String {
        format!("https://{}", self.remote().domain)
    }

    /// Base URL of the repository
    fn repo_url(&self) -> String {
        let remote = self.remote();
        format!("https://{}/{}/{}", remote.domain, remote.owner, remote.repo)
    }

    /// URL of a single commit
    fn commit_hash_url(&self, sha: &str) -> String;

    /// URL of a merge/pull request. Accepts `#42`, `!42`, or a bare number.
    fn merge_request_url(&self, mr: &str) -> String;

    /// URL comparing two tags or refs
    fn compare_url(&self, from_ref: &str, to_ref: &str) -> String;

    /// Whether changelog output should include compare links for this service
    fn supports_compare_url(&self) -> bool {
        true
    }
}

/// Strip `#`/`!` prefixes off a merge request reference
pub(crate) fn mr_number(mr: &str) -> &str {
    mr.trim_start_matches(['#', '!'])
}

/// Construct a client for the given service from a remote URL
pub fn hvcs_client(kind: HvcsKind, remote_url: &str) -> Result<Box<dyn HvcsClient>, HvcsError> {
    let remote = RemoteRef::parse(remote_url)?;
    debug!(%kind, owner = %remote.owner, repo = %remote.repo, "constructed hvcs client");

    Ok(match kind {
        HvcsKind::Github => Box::new(Github::new(remote)),
        HvcsKind::Gitlab => Box::new(Gitlab::new(remote)),
        HvcsKind::Gitea => Box::new(Gitea::new(remote)),
        HvcsKind::Bitbucket => Box::new(Bitbucket::new(remote)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTTPS_URL: &str = "https://example.com/acme/example-project.git";

    #[test]
    fn test_factory_dispatch() {
        for kind in HvcsKind::ALL {
            let client = hvcs_client(kind, HTTPS_URL).unwrap();
            assert_eq!(client.kind(), kind);
            assert_eq!(client.server_url(), "https://example.com");
        }
    }

    #[test]
    fn test_mr_number() {
        assert_eq!(mr_number("#42"), "42");
        assert_eq!(mr_number("!42"), "42");
        assert_eq!(mr_number("42"), "42");
    }
}
