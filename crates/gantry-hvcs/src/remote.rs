//! Remote URL parsing

use serde::{Deserialize, Serialize};
use url::Url;

use gantry_core::error::HvcsError;

/// The pieces of a git remote URL a link builder needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    /// Server domain, e.g. `example.com`
    pub domain: String,
    /// Repository owner or namespace
    pub owner: String,
    /// Repository name, `.git` suffix stripped
    pub repo: String,
}

impl RemoteRef {
    /// Parse an HTTPS (`https://host/owner/repo.git`) or SSH
    /// (`git@host:owner/repo.git`) remote URL
    pub fn parse(remote_url: &str) -> Result<Self, HvcsError> {
        if let Some(rest) = remote_url.strip_prefix("git@") {
            return Self::parse_ssh(remote_url, rest);
        }

        let url = Url::parse(remote_url)
            .map_err(|_| HvcsError::InvalidRemoteUrl(remote_url.to_string()))?;
        let domain = url
            .host_str()
            .ok_or_else(|| HvcsError::InvalidRemoteUrl(remote_url.to_string()))?
            .to_string();

        let mut segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        if segments.len() < 2 {
            return Err(HvcsError::InvalidRemoteUrl(remote_url.to_string()));
        }

        let repo = segments
            .pop()
            .unwrap_or_default()
            .trim_end_matches(".git")
            .to_string();
        let owner = segments.join("/");

        Ok(Self {
            domain,
            owner,
            repo,
        })
    }

    fn parse_ssh(original: &str, rest: &str) -> Result<Self, HvcsError> {
        let (domain, path) = rest
            .split_once(':')
            .ok_or_else(|| HvcsError::InvalidRemoteUrl(original.to_string()))?;
        let (owner, repo) = path
            .rsplit_once('/')
            .ok_or_else(|| HvcsError::InvalidRemoteUrl(original.to_string()))?;

        if domain.is_empty() || owner.is_empty() || repo.is_empty() {
            return Err(HvcsError::InvalidRemoteUrl(original.to_string()));
        }

        Ok(Self {
            domain: domain.to_string(),
            owner: owner.to_string(),
            repo: repo.trim_end_matches(".git").to_string(),
        })
    }

    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https() {
        let remote = RemoteRef::parse("https://example.com/acme/example-project.git").unwrap();
        assert_eq!(remote.domain, "example.com");
        assert_eq!(remote.owner, "acme");
        assert_eq!(remote.repo, "example-project");
    }

    #[test]
    fn test_parse_ssh() {
        let remote = RemoteRef::parse("git@example.com:acme/example-project.git").unwrap();
        assert_eq!(remote.domain, "example.com");
        assert_eq!(remote.slug(), "acme/example-project");
    }

    #[test]
    fn test_parse_nested_namespace() {
        let remote = RemoteRef::parse("https://example.com/group/subgroup/project.git").unwrap();
        assert_eq!(remote.owner, "group/subgroup");
        assert_eq!(remote.repo, "project");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RemoteRef::parse("not a url").is_err());
        assert!(RemoteRef::parse("https://example.com/").is_err());
    }
}
