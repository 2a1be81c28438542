//! Version and tag format handling

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// A semantic version as understood by gantry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(semver::Version);

impl Version {
    /// Parse a version string (no leading `v`)
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        Ok(Self(semver::Version::parse(s)?))
    }

    /// Access the underlying semver version
    pub fn inner(&self) -> &semver::Version {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A tag naming pattern, e.g. `v{version}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagFormat(String);

/// The default tag format used by gantry
pub const DEFAULT_TAG_FORMAT: &str = "v{version}";

impl TagFormat {
    /// Create a tag format from a pattern containing `{version}`
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The raw pattern string
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Render a tag name for a version string
    pub fn format(&self, version: &str) -> String {
        self.0.replace("{version}", version)
    }

    /// Extract the version string out of a tag name, if it matches the pattern
    pub fn parse(&self, tag: &str) -> Option<String> {
        let (prefix, suffix) = self.0.split_once("{version}")?;
        let rest = tag.strip_prefix(prefix)?;
        let version = rest.strip_suffix(suffix)?;
        if version.is_empty() {
            return None;
        }
        Some(version.to_string())
    }
}

impl Default for TagFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_ordering() {
        let a = Version::parse("1.2.3").unwrap();
        let b = Version::parse("1.10.0").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_version_parse_rejects_tag() {
        assert!(Version::parse("v1.0.0").is_err());
        assert!(Version::parse("Unreleased").is_err());
    }

    #[test]
    fn test_tag_format_roundtrip() {
        let fmt = TagFormat::default();
        assert_eq!(fmt.format("1.2.3"), "v1.2.3");
        assert_eq!(fmt.parse("v1.2.3"), Some("1.2.3".to_string()));
        assert_eq!(fmt.parse("1.2.3"), None);
    }

    #[test]
    fn test_custom_tag_format() {
        let fmt = TagFormat::new("release-{version}-final");
        assert_eq!(fmt.format("0.1.0"), "release-0.1.0-final");
        assert_eq!(fmt.parse("release-0.1.0-final"), Some("0.1.0".to_string()));
        assert_eq!(fmt.parse("release--final"), None);
    }
}
