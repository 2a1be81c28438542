//! Configuration enums shared across the gantry crates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Commit message conventions gantry can classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitConvention {
    /// Conventional Commits (`feat(scope)!: description`)
    Conventional,
    /// Gitmoji-prefixed messages (`:sparkles: description`)
    Emoji,
    /// Scipy-style tags (`ENH: description`)
    Scipy,
}

impl CommitConvention {
    /// All supported conventions, useful for parameterized fixtures
    pub const ALL: [CommitConvention; 3] = [Self::Conventional, Self::Emoji, Self::Scipy];

    /// Keyword used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conventional => "conventional",
            Self::Emoji => "emoji",
            Self::Scipy => "scipy",
        }
    }
}

impl fmt::Display for CommitConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitConvention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conventional" => Ok(Self::Conventional),
            "emoji" => Ok(Self::Emoji),
            "scipy" => Ok(Self::Scipy),
            other => Err(ConfigError::UnknownKeyword {
                kind: "commit convention",
                value: other.to_string(),
            }),
        }
    }
}

/// Output formats for rendered changelogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangelogOutputFormat {
    /// Markdown (`CHANGELOG.md`)
    Markdown,
    /// reStructuredText (`CHANGELOG.rst`)
    RestructuredText,
}

impl ChangelogOutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::RestructuredText => "rst",
        }
    }
}

impl FromStr for ChangelogOutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" | "markdown" => Ok(Self::Markdown),
            "rst" | "restructuredtext" => Ok(Self::RestructuredText),
            other => Err(ConfigError::UnknownKeyword {
                kind: "changelog output format",
                value: other.to_string(),
            }),
        }
    }
}

/// Hosted version-control services gantry can link against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HvcsKind {
    Github,
    Gitlab,
    Gitea,
    Bitbucket,
}

impl HvcsKind {
    /// All supported services, useful for parameterized fixtures
    pub const ALL: [HvcsKind; 4] = [Self::Github, Self::Gitlab, Self::Gitea, Self::Bitbucket];

    /// Keyword used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Gitea => "gitea",
            Self::Bitbucket => "bitbucket",
        }
    }
}

impl fmt::Display for HvcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvcsKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::Github),
            "gitlab" => Ok(Self::Gitlab),
            "gitea" => Ok(Self::Gitea),
            "bitbucket" => Ok(Self::Bitbucket),
            other => Err(ConfigError::UnknownKeyword {
                kind: "hvcs client",
                value: other.to_string(),
            }),
        }
    }
}
