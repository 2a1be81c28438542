//! Tag operations

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use gantry_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Create an annotated tag on HEAD with a controlled tagger timestamp
    pub fn create_tag(&self, name: &str, message: &str, when: DateTime<Utc>) -> Result<TagInfo> {
        if self.find_tag(name)?.is_some() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;
        let tagger = self.signature_at(when)?;

        let oid = self
            .repo
            .tag(name, head.as_object(), &tagger, message, false)?;
        debug!(tag = name, oid = %oid, "created annotated tag");

        Ok(TagInfo::new(name, head.id().to_string())
            .with_message(message)
            .with_timestamp(when))
    }

    /// Find a tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                let mut info = TagInfo::new(name, target.id().to_string());

                if let Ok(tag) = reference.peel_to_tag() {
                    if let Some(msg) = tag.message() {
                        info = info.with_message(msg.trim_end());
                    }
                    if let Some(tagger) = tag.tagger() {
                        if let Some(ts) = Utc.timestamp_opt(tagger.when().seconds(), 0).single() {
                            info = info.with_timestamp(ts);
                        }
                    }
                }

                Ok(Some(info))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// All tag names in the repository
    pub fn tag_names(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        Ok(names.iter().flatten().map(|n| n.to_string()).collect())
    }
}
