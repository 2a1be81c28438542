//! Gantry Git - git operations for fixture repositories
//!
//! This crate provides a git2-backed repository wrapper whose write operations
//! (commits, tags, merges) all take caller-supplied timestamps, so scripted
//! histories come out byte-for-byte reproducible.

mod branches;
mod commits;
mod merge;
mod repository;
mod tags;
pub mod types;

pub use merge::MergeFavor;
pub use repository::{GitRepo, RepoIdentity, Result};
pub use types::{CommitInfo, TagInfo};
