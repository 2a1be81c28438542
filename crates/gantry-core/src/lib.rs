//! Gantry Core - foundational types for the gantry verification kit
//!
//! This crate provides the error types, version handling, and configuration
//! enums shared by the gantry fixture and changelog crates.

pub mod config;
pub mod error;
pub mod version;

pub use config::{ChangelogOutputFormat, CommitConvention, HvcsKind};
pub use error::{ChangelogError, ConfigError, GantryError, GitError, HvcsError, Result};
pub use version::{TagFormat, Version};
