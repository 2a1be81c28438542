//! Fixture constants

use chrono::{DateTime, TimeZone, Utc};

use gantry_git::MergeFavor;

/// Branch every fixture repository starts on
pub const DEFAULT_BRANCH_NAME: &str = "main";

/// Author recorded on every fixture commit
pub const COMMIT_AUTHOR_NAME: &str = "gantry testing";
pub const COMMIT_AUTHOR_EMAIL: &str = "not_a_real@email.com";

/// Remote coordinates baked into every fixture repository
pub const EXAMPLE_HVCS_DOMAIN: &str = "example.com";
pub const EXAMPLE_REPO_OWNER: &str = "acme";
pub const EXAMPLE_REPO_NAME: &str = "example-project";

/// The file change commits touch
pub const FILE_IN_REPO: &str = "file.txt";

/// Version stamp file maintained by release steps
pub const VERSION_FILE: &str = "VERSION";

/// Project configuration file
pub const CONFIG_FILE: &str = "gantry.toml";

/// Conflict resolution used by fixture merges unless a step says otherwise
pub const DEFAULT_MERGE_STRATEGY: MergeFavor = MergeFavor::Theirs;

/// Starting instant for fixture timestamps. Every scripted commit advances
/// from here by whole seconds so rebuilt histories are byte-identical.
pub fn fixture_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap_or_default()
}

/// Message of the commit a release step creates. The subject is the bare
/// version so no commit parser picks it up for the changelog.
pub fn release_commit_message(version: &str) -> String {
    format!("{}\n\nAutomatically generated by gantry", version)
}

/// HTTPS remote URL of the example project on the given domain
pub fn example_remote_url(domain: &str) -> String {
    format!(
        "https://{}/{}/{}.git",
        domain, EXAMPLE_REPO_OWNER, EXAMPLE_REPO_NAME
    )
}
