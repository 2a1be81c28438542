//! Example project scaffolding
//!
//! Fixture repositories hold a small project with a `gantry.toml`
//! configuration, a `VERSION` stamp file, and a work file that change
//! commits append to.

use std::fs;
use std::path::{Path, PathBuf};

use toml_edit::{DocumentMut, Item, Table};
use tracing::debug;

use gantry_core::error::{ConfigError, GantryError, Result};

use crate::consts::{CONFIG_FILE, FILE_IN_REPO, VERSION_FILE};

const INITIAL_VERSION: &str = "0.0.0";

const GITIGNORE_CONTENT: &str = "target/\n*.log\n";

const INITIAL_CONFIG: &str = r#"[tool.gantry]
version = "0.0.0"
commit_parser = "conventional"
tag_format = "v{version}"

[tool.gantry.changelog]
mask_initial_release = true

[tool.gantry.hvcs]
kind = "github"
domain = "example.com"
"#;

/// A scaffolded example project rooted in a fixture repository
#[derive(Debug, Clone)]
pub struct ExampleProject {
    root: PathBuf,
}

impl ExampleProject {
    /// Write the initial project files under `root`
    pub fn scaffold(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        fs::write(root.join(CONFIG_FILE), INITIAL_CONFIG)?;
        fs::write(root.join(VERSION_FILE), format!("{}\n", INITIAL_VERSION))?;
        fs::write(root.join(FILE_IN_REPO), "")?;
        fs::write(root.join(".gitignore"), GITIGNORE_CONTENT)?;
        debug!(root = %root.display(), "scaffolded example project");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Open an already scaffolded project
    pub fn open(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path).into());
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Set a dotted-path key in `gantry.toml`, creating intermediate tables
    pub fn set_config_value(&self, key: &str, value: &toml::Value) -> Result<()> {
        let content = fs::read_to_string(self.config_path())?;
        let mut doc: DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
            GantryError::from(ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            })
        })?;

        let mut parts = key.split('.').collect::<Vec<_>>();
        let leaf = parts.pop().ok_or_else(|| {
            GantryError::from(ConfigError::InvalidValue {
                field: key.to_string(),
                message: "empty key".to_string(),
            })
        })?;

        let mut node = doc.as_table_mut();
        for part in parts {
            node = node
                .entry(part)
                .or_insert(Item::Table(Table::new()))
                .as_table_mut()
                .ok_or_else(|| {
                    GantryError::from(ConfigError::InvalidValue {
                        field: key.to_string(),
                        message: format!("'{}' is not a table", part),
                    })
                })?;
        }
        node[leaf] = Item::Value(to_edit_value(value));

        fs::write(self.config_path(), doc.to_string())?;
        Ok(())
    }

    /// Read a dotted-path key out of `gantry.toml`
    pub fn config_value(&self, key: &str) -> Result<Option<toml::Value>> {
        let content = fs::read_to_string(self.config_path())?;
        let parsed: toml::Value = content.parse().map_err(ConfigError::TomlError)?;

        let mut node = &parsed;
        for part in key.split('.') {
            match node.get(part) {
                Some(next) => node = next,
                None => return Ok(None),
            }
        }
        Ok(Some(node.clone()))
    }

    /// Stamp a version into the `VERSION` file and the configuration
    pub fn stamp_version(&self, version: &str) -> Result<()> {
        fs::write(self.root.join(VERSION_FILE), format!("{}\n", version))?;
        self.set_config_value("tool.gantry.version", &toml::Value::from(version))?;
        debug!(version, "stamped project version");
        Ok(())
    }

    /// Current content of the `VERSION` file, trimmed
    pub fn version(&self) -> Result<String> {
        Ok(fs::read_to_string(self.root.join(VERSION_FILE))?
            .trim()
            .to_string())
    }

    /// Append one line to the work file so the next commit has a change
    pub fn change_work_file(&self) -> Result<()> {
        let path = self.root.join(FILE_IN_REPO);
        let mut content = fs::read_to_string(&path).unwrap_or_default();
        content.push_str("more text\n");
        fs::write(&path, content)?;
        Ok(())
    }
}

fn to_edit_value(value: &toml::Value) -> toml_edit::Value {
    match value {
        toml::Value::String(s) => toml_edit::Value::from(s.as_str()),
        toml::Value::Integer(i) => toml_edit::Value::from(*i),
        toml::Value::Float(f) => toml_edit::Value::from(*f),
        toml::Value::Boolean(b) => toml_edit::Value::from(*b),
        other => toml_edit::Value::from(other.to_string()),
    }
}
