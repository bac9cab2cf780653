//! Typed view of a consumer's `nucleus.yaml`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse {}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },
}

/// Project configuration consumed by deploy routines.
///
/// Keys the deploy routine does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NucleusConfig {
  pub project_name: String,
  pub environments: Vec<Environment>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A named deployment target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
  pub name: String,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl NucleusConfig {
  /// Load the config at `path`. An empty file yields the default config.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    if value.is_null() {
      return Ok(Self::default());
    }
    serde_yaml::from_value(value)
  }

  /// Project name for display, `(unset)` when blank.
  pub fn project_label(&self) -> &str {
    if self.project_name.is_empty() {
      "(unset)"
    } else {
      &self.project_name
    }
  }

  /// Comma-separated environment names for display, `(none)` when there are none.
  pub fn environments_label(&self) -> String {
    let names = self
      .environments
      .iter()
      .map(|e| e.name.as_str())
      .collect::<Vec<_>>()
      .join(", ");
    if names.is_empty() { "(none)".to_string() } else { names }
  }
}
