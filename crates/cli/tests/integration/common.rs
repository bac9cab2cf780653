//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated consumer project.
///
/// Each test gets its own temporary directory standing in for the project
/// that ran `npm install`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty consumer project.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create a consumer project with the given fixtures copied in as `(fixture, destination)`.
  pub fn with_fixtures(files: &[(&str, &str)]) -> Self {
    let env = Self::empty();
    for (fixture, dest) in files {
      env.write_file(dest, &fixture_content(fixture));
    }
    env
  }

  /// The consumer project root.
  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the consumer root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Read a file relative to the consumer root.
  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap()
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }

  /// Get a pre-configured Command for the nucleus-deploy binary.
  ///
  /// Sets `INIT_CWD` to the consumer root, the way npm does for install hooks,
  /// and runs from a separate working directory so tests catch any reliance
  /// on the current directory.
  pub fn nucleus_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("nucleus-deploy");
    cmd.env("INIT_CWD", self.root());
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(std::env::temp_dir());
    cmd
  }
}
