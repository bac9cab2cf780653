//! Locating the consumer project.
//!
//! npm runs install hooks with the package's own directory as the working
//! directory and reports where `npm install` was invoked in `INIT_CWD`.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::consts::INIT_CWD_VAR;

/// `INIT_CWD`, if set and non-empty.
pub fn init_cwd() -> Option<PathBuf> {
  non_empty(env::var_os(INIT_CWD_VAR)).map(PathBuf::from)
}

/// Directory of the installed package: the parent of the directory holding
/// the running executable (`node_modules/<pkg>/bin/<exe>` → `node_modules/<pkg>`).
pub fn package_dir() -> io::Result<PathBuf> {
  let exe = env::current_exe()?;
  let bin_dir = exe
    .parent()
    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?;
  Ok(bin_dir.parent().unwrap_or(bin_dir).to_path_buf())
}

/// Resolve the consumer root from `INIT_CWD`, falling back to two levels above
/// `package_dir` (the project that owns `node_modules/<pkg>`).
pub fn resolve_consumer_root(init_cwd: Option<PathBuf>, package_dir: &Path) -> PathBuf {
  init_cwd.unwrap_or_else(|| package_dir.join("..").join(".."))
}

/// The consumer root for this process.
pub fn consumer_root() -> io::Result<PathBuf> {
  match init_cwd() {
    Some(dir) => Ok(dir),
    None => Ok(resolve_consumer_root(None, &package_dir()?)),
  }
}

/// The directory a command was invoked for: `INIT_CWD`, else the working directory.
pub fn invocation_dir() -> io::Result<PathBuf> {
  match init_cwd() {
    Some(dir) => Ok(dir),
    None => env::current_dir(),
  }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
  value.filter(|v| !v.is_empty())
}
