//! Add the recommended `nucleus:*` scripts to a consumer's `package.json`.
//!
//! Only names that are missing get added. An existing script is never
//! overwritten, even when its command differs from the recommended one.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::MANIFEST_FILENAME;
use crate::document::{Document, Mapping};
use crate::store::{self, Format, StoreError};
use crate::summary::RunSummary;

/// Scripts offered to every consumer, in the order they are added.
pub const RECOMMENDED_SCRIPTS: &[(&str, &str)] = &[
  ("nucleus:help", "nucleus-deploy help"),
  ("nucleus:hello", "nucleus-deploy hello"),
  ("nucleus:deploy", "nucleus-deploy deploy"),
];

#[derive(Debug, Error)]
pub enum InjectError {
  #[error(transparent)]
  Store(#[from] StoreError),
}

/// What script injection did to the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
  /// There is no manifest at the consumer root.
  ManifestMissing { path: PathBuf },
  /// The manifest exists but is not valid JSON; it was left untouched.
  Corrupt { path: PathBuf },
  /// The manifest or its `scripts` value has a shape scripts cannot be added to.
  Unsupported { path: PathBuf, reason: String },
  /// These scripts were added and the manifest rewritten.
  Added { path: PathBuf, names: Vec<String> },
  /// Every recommended script name was already present.
  AllPresent { path: PathBuf },
}

impl InjectOutcome {
  pub fn summary(&self) -> RunSummary {
    match self {
      InjectOutcome::ManifestMissing { path } => RunSummary::note(format!(
        "No {MANIFEST_FILENAME} found at {}. Skipped adding scripts.",
        path.display()
      )),
      InjectOutcome::Corrupt { path } => RunSummary::note(format!(
        "Could not parse {MANIFEST_FILENAME} at {}; left it untouched. Add the nucleus scripts manually.",
        path.display()
      )),
      InjectOutcome::Unsupported { path, reason } => RunSummary::note(format!(
        "Skipped adding scripts to {}: {reason}.",
        path.display()
      )),
      InjectOutcome::Added { names, .. } => {
        RunSummary::action(format!("Added {MANIFEST_FILENAME} scripts: {}", names.join(", ")))
      }
      InjectOutcome::AllPresent { .. } => {
        RunSummary::action(format!("All recommended {MANIFEST_FILENAME} scripts already present"))
      }
    }
  }
}

/// Add every script from `recommended` whose name is missing from
/// `<consumer_root>/package.json`.
///
/// A missing, unparseable, or oddly shaped manifest is reported through the
/// outcome and never written.
///
/// # Errors
///
/// Returns an error only for I/O failures reading or writing the manifest.
pub fn inject_scripts(consumer_root: &Path, recommended: &[(&str, &str)]) -> Result<InjectOutcome, InjectError> {
  let path = consumer_root.join(MANIFEST_FILENAME);

  if !store::exists(&path) {
    debug!(path = %path.display(), "no manifest, skipping script injection");
    return Ok(InjectOutcome::ManifestMissing { path });
  }

  let mut manifest = match store::read(&path, Format::Json) {
    Ok(doc) => doc,
    Err(StoreError::Parse { source, .. }) => {
      warn!(
        path = %path.display(),
        error = %source,
        "manifest could not be parsed, leaving it untouched"
      );
      return Ok(InjectOutcome::Corrupt { path });
    }
    Err(e) => return Err(e.into()),
  };

  let kind = manifest.kind();
  let Some(root) = manifest.as_mapping_mut() else {
    let reason = format!("top level is a {kind}, not an object");
    return Ok(InjectOutcome::Unsupported { path, reason });
  };

  let mut scripts = match root.get("scripts") {
    None | Some(Document::Null) => Mapping::new(),
    Some(Document::Mapping(existing)) => existing.clone(),
    Some(other) => {
      let reason = format!("\"scripts\" is a {}, not an object", other.kind());
      return Ok(InjectOutcome::Unsupported { path, reason });
    }
  };

  let mut names = Vec::new();
  for (name, command) in recommended {
    if scripts.contains_key(name) {
      debug!(script = %name, "script already present");
      continue;
    }
    scripts.insert(*name, Document::from(*command));
    names.push(name.to_string());
  }

  if names.is_empty() {
    return Ok(InjectOutcome::AllPresent { path });
  }

  root.insert("scripts", Document::Mapping(scripts));
  store::write(&path, &manifest, Format::Json)?;
  info!(path = %path.display(), scripts = %names.join(", "), "added scripts to manifest");

  Ok(InjectOutcome::Added { path, names })
}
