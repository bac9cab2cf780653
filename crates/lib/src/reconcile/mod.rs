//! Reconcile a consumer's `nucleus.yaml` with the shipped template.
//!
//! The existing file is deep-filled with template defaults and only rewritten
//! when the merge actually changed something. A file that cannot be parsed is
//! copied aside to `nucleus.yaml.bak` before a fresh template replaces it.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{BACKUP_SUFFIX, CONFIG_FILENAME};
use crate::document::Document;
use crate::merge::merge;
use crate::store::{self, CodecError, Format, StoreError};
use crate::summary::RunSummary;

pub use templates::NUCLEUS_YAML_TEMPLATE;

/// Errors that can occur during reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
  /// The template itself is broken; the tool's own installation is damaged.
  #[error("template {origin} is not valid YAML")]
  TemplateInvalid {
    origin: String,
    #[source]
    source: CodecError,
  },

  #[error("failed to read template {}", path.display())]
  TemplateRead { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Where the template document comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Template {
  /// The template compiled into the binary.
  #[default]
  Embedded,
  /// A template file on disk, always parsed as YAML.
  File(PathBuf),
}

impl Template {
  /// Load and parse the template.
  ///
  /// # Errors
  ///
  /// `TemplateRead` if the file cannot be read, `TemplateInvalid` if it does not parse.
  pub fn load(&self) -> Result<Document, ReconcileError> {
    let (origin, text) = match self {
      Template::Embedded => ("<embedded>".to_string(), NUCLEUS_YAML_TEMPLATE.to_string()),
      Template::File(path) => {
        let text = fs::read_to_string(path).map_err(|source| ReconcileError::TemplateRead {
          path: path.clone(),
          source,
        })?;
        (path.display().to_string(), text)
      }
    };

    store::parse(&text, Format::Yaml).map_err(|source| ReconcileError::TemplateInvalid { origin, source })
  }
}

/// What reconciliation did to the consumer config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
  /// No config existed; the template was written.
  Created { path: PathBuf },
  /// The config already contained every template default.
  UpToDate { path: PathBuf },
  /// Missing defaults were merged in and the config rewritten.
  Updated { path: PathBuf },
  /// The config could not be parsed; it was backed up and replaced by the template.
  Quarantined { path: PathBuf, backup: PathBuf },
}

impl ReconcileOutcome {
  pub fn path(&self) -> &Path {
    match self {
      ReconcileOutcome::Created { path }
      | ReconcileOutcome::UpToDate { path }
      | ReconcileOutcome::Updated { path }
      | ReconcileOutcome::Quarantined { path, .. } => path,
    }
  }

  pub fn summary(&self) -> RunSummary {
    match self {
      ReconcileOutcome::Created { .. } => RunSummary::action(format!("Created {CONFIG_FILENAME}")),
      ReconcileOutcome::UpToDate { .. } => RunSummary::action(format!("{CONFIG_FILENAME} already up to date")),
      ReconcileOutcome::Updated { .. } => {
        RunSummary::action(format!("Updated {CONFIG_FILENAME} with missing defaults"))
      }
      ReconcileOutcome::Quarantined { .. } => RunSummary::action(format!(
        "Backed up invalid {CONFIG_FILENAME} to {CONFIG_FILENAME}{BACKUP_SUFFIX} and wrote a fresh template"
      ))
      .with_note(format!(
        "Your previous {CONFIG_FILENAME} could not be parsed. Please manually merge from {CONFIG_FILENAME}{BACKUP_SUFFIX}."
      )),
    }
  }
}

/// Bring `<consumer_root>/nucleus.yaml` in line with the template.
///
/// - Missing config: the template is written as-is.
/// - Valid config: template defaults are merged in; the file is only written
///   when the merged serialization differs from the loaded one.
/// - Unparseable config: the original bytes are copied to `nucleus.yaml.bak`
///   first, then the template is written over the original.
///
/// # Errors
///
/// Template failures are returned before the consumer's file is touched.
/// I/O failures on the consumer's files are returned as `Store`.
pub fn reconcile(consumer_root: &Path, template: &Template) -> Result<ReconcileOutcome, ReconcileError> {
  let template_doc = template.load()?;
  let path = consumer_root.join(CONFIG_FILENAME);

  if !store::exists(&path) {
    store::write(&path, &template_doc, Format::Yaml)?;
    info!(path = %path.display(), "created config from template");
    return Ok(ReconcileOutcome::Created { path });
  }

  match store::read(&path, Format::Yaml) {
    Ok(existing) => {
      let before = serialize_yaml(&existing)?;
      let merged = merge(existing, &template_doc);
      let after = serialize_yaml(&merged)?;

      if before == after {
        debug!(path = %path.display(), "config already contains all template defaults");
        return Ok(ReconcileOutcome::UpToDate { path });
      }

      store::write_string(&path, &after)?;
      info!(path = %path.display(), "merged missing template defaults into config");
      Ok(ReconcileOutcome::Updated { path })
    }
    Err(StoreError::Parse { source, .. }) => {
      warn!(
        path = %path.display(),
        error = %source,
        "config could not be parsed, backing it up and writing a fresh template"
      );
      let backup = store::quarantine(&path, BACKUP_SUFFIX)?;
      store::write(&path, &template_doc, Format::Yaml)?;
      Ok(ReconcileOutcome::Quarantined { path, backup })
    }
    Err(e) => Err(e.into()),
  }
}

fn serialize_yaml(doc: &Document) -> Result<String, StoreError> {
  store::serialize(doc, Format::Yaml).map_err(|source| StoreError::Serialize {
    format: Format::Yaml,
    source,
  })
}
