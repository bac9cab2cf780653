//! The postinstall sequence: reconcile the config, then add manifest scripts.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::reconcile::{ReconcileError, ReconcileOutcome, Template, reconcile};
use crate::scripts::{InjectError, InjectOutcome, RECOMMENDED_SCRIPTS, inject_scripts};
use crate::summary::RunSummary;

#[derive(Debug, Error)]
pub enum InstallError {
  #[error("consumer root {} is not accessible", path.display())]
  Root { path: PathBuf, source: std::io::Error },

  #[error("failed to reconcile nucleus.yaml")]
  Reconcile(#[from] ReconcileError),

  #[error("failed to add package.json scripts")]
  Inject(#[from] InjectError),
}

impl InstallError {
  /// Whether the failure means the tool's own installation is broken.
  pub fn is_template_invalid(&self) -> bool {
    matches!(self, InstallError::Reconcile(ReconcileError::TemplateInvalid { .. }))
  }
}

/// Options for an install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
  /// Root of the consumer project.
  pub consumer_root: PathBuf,
  pub template: Template,
  /// Scripts to offer; defaults to [`RECOMMENDED_SCRIPTS`].
  pub scripts: &'static [(&'static str, &'static str)],
}

impl InstallOptions {
  pub fn new(consumer_root: impl Into<PathBuf>) -> Self {
    Self {
      consumer_root: consumer_root.into(),
      template: Template::Embedded,
      scripts: RECOMMENDED_SCRIPTS,
    }
  }

  pub fn with_template(mut self, template: Template) -> Self {
    self.template = template;
    self
  }
}

/// Result of a completed install run.
#[derive(Debug)]
pub struct InstallReport {
  /// The canonicalized consumer root.
  pub consumer_root: PathBuf,
  pub config: ReconcileOutcome,
  pub scripts: InjectOutcome,
  /// Actions and notes of both steps, in order.
  pub summary: RunSummary,
}

/// Run the install sequence against `options.consumer_root`.
///
/// Steps run in order and the first error stops the sequence.
///
/// # Errors
///
/// - `Root` if the consumer root does not exist or cannot be resolved
/// - `Reconcile` for template failures or I/O errors on the config
/// - `Inject` for I/O errors on the manifest
pub fn install(options: &InstallOptions) -> Result<InstallReport, InstallError> {
  let consumer_root = canonical_root(&options.consumer_root)?;
  info!(root = %consumer_root.display(), "installing into consumer project");

  let mut summary = RunSummary::new();

  let config = reconcile(&consumer_root, &options.template)?;
  summary.extend(config.summary());

  let scripts = inject_scripts(&consumer_root, options.scripts)?;
  summary.extend(scripts.summary());

  Ok(InstallReport {
    consumer_root,
    config,
    scripts,
    summary,
  })
}

fn canonical_root(path: &Path) -> Result<PathBuf, InstallError> {
  dunce::canonicalize(path).map_err(|source| InstallError::Root {
    path: path.to_path_buf(),
    source,
  })
}
