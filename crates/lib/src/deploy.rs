//! Deploy routines.
//!
//! Consumers plug their own deployment steps in by implementing [`Deploy`].
//! [`PlaceholderDeploy`] only reports what it was given.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::NucleusConfig;

#[derive(Debug, Error)]
pub enum DeployError {
  #[error("failed to write deploy output")]
  Output(#[from] io::Error),
}

/// Where and how a deploy was invoked.
#[derive(Debug, Clone)]
pub struct DeployContext {
  /// The consumer project directory.
  pub cwd: PathBuf,
  /// Extra command-line arguments passed through to the routine.
  pub args: Vec<String>,
}

pub trait Deploy {
  fn deploy(&self, config: &NucleusConfig, context: &DeployContext, out: &mut dyn Write) -> Result<(), DeployError>;
}

/// Stand-in routine that prints the resolved configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderDeploy;

impl Deploy for PlaceholderDeploy {
  fn deploy(&self, config: &NucleusConfig, context: &DeployContext, out: &mut dyn Write) -> Result<(), DeployError> {
    info!(cwd = %context.cwd.display(), project = config.project_label(), "starting deploy");

    writeln!(out, "nucleus-deploy: starting deploy")?;
    writeln!(out, "working directory: {}", context.cwd.display())?;
    writeln!(out, "project: {}", config.project_label())?;
    writeln!(out, "environments: {}", config.environments_label())?;
    if !context.args.is_empty() {
      writeln!(out, "args: {}", context.args.join(" "))?;
    }

    // Real deployment steps go here.

    writeln!(out, "nucleus-deploy: deploy finished")?;
    Ok(())
  }
}
