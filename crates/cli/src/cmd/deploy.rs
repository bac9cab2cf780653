//! Implementation of the `nucleus-deploy deploy` command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use nucleus_lib::config::NucleusConfig;
use nucleus_lib::consts::CONFIG_FILENAME;
use nucleus_lib::deploy::{Deploy, DeployContext, PlaceholderDeploy};
use nucleus_lib::paths;

/// Execute the deploy command.
///
/// Loads `nucleus.yaml` from the consumer project and hands it to the deploy
/// routine together with any pass-through arguments.
///
/// # Errors
///
/// Returns an error if the config cannot be read or parsed, or if the routine fails.
pub fn cmd_deploy(root: Option<PathBuf>, args: Vec<String>) -> Result<()> {
  let cwd = match root {
    Some(root) => root,
    None => paths::invocation_dir().context("Failed to determine the working directory")?,
  };

  let config_path = cwd.join(CONFIG_FILENAME);
  let config = NucleusConfig::load(&config_path)
    .with_context(|| format!("Could not read {CONFIG_FILENAME} at {}", config_path.display()))?;

  let context = DeployContext { cwd, args };
  PlaceholderDeploy
    .deploy(&config, &context, &mut io::stdout().lock())
    .context("Deploy failed")?;

  Ok(())
}
