//! Implementation of the `nucleus-deploy install` command.
//!
//! This is the package's postinstall hook. It reconciles `nucleus.yaml` with
//! the template, adds the recommended `package.json` scripts, and prints what
//! it did. A failure is logged and reported but never fails the host install
//! unless `--strict` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use tracing::error;

use nucleus_lib::consts::{APP_NAME, CONFIG_FILENAME};
use nucleus_lib::install::{InstallError, InstallOptions, install};
use nucleus_lib::paths;
use nucleus_lib::reconcile::Template;
use nucleus_lib::summary::RunSummary;

use crate::output::{OutputFormat, print_error, print_json};

/// Execute the install command.
///
/// # Errors
///
/// Only returns an error when `strict` is set; otherwise failures are logged
/// and printed, and the command still succeeds.
pub fn cmd_install(
  root: Option<PathBuf>,
  template: Option<PathBuf>,
  format: OutputFormat,
  strict: bool,
) -> Result<()> {
  match run(root, template, format) {
    Ok(()) => Ok(()),
    Err(err) => {
      if err.downcast_ref::<InstallError>().is_some_and(InstallError::is_template_invalid) {
        error!("the {APP_NAME} template is broken; reinstall {APP_NAME}");
      }
      if strict {
        return Err(err);
      }
      print_error(&format!("{APP_NAME} postinstall failed: {err:#}"));
      Ok(())
    }
  }
}

fn run(root: Option<PathBuf>, template: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let consumer_root = match root {
    Some(root) => root,
    None => paths::consumer_root().context("Failed to locate the consumer project")?,
  };
  let template = template.map(Template::File).unwrap_or_default();

  let report = install(&InstallOptions::new(consumer_root).with_template(template))?;

  if format.is_json() {
    print_json(&report.summary)
  } else {
    print_summary(&report.summary);
    Ok(())
  }
}

fn print_summary(summary: &RunSummary) {
  let title = format!("{APP_NAME} installation summary");
  println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
  println!("{}", "-".repeat(title.len()));
  for action in &summary.actions {
    println!("- {}", action);
  }

  if !summary.notes.is_empty() {
    println!("{}", "Notes:".if_supports_color(Stream::Stdout, |s| s.yellow()));
    for note in &summary.notes {
      println!("- {}", note);
    }
  }

  println!("{}", "Next steps:".if_supports_color(Stream::Stdout, |s| s.bold()));
  println!("- Review {CONFIG_FILENAME} and fill in required fields like projectName, environments.");
  println!("- Run 'npm run nucleus:help' to see available commands.");
}
