mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// Bootstrap and deploy nucleus projects
#[derive(Parser)]
#[command(name = "nucleus-deploy")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Reconcile nucleus.yaml and package.json scripts (postinstall hook)
  Install {
    /// Consumer project root (default: $INIT_CWD, else two levels above the package)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Template to reconcile against instead of the built-in one
    #[arg(long)]
    template: Option<PathBuf>,

    /// Summary output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Exit non-zero when the install fails
    #[arg(long)]
    strict: bool,
  },

  /// Print a greeting
  Hello {
    /// Who to greet
    #[arg(default_value = "world")]
    name: String,
  },

  /// Run the deploy routine against nucleus.yaml
  Deploy {
    /// Consumer project root (default: $INIT_CWD, else the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Arguments passed through to the deploy routine
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    None => Cli::command().print_help().map_err(anyhow::Error::from),
    Some(Commands::Install {
      root,
      template,
      format,
      strict,
    }) => cmd::cmd_install(root, template, format, strict),
    Some(Commands::Hello { name }) => {
      cmd::cmd_hello(&name);
      Ok(())
    }
    Some(Commands::Deploy { root, args }) => cmd::cmd_deploy(root, args),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
