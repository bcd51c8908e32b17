//! jmdict command-line entry point

mod cli;
mod commands;
mod errors;

use std::io::{BufWriter, stdout};

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::errors::CliError;

fn main() -> Result<(), CliError> {
  let cli = Cli::parse();

  // Logging goes to stderr so `dump` output stays clean
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();

  match cli.command {
    Command::Split(args) => {
      commands::split(args, cli.log_level)?;
    }
    Command::Dump(args) => {
      let mut out = BufWriter::new(stdout().lock());
      commands::dump(&args, cli.log_level, &mut out)?;
    }
  }

  Ok(())
}
