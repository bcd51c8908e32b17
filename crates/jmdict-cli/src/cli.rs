//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use jmdict::config::{DEFAULT_ENTRIES_PER_FILE, LogLevel};

/// JMdict extraction and splitting tool
#[derive(Parser, Debug)]
#[command(name = "jmdict", version, about = "Extracts and splits JMdict dictionaries")]
pub struct Cli {
  /// Log level: trace, debug, info, warn or error. RUST_LOG takes precedence.
  #[arg(long, global = true, env = "JMDICT_LOG_LEVEL", default_value = "info")]
  pub log_level: LogLevel,

  /// Subcommand to run
  #[command(subcommand)]
  pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Split a JMdict file into entry-aligned files
  Split(SplitArgs),

  /// Print every word of a file or directory as JSON lines
  Dump(DumpArgs),
}

/// Arguments of `jmdict split`
#[derive(Args, Debug)]
pub struct SplitArgs {
  /// Source JMdict file
  #[arg(short, long, env = "JMDICT_FILE")]
  pub file: Option<PathBuf>,

  /// Existing folder the split files are written to
  #[arg(short, long, env = "JMDICT_OUTPUT_FOLDER")]
  pub output_folder: Option<PathBuf>,

  /// Number of entries per output file
  #[arg(short, long, env = "JMDICT_ENTRIES_PER_FILE", default_value_t = DEFAULT_ENTRIES_PER_FILE)]
  pub entries_per_file: usize,

  /// DOCTYPE header written into every file (defaults to the bundled one)
  #[arg(long, env = "JMDICT_HEADER")]
  pub header: Option<PathBuf>,
}

/// Arguments of `jmdict dump`
#[derive(Args, Debug)]
pub struct DumpArgs {
  /// JMdict file, or a directory of split files
  #[arg(short, long)]
  pub input: PathBuf,

  /// Pretty-print each word instead of one line per word
  #[arg(long)]
  pub pretty: bool,
}
