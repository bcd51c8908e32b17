//! Subcommand implementations

use std::io::Write;

use tracing::{info, warn};

use jmdict::config::{JmdictConfig, LogLevel, LoggingConfig, SplitterConfig};
use jmdict::corpus::CorpusReport;
use jmdict::splitter::SplitReport;
use jmdict::{JmdictService, Word};

use crate::cli::{DumpArgs, SplitArgs};
use crate::errors::CliError;

/// Builds the library configuration for `jmdict split`.
pub fn split_config(args: SplitArgs, log_level: LogLevel) -> JmdictConfig {
  JmdictConfig {
    splitter: SplitterConfig {
      file: args.file,
      output_folder: args.output_folder,
      entries_per_file: args.entries_per_file,
      header_path: args.header,
    },
    logging: LoggingConfig { level: log_level },
  }
}

/// `jmdict split`
pub fn split(args: SplitArgs, log_level: LogLevel) -> Result<SplitReport, CliError> {
  let service = JmdictService::new(split_config(args, log_level))?;
  let report = service.split()?;

  info!(
    files = report.files.len(),
    entries = report.total_entries,
    "Wrote split files"
  );
  Ok(report)
}

/// `jmdict dump`: one JSON word per line (or pretty-printed) to `out`.
pub fn dump<W: Write>(args: &DumpArgs, log_level: LogLevel, out: &mut W) -> Result<CorpusReport, CliError> {
  let config = JmdictConfig {
    logging: LoggingConfig { level: log_level },
    ..JmdictConfig::default()
  };
  let service = JmdictService::new(config)?;
  let report = service.words_from_path(&args.input)?;

  for word in &report.words {
    write_word(word, args.pretty, out)?;
  }
  out.flush()?;

  if !report.rejected.is_empty() {
    warn!(rejected = report.rejected.len(), "Some entries were skipped");
  }
  info!(words = report.words.len(), files = report.files.len(), "Dumped words");
  Ok(report)
}

fn write_word<W: Write>(word: &Word, pretty: bool, out: &mut W) -> Result<(), CliError> {
  if pretty {
    serde_json::to_writer_pretty(&mut *out, word)?;
  } else {
    serde_json::to_writer(&mut *out, word)?;
  }
  out.write_all(b"\n")?;
  Ok(())
}
