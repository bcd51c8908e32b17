//! CLI error definitions

use std::io;

use thiserror::Error;

use jmdict::JmdictError;

/// Errors surfaced by the `jmdict` binary
#[derive(Debug, Error)]
pub enum CliError {
  /// Library error
  #[error(transparent)]
  Jmdict(#[from] JmdictError),

  /// A word could not be serialized
  #[error("failed to serialize word: {0}")]
  Serialize(#[from] serde_json::Error),

  /// Standard output could not be written
  #[error("failed to write output: {0}")]
  Output(#[from] io::Error),
}
