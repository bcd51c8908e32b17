//! Configuration

mod constants;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::splitter::SplitOptions;

pub use constants::{
  DEFAULT_ENTRIES_PER_FILE, ENTRY_CLOSE_MARKER, ENTRY_OPEN_MARKER, OUTPUT_FILE_PREFIX,
  ROOT_ELEMENT, XML_DECLARATION, XML_EXTENSION,
};

/// Top-level configuration for jmdict.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JmdictConfig {
  /// [splitter] section
  #[serde(default)]
  pub splitter: SplitterConfig,
  /// [logging] section
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// [splitter] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitterConfig {
  /// Source JMdict file
  #[serde(default)]
  pub file: Option<PathBuf>,
  /// Folder the split files are written to
  #[serde(default)]
  pub output_folder: Option<PathBuf>,
  /// Number of entries per split file
  #[serde(default = "default_entries_per_file")]
  pub entries_per_file: usize,
  /// Header (DOCTYPE) written before the root element of every split file.
  ///
  /// If omitted, the header bundled with the crate is used.
  #[serde(default)]
  pub header_path: Option<PathBuf>,
}

fn default_entries_per_file() -> usize {
  DEFAULT_ENTRIES_PER_FILE
}

impl Default for SplitterConfig {
  fn default() -> Self {
    Self {
      file: None,
      output_folder: None,
      entries_per_file: DEFAULT_ENTRIES_PER_FILE,
      header_path: None,
    }
  }
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  #[serde(default)]
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  ///error
  Error,
}

impl LogLevel {
  /// Directive understood by `tracing_subscriber::EnvFilter`
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Trace => "trace",
      Self::Debug => "debug",
      Self::Info => "info",
      Self::Warn => "warn",
      Self::Error => "error",
    }
  }
}

impl std::fmt::Display for LogLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "trace" => Ok(Self::Trace),
      "debug" => Ok(Self::Debug),
      "info" => Ok(Self::Info),
      "warn" => Ok(Self::Warn),
      "error" => Ok(Self::Error),
      _ => Err(format!(
        "Unknown log level: {s}. Valid values: trace, debug, info, warn, error"
      )),
    }
  }
}

// ===== Accessor Methods =====

impl JmdictConfig {
  /// Returns the number of entries per split file.
  pub fn entries_per_file(&self) -> usize {
    self.splitter.entries_per_file
  }

  /// Returns the configured header path.
  ///
  /// `None` means the bundled header is used.
  pub fn header_path(&self) -> Option<&Path> {
    self.splitter.header_path.as_deref()
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }

  /// Builds splitter options from the [splitter] section.
  ///
  /// Missing `file` / `output_folder` are reported by the splitter itself.
  pub fn split_options(&self) -> SplitOptions {
    let mut options = SplitOptions::new().with_entries_per_file(self.splitter.entries_per_file);
    if let Some(file) = &self.splitter.file {
      options = options.with_file(file);
    }
    if let Some(output_folder) = &self.splitter.output_folder {
      options = options.with_output_folder(output_folder);
    }
    options
  }

  /// Validates the values of the configuration without touching the filesystem.
  ///
  /// # Validation Items
  /// - `splitter.entries_per_file` >= 1
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.splitter.entries_per_file < 1 {
      return Err(ConfigError::InvalidEntriesPerFile {
        actual: self.splitter.entries_per_file,
      });
    }

    Ok(())
  }

  /// Checks the configured paths against the filesystem.
  ///
  /// # Validation Items
  /// - `splitter.header_path` is a file when given
  /// - `splitter.output_folder` is a directory when it exists
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    if let Some(header_path) = &self.splitter.header_path
      && !header_path.is_file()
    {
      return Err(ConfigError::InvalidHeaderPath {
        path: header_path.clone(),
      });
    }

    if let Some(output_folder) = &self.splitter.output_folder
      && output_folder.exists()
      && !output_folder.is_dir()
    {
      return Err(ConfigError::InvalidOutputFolder {
        path: output_folder.clone(),
      });
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
