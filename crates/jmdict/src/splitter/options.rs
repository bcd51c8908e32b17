//! Splitter options

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_ENTRIES_PER_FILE;
use crate::errors::SplitterError;

/// Options for one split run.
///
/// `file` and `output_folder` are mandatory but optional here so that a
/// missing value is reported by [`SplitOptions::validate`] with its name,
/// before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
  file: Option<PathBuf>,
  output_folder: Option<PathBuf>,
  entries_per_file: usize,
}

/// Options that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
  /// Source document
  pub file: PathBuf,
  /// Destination folder
  pub output_folder: PathBuf,
  /// Entries per output file (>= 1)
  pub entries_per_file: usize,
}

impl Default for SplitOptions {
  fn default() -> Self {
    Self {
      file: None,
      output_folder: None,
      entries_per_file: DEFAULT_ENTRIES_PER_FILE,
    }
  }
}

impl SplitOptions {
  /// Options with the default batch size and no paths
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder that sets the source document
  #[must_use]
  pub fn with_file(mut self, file: impl AsRef<Path>) -> Self {
    self.file = Some(file.as_ref().to_path_buf());
    self
  }

  /// Builder that sets the output folder
  #[must_use]
  pub fn with_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
    self.output_folder = Some(output_folder.as_ref().to_path_buf());
    self
  }

  /// Builder that sets the number of entries per output file
  #[must_use]
  pub fn with_entries_per_file(mut self, entries_per_file: usize) -> Self {
    self.entries_per_file = entries_per_file;
    self
  }

  /// Source document, if set
  pub fn file(&self) -> Option<&Path> {
    self.file.as_deref()
  }

  /// Output folder, if set
  pub fn output_folder(&self) -> Option<&Path> {
    self.output_folder.as_deref()
  }

  /// Entries per output file
  pub fn entries_per_file(&self) -> usize {
    self.entries_per_file
  }

  /// Checks that every mandatory option is present.
  ///
  /// `output_folder` is checked before `file`.
  ///
  /// # Errors
  /// - `SplitterError::MissingParameter("output_folder")`
  /// - `SplitterError::MissingParameter("file")`
  /// - `SplitterError::InvalidBatchSize` when `entries_per_file` is 0
  pub fn validate(&self) -> Result<SplitPlan, SplitterError> {
    let output_folder =
      self.output_folder.clone().ok_or(SplitterError::MissingParameter("output_folder"))?;
    let file = self.file.clone().ok_or(SplitterError::MissingParameter("file"))?;

    if self.entries_per_file == 0 {
      return Err(SplitterError::InvalidBatchSize {
        actual: self.entries_per_file,
      });
    }

    Ok(SplitPlan {
      file,
      output_folder,
      entries_per_file: self.entries_per_file,
    })
  }
}
