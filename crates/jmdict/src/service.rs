// crates/jmdict/src/service.rs

//! JmdictService: the integration facade of the jmdict crate.
//!
//! - Extraction (document → entry records → words)
//! - Document sets (a directory of split files)
//! - Splitting (one large file → entry-aligned files)
//!
//! Callers such as the CLI only need to know this struct.

use std::path::Path;
use std::sync::OnceLock;

use tracing::info;

use crate::config::JmdictConfig;
use crate::corpus::{CorpusReport, DocumentSet, LoadedDocument, load_documents};
use crate::errors::{JmdictError, JmdictResult};
use crate::markup::Document;
use crate::splitter::{DocumentHeader, SplitOptions, SplitReport, Splitter};

/// Integration facade of the jmdict crate.
#[derive(Debug, Clone)]
pub struct JmdictService {
  config: JmdictConfig,
  /// Loaded on the first split, after the split options passed validation
  header: OnceLock<DocumentHeader>,
}

impl JmdictService {
  /// Validates the configuration values.
  ///
  /// Nothing is read from the filesystem here; paths and the header are
  /// checked when a split runs.
  ///
  /// # Errors
  /// Invalid configuration (`ConfigError`).
  pub fn new(config: JmdictConfig) -> JmdictResult<Self> {
    config.validate()?;

    Ok(Self {
      config,
      header: OnceLock::new(),
    })
  }

  /// Configuration in use
  pub fn config(&self) -> &JmdictConfig {
    &self.config
  }

  /// Header written into split files, loaded once.
  ///
  /// # Errors
  /// `SplitterError::HeaderRead` when the configured header cannot be read.
  pub fn header(&self) -> JmdictResult<&DocumentHeader> {
    if let Some(header) = self.header.get() {
      return Ok(header);
    }

    let header = match self.config.header_path() {
      Some(path) => DocumentHeader::from_path(path)?,
      None => DocumentHeader::bundled(),
    };
    Ok(self.header.get_or_init(|| header))
  }

  /// Loads the words of a single file, or of every XML file when `path` is a directory.
  ///
  /// # Errors
  /// Parse failures and structural extraction errors.
  pub fn words_from_path<P: AsRef<Path>>(&self, path: P) -> JmdictResult<CorpusReport> {
    let path = path.as_ref();
    if path.is_dir() {
      return self.words_from_dir(path);
    }

    let document = Document::from_path(path)?;
    let loaded = LoadedDocument {
      index: 0,
      path: path.to_path_buf(),
      document,
    };
    load_documents(std::iter::once(Ok(loaded))).map_err(JmdictError::from)
  }

  /// Loads the words of every XML file in `dir`, in file-name order.
  ///
  /// # Errors
  /// Directory listing, parse and structural extraction errors.
  pub fn words_from_dir<P: AsRef<Path>>(&self, dir: P) -> JmdictResult<CorpusReport> {
    let documents = DocumentSet::open(dir)?;
    info!(documents = documents.remaining(), "Loading document set");
    Ok(load_documents(documents)?)
  }

  /// Splits using the [splitter] section of the configuration.
  ///
  /// # Errors
  /// See [`Splitter::split`].
  pub fn split(&self) -> JmdictResult<SplitReport> {
    self.split_with(self.config.split_options())
  }

  /// Splits with explicit options, reusing the loaded header.
  ///
  /// Missing options are reported before any path is checked or the header is read.
  ///
  /// # Errors
  /// See [`Splitter::split`], [`JmdictConfig::validate_paths`] and [`JmdictService::header`].
  pub fn split_with(&self, options: SplitOptions) -> JmdictResult<SplitReport> {
    options.validate()?;
    self.config.validate_paths()?;

    let header = self.header()?.clone();
    Ok(Splitter::new(header, options).split()?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SplitterConfig;
  use crate::errors::{ConfigError, SplitterError};
  use std::fs;
  use std::path::PathBuf;
  use tempfile::TempDir;

  const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
<!ENTITY n "noun (common) (futsuumeishi)">
]>
<JMdict>
<entry>
<ent_seq>1000100</ent_seq>
<k_ele>
<keb>漢字</keb>
</k_ele>
<r_ele>
<reb>かんじ</reb>
</r_ele>
<sense>
<pos>&n;</pos>
<gloss>kanji</gloss>
</sense>
</entry>
<entry>
<ent_seq>1000200</ent_seq>
<r_ele>
<reb>ひらがな</reb>
</r_ele>
<sense>
<gloss>hiragana</gloss>
</sense>
</entry>
</JMdict>
"#;

  #[test]
  fn new_rejects_invalid_config() {
    let mut config = JmdictConfig::default();
    config.splitter.entries_per_file = 0;

    let err = JmdictService::new(config).unwrap_err();
    assert!(matches!(
      err,
      JmdictError::Config(ConfigError::InvalidEntriesPerFile { actual: 0 })
    ));
  }

  #[test]
  fn words_from_path_reads_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("JMdict_e.xml");
    fs::write(&file, SAMPLE).unwrap();

    let service = JmdictService::new(JmdictConfig::default()).unwrap();
    let report = service.words_from_path(&file).unwrap();

    assert_eq!(report.words.len(), 2);
    assert_eq!(report.words[0].headword(), "漢字");
    assert_eq!(
      report.words[0].senses()[0].parts_of_speech(),
      ["noun (common) (futsuumeishi)"]
    );
    assert_eq!(report.words[1].headword(), "ひらがな");
  }

  #[test]
  fn split_then_load_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("JMdict_e");
    fs::write(&file, SAMPLE).unwrap();
    let out = temp_dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let config = JmdictConfig {
      splitter: SplitterConfig {
        file: Some(file),
        output_folder: Some(out.clone()),
        entries_per_file: 1,
        header_path: None,
      },
      ..JmdictConfig::default()
    };
    let service = JmdictService::new(config).unwrap();

    let split = service.split().unwrap();
    assert_eq!(split.files.len(), 2);

    let report = service.words_from_path(&out).unwrap();
    let seqs: Vec<_> = report.words.iter().map(|w| w.seq_number()).collect();
    assert_eq!(seqs, vec![1000100, 1000200]);
  }

  #[test]
  fn missing_parameter_is_reported_before_header_is_checked() {
    let config = JmdictConfig {
      splitter: SplitterConfig {
        header_path: Some(PathBuf::from("/nonexistent/header.dtd")),
        ..SplitterConfig::default()
      },
      ..JmdictConfig::default()
    };
    let service = JmdictService::new(config).unwrap();

    let err = service.split().unwrap_err();
    assert!(matches!(
      err,
      JmdictError::Splitter(SplitterError::MissingParameter("output_folder"))
    ));
  }

  #[test]
  fn missing_header_is_reported_once_options_are_complete() {
    let temp_dir = TempDir::new().unwrap();
    let config = JmdictConfig {
      splitter: SplitterConfig {
        file: Some(temp_dir.path().join("JMdict_e")),
        output_folder: Some(temp_dir.path().to_path_buf()),
        header_path: Some(temp_dir.path().join("missing.dtd")),
        ..SplitterConfig::default()
      },
      ..JmdictConfig::default()
    };
    let service = JmdictService::new(config).unwrap();

    let err = service.split().unwrap_err();
    assert!(matches!(
      err,
      JmdictError::Config(ConfigError::InvalidHeaderPath { .. })
    ));
  }

  #[test]
  fn header_defaults_to_bundled() {
    let service = JmdictService::new(JmdictConfig::default()).unwrap();
    assert_eq!(service.header().unwrap(), &DocumentHeader::bundled());
  }

  #[test]
  fn split_without_paths_reports_missing_parameter() {
    let service = JmdictService::new(JmdictConfig::default()).unwrap();
    let err = service.split().unwrap_err();
    assert!(matches!(
      err,
      JmdictError::Splitter(SplitterError::MissingParameter("output_folder"))
    ));
  }
}
