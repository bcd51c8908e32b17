//! Document-set iteration
//!
//! A corpus is a directory of JMdict XML files, typically the output of the
//! splitter. Files are visited in file-name order.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::XML_EXTENSION;
use crate::errors::{CorpusError, WordError};
use crate::extractor::{AssemblyReport, RejectedEntry, assemble_document};
use crate::markup::Document;
use crate::word::Word;

/// Every `.xml` file directly inside `dir`, sorted by file name.
///
/// Subdirectories are not visited.
///
/// # Errors
/// `CorpusError::ReadDir` when the directory cannot be listed.
pub fn xml_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, CorpusError> {
  let dir = dir.as_ref();
  let read_dir_error = |e| CorpusError::ReadDir {
    path: dir.to_path_buf(),
    source: Arc::new(e),
  };

  let mut files = Vec::new();
  for entry in fs::read_dir(dir).map_err(read_dir_error)? {
    let path = entry.map_err(read_dir_error)?.path();
    let is_xml = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case(XML_EXTENSION));
    if is_xml && path.is_file() {
      files.push(path);
    }
  }

  files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
  Ok(files)
}

/// A parsed document and where it came from
#[derive(Debug, Clone)]
pub struct LoadedDocument {
  /// Zero-based position within the set
  pub index: usize,
  /// Source file
  pub path: PathBuf,
  /// Parsed tree
  pub document: Document,
}

/// Lazily parses the documents of a directory, one at a time.
#[derive(Debug)]
pub struct DocumentSet {
  files: std::vec::IntoIter<PathBuf>,
  next_index: usize,
}

impl DocumentSet {
  /// Lists the XML files of `dir`. Nothing is parsed yet.
  ///
  /// # Errors
  /// `CorpusError::ReadDir` when the directory cannot be listed.
  pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, CorpusError> {
    Ok(Self::from_files(xml_files(dir)?))
  }

  /// Document set over an explicit list of files
  pub fn from_files(files: Vec<PathBuf>) -> Self {
    Self {
      files: files.into_iter(),
      next_index: 0,
    }
  }

  /// Number of documents not yet yielded
  pub fn remaining(&self) -> usize {
    self.files.len()
  }
}

impl Iterator for DocumentSet {
  type Item = Result<LoadedDocument, CorpusError>;

  fn next(&mut self) -> Option<Self::Item> {
    let path = self.files.next()?;
    let index = self.next_index;
    self.next_index += 1;

    debug!(index, path = %path.display(), "Loading document");
    Some(
      Document::from_path(&path)
        .map(|document| LoadedDocument {
          index,
          path,
          document,
        })
        .map_err(CorpusError::from),
    )
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.files.size_hint()
  }
}

/// An entry rejected in one document of the set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRejection {
  /// Document the entry belongs to
  pub path: PathBuf,
  /// Rejection details
  pub entry: RejectedEntry,
}

/// Words loaded from a set of documents
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
  /// Documents processed, in order
  pub files: Vec<PathBuf>,
  /// Words in document order
  pub words: Vec<Word>,
  /// Entries rejected by the assembler
  pub rejected: Vec<CorpusRejection>,
  /// Records that could not be turned into words
  pub unusable: Vec<WordError>,
}

impl CorpusReport {
  /// Number of entries seen across all documents
  pub fn total_entries(&self) -> usize {
    self.words.len() + self.rejected.len() + self.unusable.len()
  }

  /// Adds the assembly result of one document.
  pub fn record_document(&mut self, path: PathBuf, assembly: AssemblyReport) {
    for record in &assembly.entries {
      match Word::from_record(record) {
        Ok(word) => self.words.push(word),
        Err(error) => {
          warn!(path = %path.display(), %error, "Skipping record");
          self.unusable.push(error);
        }
      }
    }
    self.rejected.extend(assembly.rejected.into_iter().map(|entry| CorpusRejection {
      path: path.clone(),
      entry,
    }));
    self.files.push(path);
  }
}

/// Loads every word of the given documents.
///
/// # Errors
/// - `CorpusError::Markup` when a document fails to parse
/// - `CorpusError::Extract` when a document has a structural error
pub fn load_documents<I>(documents: I) -> Result<CorpusReport, CorpusError>
where
  I: IntoIterator<Item = Result<LoadedDocument, CorpusError>>,
{
  let mut report = CorpusReport::default();

  for loaded in documents {
    let LoadedDocument { path, document, .. } = loaded?;
    let assembly = assemble_document(&document).map_err(|source| CorpusError::Extract {
      path: path.clone(),
      source,
    })?;
    report.record_document(path, assembly);
  }

  info!(
    files = report.files.len(),
    words = report.words.len(),
    rejected = report.rejected.len(),
    "Loaded corpus"
  );

  Ok(report)
}

/// Loads every word of the XML files in `dir`.
///
/// # Errors
/// See [`DocumentSet::open`] and [`load_documents`].
pub fn load_words<P: AsRef<Path>>(dir: P) -> Result<CorpusReport, CorpusError> {
  load_documents(DocumentSet::open(dir)?)
}
