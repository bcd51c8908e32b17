//! Error definitions

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the markup facade while reading or parsing XML.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum MarkupError {
  /// The file could not be read
  #[error("failed to read XML file: path={path:?}, error={source}")]
  Io {
    /// Path that was being read
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: Arc<io::Error>,
  },

  /// quick-xml rejected the input
  #[error("XML parse error at byte {position}: {source}")]
  Xml {
    /// Byte offset reported by the reader
    position: u64,
    /// Underlying quick-xml error
    #[source]
    source: Arc<quick_xml::Error>,
  },

  /// The tree could not be built (unbalanced tags, no root element, ...)
  #[error("malformed XML document: {reason}")]
  Malformed {
    /// Why the tree is malformed
    reason: String,
  },
}

/// Errors raised while extracting canonical records from an element tree.
///
/// Use [`ExtractError::is_entry_local`] to decide whether an error voids only
/// the current entry or the whole document pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
  /// A selected element does not carry the requested tag name
  #[error("structural mismatch: expected <{expected}>, found <{actual}>")]
  StructuralMismatch {
    /// Requested tag name
    expected: String,
    /// Tag name actually found
    actual: String,
  },

  /// A required child element is missing
  #[error("<{parent}> is missing required element <{element}>")]
  MissingRequiredElement {
    /// Parent tag name
    parent: String,
    /// Missing child tag name
    element: String,
  },

  /// `ent_seq` is missing, non-numeric or zero
  #[error("malformed sequence number: {raw:?}")]
  MalformedSequenceNumber {
    /// Raw text of `ent_seq` (`None` when the element is absent)
    raw: Option<String>,
  },

  /// `ent_seq` has already been used by an earlier entry in the same document
  #[error("duplicate sequence number: {seq_number}")]
  DuplicateSequenceNumber {
    /// Offending sequence number
    seq_number: u64,
  },

  /// The entry carries neither kanji forms nor reading forms
  #[error("entry {seq_number} has no kanji or reading forms")]
  EmptyEntry {
    /// Sequence number of the empty entry
    seq_number: u64,
  },
}

impl ExtractError {
  /// Whether the error only invalidates the entry it occurred in.
  ///
  /// Structural errors return `false` and abort the document pass.
  pub fn is_entry_local(&self) -> bool {
    matches!(
      self,
      Self::MalformedSequenceNumber { .. }
        | Self::DuplicateSequenceNumber { .. }
        | Self::EmptyEntry { .. }
    )
  }
}

/// Errors raised while deriving a `Word` from a canonical record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
  /// The record yields no display reading at all
  #[error("entry {seq_number} produced no display readings")]
  NoDisplayReadings {
    /// Sequence number of the entry
    seq_number: u64,
  },
}

/// Errors raised while iterating a directory of documents.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CorpusError {
  /// The directory could not be listed
  #[error("failed to read directory: path={path:?}, error={source}")]
  ReadDir {
    /// Directory path
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: Arc<io::Error>,
  },

  /// One of the documents failed to parse
  #[error(transparent)]
  Markup(#[from] MarkupError),

  /// Extraction failed globally for one of the documents
  #[error("extraction failed for {path:?}: {source}")]
  Extract {
    /// Document path
    path: PathBuf,
    /// Underlying extraction error
    #[source]
    source: ExtractError,
  },
}

/// Errors raised by the entry-aligned splitter.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SplitterError {
  /// A mandatory option was not supplied
  #[error("missing required parameter: {0}")]
  MissingParameter(&'static str),

  /// `entries_per_file` must be positive
  #[error("entries_per_file must be at least 1: actual={actual}")]
  InvalidBatchSize {
    /// Supplied batch size
    actual: usize,
  },

  /// The output folder does not exist or is not a directory
  #[error("output folder not found: {0:?}")]
  OutputFolderNotFound(PathBuf),

  /// The header resource could not be read
  #[error("failed to read document header: path={path:?}, error={source}")]
  HeaderRead {
    /// Header path
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: Arc<io::Error>,
  },

  /// Reading the source document failed
  #[error("failed to read source document: path={path:?}, error={source}")]
  SourceRead {
    /// Source path
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: Arc<io::Error>,
  },

  /// Writing a batch file failed
  #[error("failed to write batch file: path={path:?}, error={source}")]
  BatchWrite {
    /// Batch file path
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: Arc<io::Error>,
  },
}

/// Configuration (JmdictConfig) errors
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// splitter.entries_per_file < 1
  #[error("splitter.entries_per_file must be at least 1: actual={actual}")]
  InvalidEntriesPerFile {
    /// Actually specified value
    actual: usize,
  },

  /// splitter.header_path is set but is not a file
  #[error("splitter.header_path is not a file: path={path:?}")]
  InvalidHeaderPath {
    /// Invalid path
    path: PathBuf,
  },

  /// splitter.output_folder exists but is not a directory
  #[error("splitter.output_folder is not a directory: path={path:?}")]
  InvalidOutputFolder {
    /// Invalid path
    path: PathBuf,
  },
}

/// Integrated error
/// Public APIs of this crate return this error
/// Used as `JmdictResult<T>` = `Result<T, JmdictError>`
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum JmdictError {
  /// Markup errors
  #[error(transparent)]
  Markup(#[from] MarkupError),

  /// Extraction errors
  #[error(transparent)]
  Extract(#[from] ExtractError),

  /// Word derivation errors
  #[error(transparent)]
  Word(#[from] WordError),

  /// Document-set errors
  #[error(transparent)]
  Corpus(#[from] CorpusError),

  /// Splitter errors
  #[error(transparent)]
  Splitter(#[from] SplitterError),

  /// Configuration errors
  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Standard Result type alias for the jmdict crate
pub type JmdictResult<T> = Result<T, JmdictError>;
