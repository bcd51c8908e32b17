//! Shared document header written at the top of every split file
//!
//! The header is the DOCTYPE block (element and entity declarations) of the
//! source dictionary. It is loaded once by the caller and handed to the
//! splitter.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use crate::errors::SplitterError;

/// DOCTYPE block shipped with the crate
const BUNDLED_HEADER: &str = include_str!("../../resources/jmdict_header.dtd");

/// Header placed between the XML declaration and the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
  text: Cow<'static, str>,
}

impl DocumentHeader {
  /// The JMdict DOCTYPE bundled with this crate
  pub fn bundled() -> Self {
    Self::new(BUNDLED_HEADER)
  }

  /// Header with the given text (trailing whitespace is dropped)
  pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
    let text = text.into();
    let trimmed_len = text.trim_end().len();
    let text = match text {
      Cow::Borrowed(s) => Cow::Borrowed(&s[..trimmed_len]),
      Cow::Owned(mut s) => {
        s.truncate(trimmed_len);
        Cow::Owned(s)
      }
    };
    Self { text }
  }

  /// Reads the header from a file
  ///
  /// # Errors
  /// `SplitterError::HeaderRead` when the file cannot be read.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SplitterError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| SplitterError::HeaderRead {
      path: path.to_path_buf(),
      source: Arc::new(e),
    })?;
    Ok(Self::new(text))
  }

  /// Header text
  pub fn as_str(&self) -> &str {
    &self.text
  }
}

impl Default for DocumentHeader {
  fn default() -> Self {
    Self::bundled()
  }
}
