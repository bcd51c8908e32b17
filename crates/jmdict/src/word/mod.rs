//! word module
//!
//! Application-facing objects derived from canonical entry records.

pub mod association;
pub mod sense;

use serde::{Deserialize, Serialize};

use crate::errors::WordError;
use crate::models::EntryRecord;

/// Re-export major types
pub use association::{DisplayReading, associate};
pub use sense::Sense;

/// One headword, ready for consumers.
///
/// `main` is the first display reading produced by [`associate`]: kanji-headed
/// when the entry has a kanji form, otherwise the first no-kanji reading.
/// `alternates` holds the rest in production order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  seq_number: u64,
  main: DisplayReading,
  alternates: Vec<DisplayReading>,
  senses: Vec<Sense>,
}

impl Word {
  /// Builds a word from its canonical record.
  ///
  /// # Errors
  /// `WordError::NoDisplayReadings` when the record has neither kanji nor reading forms.
  pub fn from_record(record: &EntryRecord) -> Result<Self, WordError> {
    let mut readings = associate(&record.kanji_forms, &record.reading_forms).into_iter();

    let main = readings.next().ok_or(WordError::NoDisplayReadings {
      seq_number: record.seq_number,
    })?;

    Ok(Self {
      seq_number: record.seq_number,
      main,
      alternates: readings.collect(),
      senses: record.senses.iter().map(Sense::from_record).collect(),
    })
  }

  /// `ent_seq` of the source entry
  pub fn seq_number(&self) -> u64 {
    self.seq_number
  }

  /// Primary display reading
  pub fn main(&self) -> &DisplayReading {
    &self.main
  }

  /// Every display reading except `main`
  pub fn alternates(&self) -> &[DisplayReading] {
    &self.alternates
  }

  /// `main` followed by `alternates`
  pub fn readings(&self) -> impl Iterator<Item = &DisplayReading> {
    std::iter::once(&self.main).chain(self.alternates.iter())
  }

  /// Senses in source order
  pub fn senses(&self) -> &[Sense] {
    &self.senses
  }

  /// Main kanji, or the first main reading for kana-only words
  pub fn headword(&self) -> &str {
    self
      .main
      .kanji
      .as_deref()
      .or_else(|| self.main.readings.first().map(String::as_str))
      .unwrap_or_default()
  }
}

impl TryFrom<&EntryRecord> for Word {
  type Error = WordError;

  fn try_from(record: &EntryRecord) -> Result<Self, Self::Error> {
    Self::from_record(record)
  }
}
