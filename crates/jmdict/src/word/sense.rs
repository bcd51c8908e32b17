//! Finalized sense objects
//!
//! Wraps a canonical [`SenseRecord`] for consumption: every absent list
//! becomes an empty one. Loanword-source defaults were already applied during
//! extraction and are carried over untouched.

use serde::{Deserialize, Serialize};

use crate::models::{LoanwordSource, SenseRecord};

/// One meaning of a word, ready for consumers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
  restricted_to_kanji: Vec<String>,
  restricted_to_readings: Vec<String>,
  parts_of_speech: Vec<String>,
  misc: Vec<String>,
  dialects: Vec<String>,
  cross_references: Vec<String>,
  antonyms: Vec<String>,
  fields: Vec<String>,
  notes: Vec<String>,
  language_sources: Vec<LoanwordSource>,
  glosses: Vec<String>,
}

impl Sense {
  /// Materializes a sense from its canonical record
  pub fn from_record(record: &SenseRecord) -> Self {
    Self::from(record.clone())
  }

  /// Kanji forms this sense is restricted to (`stagk`)
  pub fn restricted_to_kanji(&self) -> &[String] {
    &self.restricted_to_kanji
  }

  /// Readings this sense is restricted to (`stagr`)
  pub fn restricted_to_readings(&self) -> &[String] {
    &self.restricted_to_readings
  }

  /// Parts of speech (`pos`)
  pub fn parts_of_speech(&self) -> &[String] {
    &self.parts_of_speech
  }

  /// Miscellaneous codes (`misc`)
  pub fn misc(&self) -> &[String] {
    &self.misc
  }

  /// Dialects (`dial`)
  pub fn dialects(&self) -> &[String] {
    &self.dialects
  }

  /// Cross references (`xref`)
  pub fn cross_references(&self) -> &[String] {
    &self.cross_references
  }

  /// Antonyms (`ant`)
  pub fn antonyms(&self) -> &[String] {
    &self.antonyms
  }

  /// Fields of application (`field`)
  pub fn fields(&self) -> &[String] {
    &self.fields
  }

  /// Sense information (`s_inf`)
  pub fn notes(&self) -> &[String] {
    &self.notes
  }

  /// Loanword sources (`lsource`)
  pub fn language_sources(&self) -> &[LoanwordSource] {
    &self.language_sources
  }

  /// Glosses (`gloss`)
  pub fn glosses(&self) -> &[String] {
    &self.glosses
  }

  /// Whether this sense applies to the given kanji/reading pair.
  ///
  /// Empty restriction lists apply to everything.
  pub fn applies_to(&self, kanji: Option<&str>, reading: &str) -> bool {
    let kanji_ok = self.restricted_to_kanji.is_empty()
      || kanji.is_some_and(|k| self.restricted_to_kanji.iter().any(|s| s == k));
    let reading_ok = self.restricted_to_readings.is_empty()
      || self.restricted_to_readings.iter().any(|s| s == reading);
    kanji_ok && reading_ok
  }
}

impl From<SenseRecord> for Sense {
  fn from(record: SenseRecord) -> Self {
    Self {
      restricted_to_kanji: record.restricted_to_kanji.unwrap_or_default(),
      restricted_to_readings: record.restricted_to_readings.unwrap_or_default(),
      parts_of_speech: record.parts_of_speech.unwrap_or_default(),
      misc: record.misc_codes.unwrap_or_default(),
      dialects: record.dialects.unwrap_or_default(),
      cross_references: record.cross_references.unwrap_or_default(),
      antonyms: record.antonyms.unwrap_or_default(),
      fields: record.fields.unwrap_or_default(),
      notes: record.notes.unwrap_or_default(),
      language_sources: record.language_sources.unwrap_or_default(),
      glosses: record.glosses.unwrap_or_default(),
    }
  }
}
