//! Canonical record definitions
//!
//! One record type per structural unit of a JMdict entry. Repeated fields are
//! `Option<Vec<String>>`: `None` means the source had no matching element,
//! which is kept distinct from an empty list up to this boundary.
use serde::{Deserialize, Serialize};

/// Language code assumed when `lsource` carries no `xml:lang` attribute.
pub const DEFAULT_LANGUAGE_CODE: &str = "eng";

/// Orthographic (kanji-containing) variant of a headword (`k_ele`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiForm {
  /// `keb`
  pub text: String,
  /// `ke_inf`
  pub info_codes: Option<Vec<String>>,
  /// `ke_pri`
  pub priority_codes: Option<Vec<String>>,
}

/// Kana reading of a headword (`r_ele`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingForm {
  /// `reb`
  pub text: String,
  /// `re_nokanji` present
  pub is_non_kanji_reading: bool,
  /// `re_restr`: the exact kanji texts this reading applies to.
  /// `None` means it applies to every kanji form of the entry.
  pub restricted_to: Option<Vec<String>>,
  /// `re_inf`
  pub info_codes: Option<Vec<String>>,
  /// `re_pri`
  pub priority_codes: Option<Vec<String>>,
}

/// Whether an `lsource` describes the whole source word or only part of it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCompleteness {
  /// `ls_type` absent
  #[default]
  Full,
  /// `ls_type="part"`
  Part,
}

impl SourceCompleteness {
  /// Attribute spelling (`"full"` / `"part"`)
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Full => "full",
      Self::Part => "part",
    }
  }
}

impl std::fmt::Display for SourceCompleteness {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Foreign-language origin of a loanword (`lsource`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanwordSource {
  /// `ls_wasei="y"`: constructed from source-language words (e.g. waseieigo)
  pub wasei: bool,
  /// ISO 639-2 code from `xml:lang`
  pub language_code: String,
  /// `ls_type`
  pub completeness: SourceCompleteness,
  /// Element text: the source word or phrase (may be empty)
  pub source_text: String,
}

impl Default for LoanwordSource {
  fn default() -> Self {
    Self {
      wasei: false,
      language_code: DEFAULT_LANGUAGE_CODE.to_string(),
      completeness: SourceCompleteness::Full,
      source_text: String::new(),
    }
  }
}

/// One meaning of an entry (`sense`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseRecord {
  /// `stagk`: kanji forms the sense is restricted to
  pub restricted_to_kanji: Option<Vec<String>>,
  /// `stagr`: readings the sense is restricted to
  pub restricted_to_readings: Option<Vec<String>>,
  /// `pos`
  pub parts_of_speech: Option<Vec<String>>,
  /// `xref`
  pub cross_references: Option<Vec<String>>,
  /// `ant`
  pub antonyms: Option<Vec<String>>,
  /// `field`
  pub fields: Option<Vec<String>>,
  /// `misc`
  pub misc_codes: Option<Vec<String>>,
  /// `s_inf`
  pub notes: Option<Vec<String>>,
  /// `lsource`
  pub language_sources: Option<Vec<LoanwordSource>>,
  /// `dial`
  pub dialects: Option<Vec<String>>,
  /// `gloss`
  pub glosses: Option<Vec<String>>,
}

/// Canonical record of one `entry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
  /// `ent_seq`, positive and unique within a document
  pub seq_number: u64,
  /// `k_ele` in source order
  pub kanji_forms: Vec<KanjiForm>,
  /// `r_ele` in source order
  pub reading_forms: Vec<ReadingForm>,
  /// `sense` in source order
  pub senses: Vec<SenseRecord>,
}

// ─── Builders ────────────────────────────────────────────────────────────────

impl KanjiForm {
  /// Kanji form without codes
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      info_codes: None,
      priority_codes: None,
    }
  }

  /// Builder that sets `ke_inf`
  #[must_use]
  pub fn with_info_codes<I, S>(mut self, codes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.info_codes = Some(codes.into_iter().map(Into::into).collect());
    self
  }

  /// Builder that sets `ke_pri`
  #[must_use]
  pub fn with_priority_codes<I, S>(mut self, codes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.priority_codes = Some(codes.into_iter().map(Into::into).collect());
    self
  }
}

impl ReadingForm {
  /// Unrestricted reading without codes
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_non_kanji_reading: false,
      restricted_to: None,
      info_codes: None,
      priority_codes: None,
    }
  }

  /// Builder that marks the reading as `re_nokanji`
  #[must_use]
  pub fn non_kanji(mut self) -> Self {
    self.is_non_kanji_reading = true;
    self
  }

  /// Builder that sets `re_restr`
  #[must_use]
  pub fn restricted_to<I, S>(mut self, kanji: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.restricted_to = Some(kanji.into_iter().map(Into::into).collect());
    self
  }

  /// Builder that sets `re_inf`
  #[must_use]
  pub fn with_info_codes<I, S>(mut self, codes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.info_codes = Some(codes.into_iter().map(Into::into).collect());
    self
  }

  /// Builder that sets `re_pri`
  #[must_use]
  pub fn with_priority_codes<I, S>(mut self, codes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.priority_codes = Some(codes.into_iter().map(Into::into).collect());
    self
  }
}

impl EntryRecord {
  /// Entry without senses
  pub fn new(seq_number: u64, kanji_forms: Vec<KanjiForm>, reading_forms: Vec<ReadingForm>) -> Self {
    Self {
      seq_number,
      kanji_forms,
      reading_forms,
      senses: Vec::new(),
    }
  }

  /// Builder that appends a sense
  #[must_use]
  pub fn with_sense(mut self, sense: SenseRecord) -> Self {
    self.senses.push(sense);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loanword_source_defaults() {
    let source = LoanwordSource::default();
    assert!(!source.wasei);
    assert_eq!(source.language_code, "eng");
    assert_eq!(source.completeness, SourceCompleteness::Full);
    assert!(source.source_text.is_empty());
  }

  #[test]
  fn completeness_serializes_lowercase() {
    let json = serde_json::to_string(&SourceCompleteness::Part).unwrap();
    assert_eq!(json, r#""part""#);
    assert_eq!(SourceCompleteness::Full.to_string(), "full");
  }

  #[test]
  fn reading_builder_sets_fields() {
    let reading = ReadingForm::new("だす").restricted_to(["出す"]).with_priority_codes(["ichi1"]);
    assert_eq!(reading.restricted_to, Some(vec!["出す".to_string()]));
    assert_eq!(reading.priority_codes, Some(vec!["ichi1".to_string()]));
    assert!(reading.info_codes.is_none());
    assert!(!reading.is_non_kanji_reading);
  }

  #[test]
  fn sense_record_default_is_all_absent() {
    let sense = SenseRecord::default();
    assert!(sense.glosses.is_none());
    assert!(sense.language_sources.is_none());
  }

  #[test]
  fn entry_record_round_trips_through_json() {
    let entry = EntryRecord::new(1_549_240, vec![KanjiForm::new("食べる")], vec![
      ReadingForm::new("たべる"),
    ])
    .with_sense(SenseRecord {
      glosses: Some(vec!["to eat".to_string()]),
      ..SenseRecord::default()
    });

    let json = serde_json::to_string(&entry).unwrap();
    let back: EntryRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
  }
}
