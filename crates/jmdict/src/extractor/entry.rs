//! Entry assembler
//!
//! Walks every `entry` of a document and builds one [`EntryRecord`] per entry.
//! Entry-local failures (bad `ent_seq`, duplicates, empty entries) reject only
//! the entry concerned and are collected in the [`AssemblyReport`]; structural
//! failures abort the whole pass.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::ExtractError;
use crate::extractor::fields::{extract_kanji_forms, extract_reading_forms, extract_senses};
use crate::extractor::tags::tag;
use crate::markup::{Document, Element};
use crate::models::EntryRecord;

/// Parses the `ent_seq` of an entry.
///
/// Surrounding whitespace is ignored. The value must be a positive integer.
///
/// # Errors
/// `ExtractError::MalformedSequenceNumber` when the element is missing, not a
/// number, or zero.
pub fn extract_seq_number(entry: &Element) -> Result<u64, ExtractError> {
  let raw = entry.child(tag::ENT_SEQ).map(Element::text);

  match raw.as_deref().map(str::trim).map(str::parse::<u64>) {
    Some(Ok(seq_number)) if seq_number > 0 => Ok(seq_number),
    _ => Err(ExtractError::MalformedSequenceNumber { raw }),
  }
}

/// Builds the canonical record of one `entry`.
///
/// Reads the sequence number, kanji forms, reading forms and senses, in that order.
pub fn assemble_entry(entry: &Element) -> Result<EntryRecord, ExtractError> {
  let seq_number = extract_seq_number(entry)?;
  let kanji_forms = extract_kanji_forms(entry)?;
  let reading_forms = extract_reading_forms(entry)?;
  let senses = extract_senses(entry)?;

  if kanji_forms.is_empty() && reading_forms.is_empty() {
    return Err(ExtractError::EmptyEntry { seq_number });
  }

  Ok(EntryRecord {
    seq_number,
    kanji_forms,
    reading_forms,
    senses,
  })
}

/// An entry that was skipped during assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
  /// Zero-based position of the entry within the document
  pub position: usize,
  /// Reason for the rejection
  #[serde(serialize_with = "serialize_display")]
  pub error: ExtractError,
}

fn serialize_display<S: serde::Serializer>(
  error: &ExtractError,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  serializer.collect_str(error)
}

/// Result of assembling a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
  /// Number of `entry` elements seen
  pub total: usize,
  /// Successfully assembled entries, in document order
  pub entries: Vec<EntryRecord>,
  /// Entries skipped because of entry-local errors
  pub rejected: Vec<RejectedEntry>,
}

impl AssemblyReport {
  /// Whether every entry was accepted (rejected == 0)
  pub fn is_all_accepted(&self) -> bool {
    self.rejected.is_empty()
  }

  /// Record an accepted entry
  pub fn record_accepted(&mut self, entry: EntryRecord) {
    self.entries.push(entry);
  }

  /// Record a rejected entry
  pub fn record_rejected(&mut self, position: usize, error: ExtractError) {
    self.rejected.push(RejectedEntry { position, error });
  }

  /// Record one more entry seen
  pub fn record_total(&mut self) {
    self.total += 1;
  }
}

/// Assembles every `entry` of `document` (the `//entry` query).
///
/// # Errors
/// Returns the first error for which [`ExtractError::is_entry_local`] is `false`.
pub fn assemble_document(document: &Document) -> Result<AssemblyReport, ExtractError> {
  assemble_entries(document.descendants(tag::ENTRY))
}

/// Assembles the given entry elements, enforcing sequence-number uniqueness.
pub fn assemble_entries<'a, I>(entries: I) -> Result<AssemblyReport, ExtractError>
where
  I: IntoIterator<Item = &'a Element>,
{
  let mut report = AssemblyReport::default();
  let mut seen = HashSet::new();

  for (position, entry) in entries.into_iter().enumerate() {
    report.record_total();

    let outcome = assemble_entry(entry).and_then(|record| {
      if seen.insert(record.seq_number) {
        Ok(record)
      } else {
        Err(ExtractError::DuplicateSequenceNumber {
          seq_number: record.seq_number,
        })
      }
    });

    match outcome {
      Ok(record) => {
        debug!(seq_number = record.seq_number, "Assembled entry");
        report.record_accepted(record);
      }
      Err(error) if error.is_entry_local() => {
        warn!(position, %error, "Skipping entry");
        report.record_rejected(position, error);
      }
      Err(error) => return Err(error),
    }
  }

  info!(
    total = report.total,
    accepted = report.entries.len(),
    rejected = report.rejected.len(),
    "Assembled document"
  );

  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;

  const DOC: &str = r#"<JMdict>
<entry>
<ent_seq>1358280</ent_seq>
<k_ele><keb>食べる</keb><ke_pri>ichi1</ke_pri></k_ele>
<k_ele><keb>喰べる</keb><ke_inf>iK</ke_inf></k_ele>
<r_ele><reb>たべる</reb><re_pri>ichi1</re_pri></r_ele>
<sense><pos>v1</pos><gloss>to eat</gloss></sense>
</entry>
<entry>
<ent_seq>abc</ent_seq>
<r_ele><reb>だめ</reb></r_ele>
</entry>
<entry>
<ent_seq>1000220</ent_seq>
<r_ele><reb>ありがとう</reb></r_ele>
</entry>
<entry>
<ent_seq>1358280</ent_seq>
<r_ele><reb>にばん</reb></r_ele>
</entry>
</JMdict>"#;

  fn entry_with_seq(seq: Option<&str>) -> Element {
    let entry = Element::new("entry");
    let entry = match seq {
      Some(seq) => entry.with_child(Element::new("ent_seq").with_text(seq)),
      None => entry,
    };
    entry.with_child(Element::new("r_ele").with_child(Element::new("reb").with_text("かな")))
  }

  #[test]
  fn seq_number_parses_trimmed_positive_integer() {
    assert_eq!(extract_seq_number(&entry_with_seq(Some(" 1000000\n"))).unwrap(), 1_000_000);
  }

  #[test]
  fn seq_number_rejects_missing_non_numeric_and_zero() {
    for (seq, raw) in [
      (None, None),
      (Some("abc"), Some("abc".to_string())),
      (Some("0"), Some("0".to_string())),
      (Some("-5"), Some("-5".to_string())),
    ] {
      let err = extract_seq_number(&entry_with_seq(seq)).unwrap_err();
      assert_eq!(err, ExtractError::MalformedSequenceNumber { raw });
    }
  }

  #[test]
  fn assemble_entry_rejects_entry_without_forms() {
    let entry = Element::new("entry").with_child(Element::new("ent_seq").with_text("42"));
    assert_eq!(
      assemble_entry(&entry).unwrap_err(),
      ExtractError::EmptyEntry { seq_number: 42 }
    );
  }

  #[test]
  fn assemble_document_keeps_going_past_bad_entries() {
    let document = Document::parse(DOC).unwrap();
    let report = assemble_document(&document).unwrap();

    assert_eq!(report.total, 4);
    let seqs: Vec<u64> = report.entries.iter().map(|e| e.seq_number).collect();
    assert_eq!(seqs, vec![1_358_280, 1_000_220]);

    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].position, 1);
    assert!(matches!(
      report.rejected[0].error,
      ExtractError::MalformedSequenceNumber { .. }
    ));
    assert_eq!(report.rejected[1].position, 3);
    assert_eq!(
      report.rejected[1].error,
      ExtractError::DuplicateSequenceNumber {
        seq_number: 1_358_280
      }
    );
    assert!(!report.is_all_accepted());
  }

  #[test]
  fn assemble_document_builds_nested_records() {
    let document = Document::parse(DOC).unwrap();
    let report = assemble_document(&document).unwrap();
    let taberu = &report.entries[0];

    assert_eq!(taberu.kanji_forms.len(), 2);
    assert_eq!(taberu.kanji_forms[0].text, "食べる");
    assert_eq!(taberu.kanji_forms[0].priority_codes, Some(vec!["ichi1".to_string()]));
    assert_eq!(taberu.kanji_forms[1].info_codes, Some(vec!["iK".to_string()]));
    assert_eq!(taberu.reading_forms[0].text, "たべる");
    assert_eq!(taberu.senses[0].glosses, Some(vec!["to eat".to_string()]));

    let arigatou = &report.entries[1];
    assert!(arigatou.kanji_forms.is_empty());
    assert!(arigatou.senses.is_empty());
  }

  #[test]
  fn assemble_document_aborts_on_structural_errors() {
    let document = Document::parse(
      "<JMdict><entry><ent_seq>1</ent_seq><k_ele><ke_pri>news1</ke_pri></k_ele></entry></JMdict>",
    )
    .unwrap();
    let err = assemble_document(&document).unwrap_err();
    assert!(matches!(err, ExtractError::MissingRequiredElement { .. }));
  }

  #[test]
  fn report_serializes_errors_as_text() {
    let mut report = AssemblyReport::default();
    report.record_total();
    report.record_rejected(0, ExtractError::EmptyEntry { seq_number: 7 });
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
      json["rejected"][0]["error"],
      "entry 7 has no kanji or reading forms"
    );
  }
}
