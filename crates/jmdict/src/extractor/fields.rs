//! Field extractors
//!
//! Pure functions that read one structural unit (kanji form, reading form,
//! sense, loanword source) out of its element and produce the canonical
//! record. Repeated text fields yield `None` when no element matched.

use crate::errors::ExtractError;
use crate::extractor::tags::{FieldTag, attribute, tag};
use crate::markup::Element;
use crate::models::{
  DEFAULT_LANGUAGE_CODE, KanjiForm, LoanwordSource, ReadingForm, SenseRecord, SourceCompleteness,
};

/// Collects the text of every element in `elements`, which must all be named `expected`.
///
/// Returns `Ok(None)` when `elements` is empty.
///
/// # Errors
/// `ExtractError::StructuralMismatch` when an element carries another tag name.
pub fn collect_texts<'a, I>(elements: I, expected: &str) -> Result<Option<Vec<String>>, ExtractError>
where
  I: IntoIterator<Item = &'a Element>,
{
  let mut texts = Vec::new();
  for element in elements {
    ensure_name(element, expected)?;
    texts.push(element.text());
  }
  Ok(if texts.is_empty() { None } else { Some(texts) })
}

/// Ordered text of every `./tag` child of `node`, or `None` if there is none.
pub fn extract_field(node: &Element, field: FieldTag) -> Result<Option<Vec<String>>, ExtractError> {
  let name = field.as_str();
  collect_texts(node.select(name), name)
}

/// Text of the required single child `name`.
///
/// # Errors
/// `ExtractError::MissingRequiredElement` when the child does not exist.
pub fn extract_required_text(node: &Element, name: &str) -> Result<String, ExtractError> {
  node.child(name).map(Element::text).ok_or_else(|| ExtractError::MissingRequiredElement {
    parent: node.name().to_string(),
    element: name.to_string(),
  })
}

/// Whether `node` has at least one child named `name` (e.g. `re_nokanji`).
pub fn extract_flag(node: &Element, name: &str) -> bool {
  node.child(name).is_some()
}

fn ensure_name(element: &Element, expected: &str) -> Result<(), ExtractError> {
  if element.name() == expected {
    Ok(())
  } else {
    Err(mismatch(expected, element))
  }
}

fn mismatch(expected: &str, element: &Element) -> ExtractError {
  ExtractError::StructuralMismatch {
    expected: expected.to_string(),
    actual: element.name().to_string(),
  }
}

// ─── Kanji forms ─────────────────────────────────────────────────────────────

/// Reads one `k_ele`.
pub fn extract_kanji_form(k_ele: &Element) -> Result<KanjiForm, ExtractError> {
  ensure_name(k_ele, tag::K_ELE)?;
  Ok(KanjiForm {
    text: extract_required_text(k_ele, tag::KEB)?,
    info_codes: extract_field(k_ele, FieldTag::KeInf)?,
    priority_codes: extract_field(k_ele, FieldTag::KePri)?,
  })
}

/// Reads every `k_ele` child of an entry, in order.
pub fn extract_kanji_forms(entry: &Element) -> Result<Vec<KanjiForm>, ExtractError> {
  entry.select(tag::K_ELE).map(extract_kanji_form).collect()
}

// ─── Reading forms ───────────────────────────────────────────────────────────

/// Reads one `r_ele`.
pub fn extract_reading_form(r_ele: &Element) -> Result<ReadingForm, ExtractError> {
  ensure_name(r_ele, tag::R_ELE)?;
  Ok(ReadingForm {
    text: extract_required_text(r_ele, tag::REB)?,
    is_non_kanji_reading: extract_flag(r_ele, tag::RE_NOKANJI),
    restricted_to: extract_field(r_ele, FieldTag::ReRestr)?,
    info_codes: extract_field(r_ele, FieldTag::ReInf)?,
    priority_codes: extract_field(r_ele, FieldTag::RePri)?,
  })
}

/// Reads every `r_ele` child of an entry, in order.
pub fn extract_reading_forms(entry: &Element) -> Result<Vec<ReadingForm>, ExtractError> {
  entry.select(tag::R_ELE).map(extract_reading_form).collect()
}

// ─── Senses ──────────────────────────────────────────────────────────────────

/// Reads one `sense`.
pub fn extract_sense(sense: &Element) -> Result<SenseRecord, ExtractError> {
  ensure_name(sense, tag::SENSE)?;
  Ok(SenseRecord {
    restricted_to_kanji: extract_field(sense, FieldTag::Stagk)?,
    restricted_to_readings: extract_field(sense, FieldTag::Stagr)?,
    parts_of_speech: extract_field(sense, FieldTag::Pos)?,
    cross_references: extract_field(sense, FieldTag::Xref)?,
    antonyms: extract_field(sense, FieldTag::Ant)?,
    fields: extract_field(sense, FieldTag::Field)?,
    misc_codes: extract_field(sense, FieldTag::Misc)?,
    notes: extract_field(sense, FieldTag::SInf)?,
    language_sources: extract_language_sources(sense)?,
    dialects: extract_field(sense, FieldTag::Dial)?,
    glosses: extract_field(sense, FieldTag::Gloss)?,
  })
}

/// Reads every `sense` child of an entry, in order.
pub fn extract_senses(entry: &Element) -> Result<Vec<SenseRecord>, ExtractError> {
  entry.select(tag::SENSE).map(extract_sense).collect()
}

// ─── Loanword sources ────────────────────────────────────────────────────────

/// Reads every `lsource` child of a sense, or `None` if there is none.
pub fn extract_language_sources(
  sense: &Element,
) -> Result<Option<Vec<LoanwordSource>>, ExtractError> {
  let sources = sense
    .select(tag::LSOURCE)
    .map(extract_language_source)
    .collect::<Result<Vec<_>, _>>()?;
  Ok(if sources.is_empty() { None } else { Some(sources) })
}

/// Reads one `lsource`, applying the attribute defaults:
///
/// | attribute  | value          | result          |
/// |------------|----------------|-----------------|
/// | `ls_wasei` | `"y"`          | `wasei = true`  |
/// | `ls_wasei` | other / absent | `wasei = false` |
/// | `xml:lang` | absent         | `"eng"`         |
/// | `ls_type`  | `"part"`       | `Part`          |
/// | `ls_type`  | other / absent | `Full`          |
pub fn extract_language_source(lsource: &Element) -> Result<LoanwordSource, ExtractError> {
  if !lsource.name().eq_ignore_ascii_case(tag::LSOURCE) {
    return Err(mismatch(tag::LSOURCE, lsource));
  }

  let completeness = match lsource.attribute(attribute::LS_TYPE) {
    Some("part") => SourceCompleteness::Part,
    _ => SourceCompleteness::Full,
  };

  Ok(LoanwordSource {
    wasei: lsource.attribute(attribute::LS_WASEI) == Some("y"),
    language_code: lsource.attribute(attribute::XML_LANG).unwrap_or(DEFAULT_LANGUAGE_CODE).to_string(),
    completeness,
    source_text: lsource.text(),
  })
}
