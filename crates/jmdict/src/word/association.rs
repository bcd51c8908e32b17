//! Reading-association engine
//!
//! Pairs every kanji form of an entry with the readings that validly apply to
//! it, and gives every reading that cannot be tied to kanji a display reading
//! of its own.
//!
//! # Routing
//!
//! A reading goes to the *no-kanji* group when it is flagged `re_nokanji` or
//! when the entry has no kanji form at all. Every other reading is
//! *kanji-associated* and is attached to each kanji form its `re_restr` list
//! allows (all of them when the list is absent).

use serde::{Deserialize, Serialize};

use crate::models::{KanjiForm, ReadingForm};

/// Kanji/reading pairing derived for presentation. Never read from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayReading {
  /// Kanji form, `None` for readings that stand on their own
  pub kanji: Option<String>,
  /// Readings that apply to `kanji`, in source order
  pub readings: Vec<String>,
  /// Information codes of the kanji form (or of the lone reading)
  pub information: Vec<String>,
  /// Priority codes of the kanji form (or of the lone reading)
  pub priorities: Vec<String>,
}

/// Splits readings into `(kanji_associated, no_kanji)`, preserving order.
pub fn partition_readings<'a>(
  kanji_forms: &[KanjiForm],
  reading_forms: &'a [ReadingForm],
) -> (Vec<&'a ReadingForm>, Vec<&'a ReadingForm>) {
  let no_kanji_entry = kanji_forms.is_empty();
  reading_forms
    .iter()
    .partition(|reading| !(reading.is_non_kanji_reading || no_kanji_entry))
}

/// Whether a reading restricted to `restricted_to` applies to `kanji`.
///
/// A restriction naming a kanji that does not exist in the entry simply never matches.
pub fn reading_applies(kanji: &str, restricted_to: Option<&[String]>) -> bool {
  restricted_to.is_none_or(|allowed| allowed.iter().any(|k| k == kanji))
}

/// Produces the display readings of an entry.
///
/// One per kanji form (in order) followed by one per no-kanji reading (in order).
pub fn associate(kanji_forms: &[KanjiForm], reading_forms: &[ReadingForm]) -> Vec<DisplayReading> {
  let (kanji_associated, no_kanji) = partition_readings(kanji_forms, reading_forms);

  let with_kanji = kanji_forms.iter().map(|kanji| DisplayReading {
    kanji: Some(kanji.text.clone()),
    readings: kanji_associated
      .iter()
      .filter(|reading| reading_applies(&kanji.text, reading.restricted_to.as_deref()))
      .map(|reading| reading.text.clone())
      .collect(),
    information: kanji.info_codes.clone().unwrap_or_default(),
    priorities: kanji.priority_codes.clone().unwrap_or_default(),
  });

  let without_kanji = no_kanji.into_iter().map(|reading| DisplayReading {
    kanji: None,
    readings: vec![reading.text.clone()],
    information: reading.info_codes.clone().unwrap_or_default(),
    priorities: reading.priority_codes.clone().unwrap_or_default(),
  });

  with_kanji.chain(without_kanji).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn texts(readings: &[DisplayReading]) -> Vec<(Option<&str>, Vec<&str>)> {
    readings
      .iter()
      .map(|r| (r.kanji.as_deref(), r.readings.iter().map(String::as_str).collect()))
      .collect()
  }

  #[test]
  fn unrestricted_reading_applies_to_every_kanji() {
    let kanji = [KanjiForm::new("食べる"), KanjiForm::new("喰べる")];
    let readings = [ReadingForm::new("たべる")];

    let result = associate(&kanji, &readings);
    assert_eq!(
      texts(&result),
      vec![
        (Some("食べる"), vec!["たべる"]),
        (Some("喰べる"), vec!["たべる"]),
      ]
    );
  }

  #[test]
  fn restricted_reading_only_applies_to_listed_kanji() {
    let kanji = [KanjiForm::new("出す")];
    let readings = [
      ReadingForm::new("だす").restricted_to(["出す"]),
      ReadingForm::new("でる").restricted_to(["出る"]),
    ];

    let result = associate(&kanji, &readings);
    assert_eq!(texts(&result), vec![(Some("出す"), vec!["だす"])]);
  }

  #[test]
  fn restriction_excludes_reading_from_other_kanji_only() {
    let kanji = [KanjiForm::new("日本"), KanjiForm::new("日本國")];
    let readings = [
      ReadingForm::new("にほん"),
      ReadingForm::new("にっぽん").restricted_to(["日本"]),
    ];

    let result = associate(&kanji, &readings);
    assert_eq!(
      texts(&result),
      vec![
        (Some("日本"), vec!["にほん", "にっぽん"]),
        (Some("日本國"), vec!["にほん"]),
      ]
    );
  }

  #[test]
  fn no_kanji_entry_yields_one_display_reading_per_reading() {
    let readings = [
      ReadingForm::new("ありがとう").with_priority_codes(["spec1"]),
      ReadingForm::new("ありがと").with_info_codes(["ik"]),
    ];

    let result = associate(&[], &readings);
    assert_eq!(
      texts(&result),
      vec![(None, vec!["ありがとう"]), (None, vec!["ありがと"])]
    );
    assert_eq!(result[0].priorities, vec!["spec1"]);
    assert_eq!(result[1].information, vec!["ik"]);
  }

  #[test]
  fn nokanji_readings_follow_kanji_display_readings() {
    let kanji = [KanjiForm::new("煙草").with_info_codes(["ateji"]).with_priority_codes(["ichi1"])];
    let readings = [
      ReadingForm::new("たばこ"),
      ReadingForm::new("タバコ").non_kanji().with_priority_codes(["gai1"]),
    ];

    let result = associate(&kanji, &readings);
    assert_eq!(
      texts(&result),
      vec![(Some("煙草"), vec!["たばこ"]), (None, vec!["タバコ"])]
    );
    assert_eq!(result[0].information, vec!["ateji"]);
    assert_eq!(result[0].priorities, vec!["ichi1"]);
    assert_eq!(result[1].priorities, vec!["gai1"]);
  }

  #[test]
  fn kanji_with_no_applicable_reading_keeps_empty_readings() {
    let kanji = [KanjiForm::new("出す")];
    let readings = [ReadingForm::new("でる").restricted_to(["出る"])];

    let result = associate(&kanji, &readings);
    assert_eq!(result.len(), 1);
    assert!(result[0].readings.is_empty());
  }

  #[test]
  fn partition_routes_by_flag_and_kanji_presence() {
    let kanji = [KanjiForm::new("漢字")];
    let readings = [ReadingForm::new("かんじ"), ReadingForm::new("カンジ").non_kanji()];

    let (associated, alone) = partition_readings(&kanji, &readings);
    assert_eq!(associated.len(), 1);
    assert_eq!(alone.len(), 1);

    let (associated, alone) = partition_readings(&[], &readings);
    assert!(associated.is_empty());
    assert_eq!(alone.len(), 2);
  }

  #[test]
  fn reading_applies_rules() {
    assert!(reading_applies("出す", None));
    assert!(reading_applies("出す", Some(&["出す".to_string()])));
    assert!(!reading_applies("出す", Some(&["出る".to_string()])));
    assert!(!reading_applies("出す", Some(&[])));
  }

  #[test]
  fn count_is_kanji_plus_no_kanji_readings() {
    let kanji = [KanjiForm::new("一"), KanjiForm::new("壱"), KanjiForm::new("弌")];
    let readings = [
      ReadingForm::new("いち"),
      ReadingForm::new("イチ").non_kanji(),
      ReadingForm::new("ワン").non_kanji(),
    ];
    assert_eq!(associate(&kanji, &readings).len(), 5);
  }
}
