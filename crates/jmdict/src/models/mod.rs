//! models module
pub mod model_definition;

/// Re-export canonical record types
pub use model_definition::{
  DEFAULT_LANGUAGE_CODE, EntryRecord, KanjiForm, LoanwordSource, ReadingForm, SenseRecord,
  SourceCompleteness,
};
