//! extractor module
//!
//! Turns parsed JMdict elements into canonical records.

pub mod entry;
pub mod fields;
pub mod tags;

/// Re-export major functions and types
pub use entry::{AssemblyReport, RejectedEntry, assemble_document, assemble_entry};
pub use fields::{collect_texts, extract_field};
pub use tags::FieldTag;
