//! jmdict dictionary extraction library
//!
//! Turns JMdict XML into typed words and splits the monolithic dictionary
//! into entry-aligned files.

/// Configuration module - defines JmdictConfig, SplitterConfig and constants
pub mod config;

/// Document-set module - iterates a directory of XML documents
pub mod corpus;

/// Error module - defines JmdictError, JmdictResult and the per-concern errors
pub mod errors;

/// Extractor module - turns entry elements into canonical records
pub mod extractor;

/// Markup module - owned XML tree with DTD entity resolution
pub mod markup;

/// Data model module - canonical records (EntryRecord, SenseRecord, ...)
pub mod models;

/// Service module - the JmdictService facade
pub mod service;

/// Splitter module - streams a large file into entry-aligned batches
pub mod splitter;

/// Word module - display readings, senses and words
pub mod word;

/// Re-exports
pub use config::JmdictConfig;
pub use errors::{JmdictError, JmdictResult};
pub use service::JmdictService;
pub use word::Word;
