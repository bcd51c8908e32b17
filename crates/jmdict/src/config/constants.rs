//! Constants shared by the splitter and the CLI

/// Default number of entries written to one split file
pub const DEFAULT_ENTRIES_PER_FILE: usize = 1000;

/// File name prefix of split files (`jmdict_000.xml`, `jmdict_001.xml`, ...)
pub const OUTPUT_FILE_PREFIX: &str = "jmdict_";

/// File extension of split files and of documents picked up from a directory
pub const XML_EXTENSION: &str = "xml";

/// Root element wrapped around every batch
pub const ROOT_ELEMENT: &str = "JMdict";

/// XML declaration written at the top of every batch
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Marker opening an entry in the raw document
pub const ENTRY_OPEN_MARKER: &str = "<entry>";

/// Marker closing an entry in the raw document
pub const ENTRY_CLOSE_MARKER: &str = "</entry>";
