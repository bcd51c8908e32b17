//! markup module
//!
//! Thin query facade over a parsed XML tree. The extraction pipeline only
//! relies on ordered child selection, attribute lookup and text content.

pub mod document;
pub mod node;

/// Re-export major types
pub use document::Document;
pub use node::{Descendants, Element, Node};
