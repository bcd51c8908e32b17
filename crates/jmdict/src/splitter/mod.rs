//! Entry-aligned XML splitter
//!
//! Cuts a large JMdict file into numbered files of at most N entries each.
//! Every output file is a standalone document carrying the shared header.

pub mod entry_splitter;
pub mod header;
pub mod options;
pub mod report;

pub use entry_splitter::{
  BatchSink, DirectorySink, Splitter, batch_file_name, render_batch, split_lines,
};
pub use header::DocumentHeader;
pub use options::{SplitOptions, SplitPlan};
pub use report::SplitReport;
