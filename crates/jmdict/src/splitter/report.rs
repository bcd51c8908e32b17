//! Split result report

use std::path::PathBuf;

use serde::Serialize;

/// Summary of one split run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
  /// Files written, in order (empty when writing to an in-memory sink)
  pub files: Vec<PathBuf>,
  /// Number of entries in each batch, in order
  pub batch_sizes: Vec<usize>,
  /// Number of entries across all batches
  pub total_entries: usize,
}

impl SplitReport {
  /// Number of batches emitted
  pub fn batch_count(&self) -> usize {
    self.batch_sizes.len()
  }

  /// Record one emitted batch
  pub fn record_batch(&mut self, entries: usize) {
    self.batch_sizes.push(entries);
    self.total_entries += entries;
  }
}
