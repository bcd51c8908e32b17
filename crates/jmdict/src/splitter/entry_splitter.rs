//! Entry-aligned splitter
//!
//! Streams the source document line by line and cuts it into batches of
//! complete entries without parsing it. Only the current batch is held in
//! memory.
//!
//! Entry boundaries are detected textually: `<entry>` opens an entry and
//! `</entry>` closes it, even when several boundaries share one line. The
//! scan is only correct when those markers never appear inside attribute
//! values or multi-line comments, which holds for JMdict.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{
  ENTRY_CLOSE_MARKER, ENTRY_OPEN_MARKER, OUTPUT_FILE_PREFIX, ROOT_ELEMENT, XML_DECLARATION,
  XML_EXTENSION,
};
use crate::errors::SplitterError;
use crate::splitter::header::DocumentHeader;
use crate::splitter::options::SplitOptions;
use crate::splitter::report::SplitReport;

/// Destination of finished batch documents.
pub trait BatchSink {
  /// Receives batch number `index` (zero-based) as a complete XML document.
  fn write_batch(&mut self, index: usize, document: &str) -> Result<(), SplitterError>;
}

/// Keeps batch documents in memory
impl BatchSink for Vec<String> {
  fn write_batch(&mut self, _index: usize, document: &str) -> Result<(), SplitterError> {
    self.push(document.to_string());
    Ok(())
  }
}

/// Writes every batch to `{folder}/jmdict_{NNN}.xml`
#[derive(Debug)]
pub struct DirectorySink {
  folder: PathBuf,
  written: Vec<PathBuf>,
}

impl DirectorySink {
  /// Sink writing into `folder`, which must exist
  pub fn new(folder: impl Into<PathBuf>) -> Self {
    Self {
      folder: folder.into(),
      written: Vec::new(),
    }
  }

  /// Path of batch number `index`
  pub fn batch_path(&self, index: usize) -> PathBuf {
    self.folder.join(batch_file_name(index))
  }

  /// Files written so far
  pub fn written(&self) -> &[PathBuf] {
    &self.written
  }

  fn into_written(self) -> Vec<PathBuf> {
    self.written
  }
}

impl BatchSink for DirectorySink {
  fn write_batch(&mut self, index: usize, document: &str) -> Result<(), SplitterError> {
    let path = self.batch_path(index);
    let write_error = |e| SplitterError::BatchWrite {
      path: path.clone(),
      source: Arc::new(e),
    };

    let file = File::create(&path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes()).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    debug!(path = %path.display(), "Wrote batch file");
    self.written.push(path);
    Ok(())
  }
}

/// File name of batch number `index` (`jmdict_000.xml`)
pub fn batch_file_name(index: usize) -> String {
  format!("{OUTPUT_FILE_PREFIX}{index:03}.{XML_EXTENSION}")
}

/// Wraps the collected entry markup into a standalone document.
pub fn render_batch(header: &DocumentHeader, body: &str) -> String {
  format!(
    "{XML_DECLARATION}\n{header}\n<{ROOT_ELEMENT}>\n  {body}\n</{ROOT_ELEMENT}>",
    header = header.as_str()
  )
}

/// Line scanner state
#[derive(Debug, Default)]
struct BatchState {
  in_entry: bool,
  buffer: String,
  entry_count: usize,
  file_index: usize,
}

impl BatchState {
  /// Feeds one line (terminator included) and calls `entry_closed` after each
  /// entry that ends on it.
  ///
  /// A line such as `</entry><entry>` is cut right after the close marker, so
  /// the entry opened on it may land in the next batch.
  fn feed<F>(&mut self, line: &str, mut entry_closed: F) -> Result<(), SplitterError>
  where
    F: FnMut(&mut Self) -> Result<(), SplitterError>,
  {
    let mut rest = line;
    let mut first_segment = true;

    loop {
      let mut search_from = 0;
      if !self.in_entry {
        let Some(open) = rest.find(ENTRY_OPEN_MARKER) else {
          return Ok(());
        };
        self.in_entry = true;
        // The opening line is kept whole so its indentation survives
        if first_segment {
          search_from = open;
        } else {
          rest = &rest[open..];
        }
      }
      first_segment = false;

      let Some(close) = rest[search_from..].find(ENTRY_CLOSE_MARKER) else {
        self.buffer.push_str(rest);
        return Ok(());
      };
      let end = search_from + close + ENTRY_CLOSE_MARKER.len();
      self.in_entry = false;
      self.entry_count += 1;

      let tail = &rest[end..];
      if !tail.contains(ENTRY_OPEN_MARKER) {
        self.buffer.push_str(rest);
        return entry_closed(self);
      }

      self.buffer.push_str(&rest[..end]);
      self.buffer.push('\n');
      entry_closed(self)?;
      rest = tail;
    }
  }

  fn flush<S: BatchSink>(
    &mut self,
    header: &DocumentHeader,
    sink: &mut S,
    report: &mut SplitReport,
  ) -> Result<(), SplitterError> {
    sink.write_batch(self.file_index, &render_batch(header, &self.buffer))?;
    debug!(index = self.file_index, entries = self.entry_count, "Emitted batch");
    report.record_batch(self.entry_count);

    self.buffer.clear();
    self.entry_count = 0;
    self.file_index += 1;
    Ok(())
  }
}

/// Splits the lines of `reader` into batches of `entries_per_file` entries.
///
/// `source` only names the input in error messages. A trailing partial batch
/// is emitted as well. An unterminated entry at the end of the input is dropped.
///
/// # Errors
/// - `SplitterError::InvalidBatchSize` when `entries_per_file` is 0
/// - `SplitterError::SourceRead` when a line cannot be read (including invalid UTF-8)
/// - Any error returned by `sink`
pub fn split_lines<R, S>(
  mut reader: R,
  source: &Path,
  header: &DocumentHeader,
  entries_per_file: usize,
  sink: &mut S,
) -> Result<SplitReport, SplitterError>
where
  R: BufRead,
  S: BatchSink,
{
  if entries_per_file == 0 {
    return Err(SplitterError::InvalidBatchSize { actual: 0 });
  }

  let mut state = BatchState::default();
  let mut report = SplitReport::default();
  let mut line = String::new();

  loop {
    line.clear();
    let read = reader.read_line(&mut line).map_err(|e| SplitterError::SourceRead {
      path: source.to_path_buf(),
      source: Arc::new(e),
    })?;
    if read == 0 {
      break;
    }

    state.feed(&line, |state| {
      if state.entry_count >= entries_per_file {
        state.flush(header, sink, &mut report)?;
      }
      Ok(())
    })?;
  }

  if state.entry_count > 0 {
    state.flush(header, sink, &mut report)?;
  }

  Ok(report)
}

/// Splits a JMdict file into entry-aligned files.
#[derive(Debug, Clone)]
pub struct Splitter {
  header: DocumentHeader,
  options: SplitOptions,
}

impl Splitter {
  /// Creates a splitter. The header is loaded once by the caller.
  pub fn new(header: DocumentHeader, options: SplitOptions) -> Self {
    Self { header, options }
  }

  /// Header written into every batch
  pub fn header(&self) -> &DocumentHeader {
    &self.header
  }

  /// Options of this run
  pub fn options(&self) -> &SplitOptions {
    &self.options
  }

  /// Runs the split.
  ///
  /// Mandatory options are checked before any filesystem access. Existing
  /// batch files with the same names are overwritten, so rerunning with the
  /// same input and batch size produces identical files.
  ///
  /// # Errors
  /// - `SplitterError::MissingParameter` / `InvalidBatchSize` from option validation
  /// - `SplitterError::OutputFolderNotFound` when the output folder is not a directory
  /// - `SplitterError::SourceRead` / `BatchWrite` on I/O failure
  pub fn split(&self) -> Result<SplitReport, SplitterError> {
    let plan = self.options.validate()?;

    if !plan.output_folder.is_dir() {
      return Err(SplitterError::OutputFolderNotFound(plan.output_folder));
    }

    let file = File::open(&plan.file).map_err(|e| SplitterError::SourceRead {
      path: plan.file.clone(),
      source: Arc::new(e),
    })?;

    info!(
      file = %plan.file.display(),
      output_folder = %plan.output_folder.display(),
      entries_per_file = plan.entries_per_file,
      "Splitting dictionary"
    );

    let mut sink = DirectorySink::new(&plan.output_folder);
    let mut report = split_lines(
      BufReader::new(file),
      &plan.file,
      &self.header,
      plan.entries_per_file,
      &mut sink,
    )?;
    report.files = sink.into_written();

    info!(
      files = report.files.len(),
      entries = report.total_entries,
      "Split finished"
    );

    Ok(report)
  }

  /// Splits an already opened source into `sink`.
  ///
  /// Only `entries_per_file` is taken from the options; `file` and
  /// `output_folder` are not required.
  ///
  /// # Errors
  /// Same as [`split_lines`].
  pub fn split_reader<R: BufRead, S: BatchSink>(
    &self,
    reader: R,
    sink: &mut S,
  ) -> Result<SplitReport, SplitterError> {
    let source = self.options.file().unwrap_or(Path::new("<reader>"));
    split_lines(reader, source, &self.header, self.options.entries_per_file(), sink)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn source(entries: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<JMdict>\n");
    for i in 1..=entries {
      xml.push_str(&format!(
        "<entry>\n<ent_seq>{i}</ent_seq>\n<r_ele>\n<reb>かな{i}</reb>\n</r_ele>\n</entry>\n"
      ));
    }
    xml.push_str("</JMdict>\n");
    xml
  }

  fn split_in_memory(xml: &str, entries_per_file: usize) -> (SplitReport, Vec<String>) {
    let mut batches = Vec::new();
    let report = split_lines(
      xml.as_bytes(),
      Path::new("memory"),
      &DocumentHeader::new("<!DOCTYPE JMdict []>"),
      entries_per_file,
      &mut batches,
    )
    .unwrap();
    (report, batches)
  }

  #[test]
  fn five_entries_in_batches_of_two() {
    let (report, batches) = split_in_memory(&source(5), 2);

    assert_eq!(report.batch_sizes, vec![2, 2, 1]);
    assert_eq!(report.total_entries, 5);
    assert_eq!(batches.len(), 3);
    for (batch, expected) in batches.iter().zip([2, 2, 1]) {
      assert_eq!(batch.matches("<entry>").count(), expected);
      assert_eq!(batch.matches("</entry>").count(), expected);
    }
  }

  #[test]
  fn exact_multiple_has_no_trailing_batch() {
    let (report, _) = split_in_memory(&source(4), 2);
    assert_eq!(report.batch_sizes, vec![2, 2]);
  }

  #[test]
  fn batch_layout_matches_expected_text() {
    let (_, batches) = split_in_memory(&source(1), 10);
    assert_eq!(
      batches[0],
      "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE JMdict []>\n<JMdict>\n  \
       <entry>\n<ent_seq>1</ent_seq>\n<r_ele>\n<reb>かな1</reb>\n</r_ele>\n</entry>\n\n</JMdict>"
    );
  }

  #[test]
  fn root_close_and_text_between_entries_are_not_captured() {
    let xml = "<JMdict>\n<entry>\n<ent_seq>1</ent_seq>\n</entry>\n<!-- gap -->\n</JMdict>\n";
    let (_, batches) = split_in_memory(xml, 10);
    assert_eq!(batches[0].matches("</JMdict>").count(), 1);
    assert!(!batches[0].contains("gap"));
  }

  #[test]
  fn single_line_entries_are_counted() {
    let xml = "<JMdict>\n<entry><ent_seq>1</ent_seq></entry>\n<entry><ent_seq>2</ent_seq></entry>\n</JMdict>";
    let (report, _) = split_in_memory(xml, 1);
    assert_eq!(report.batch_sizes, vec![1, 1]);
  }

  #[test]
  fn entry_opening_on_closing_line_is_kept() {
    let xml = "<JMdict>\n<entry>\n<ent_seq>1</ent_seq>\n</entry><entry>\n<ent_seq>2</ent_seq>\n</entry>\n</JMdict>\n";
    let (report, batches) = split_in_memory(xml, 1);

    assert_eq!(report.batch_sizes, vec![1, 1]);
    let seqs: Vec<Vec<String>> = batches
      .iter()
      .map(|batch| {
        let document = crate::markup::Document::parse(batch).unwrap();
        document.root().descendants("ent_seq").map(|e| e.text()).collect()
      })
      .collect();
    assert_eq!(seqs, vec![vec!["1".to_string()], vec!["2".to_string()]]);
  }

  #[test]
  fn input_without_entries_emits_nothing() {
    let (report, batches) = split_in_memory("<JMdict>\n</JMdict>\n", 3);
    assert_eq!(report.batch_count(), 0);
    assert!(batches.is_empty());
  }

  #[test]
  fn crlf_line_endings_are_kept() {
    let xml = "<JMdict>\r\n<entry>\r\n<ent_seq>1</ent_seq>\r\n</entry>\r\n</JMdict>\r\n";
    let (_, batches) = split_in_memory(xml, 1);
    assert!(batches[0].contains("<entry>\r\n<ent_seq>1</ent_seq>\r\n</entry>\r\n"));
  }

  #[test]
  fn zero_batch_size_is_rejected() {
    let mut batches = Vec::new();
    let err = split_lines(
      "".as_bytes(),
      Path::new("memory"),
      &DocumentHeader::bundled(),
      0,
      &mut batches,
    )
    .unwrap_err();
    assert!(matches!(err, SplitterError::InvalidBatchSize { actual: 0 }));
  }

  #[test]
  fn split_reader_uses_configured_batch_size() {
    let splitter = Splitter::new(
      DocumentHeader::bundled(),
      SplitOptions::new().with_entries_per_file(3),
    );
    let mut batches: Vec<String> = Vec::new();
    let report = splitter.split_reader(source(7).as_bytes(), &mut batches).unwrap();

    assert_eq!(report.batch_sizes, vec![3, 3, 1]);
    assert!(report.files.is_empty());
    assert!(batches.iter().all(|b| b.contains("<!DOCTYPE JMdict [")));
  }

  #[test]
  fn batch_file_names_are_zero_padded() {
    assert_eq!(batch_file_name(0), "jmdict_000.xml");
    assert_eq!(batch_file_name(42), "jmdict_042.xml");
    assert_eq!(batch_file_name(1234), "jmdict_1234.xml");
  }

  #[test]
  fn split_requires_output_folder_before_io() {
    let splitter = Splitter::new(
      DocumentHeader::bundled(),
      SplitOptions::new().with_file("/nonexistent/JMdict_e"),
    );
    let err = splitter.split().unwrap_err();
    assert!(matches!(err, SplitterError::MissingParameter("output_folder")));
  }

  #[test]
  fn split_reports_missing_output_folder() {
    let temp_dir = TempDir::new().unwrap();
    let splitter = Splitter::new(
      DocumentHeader::bundled(),
      SplitOptions::new()
        .with_file(temp_dir.path().join("JMdict_e"))
        .with_output_folder(temp_dir.path().join("missing")),
    );
    let err = splitter.split().unwrap_err();
    assert!(matches!(err, SplitterError::OutputFolderNotFound(_)));
  }

  #[test]
  fn split_reports_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let splitter = Splitter::new(
      DocumentHeader::bundled(),
      SplitOptions::new()
        .with_file(temp_dir.path().join("JMdict_e"))
        .with_output_folder(temp_dir.path()),
    );
    let err = splitter.split().unwrap_err();
    assert!(matches!(err, SplitterError::SourceRead { .. }));
  }

  #[test]
  fn split_writes_numbered_files() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("JMdict_e");
    std::fs::write(&input, source(3)).unwrap();
    let out = temp_dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let splitter = Splitter::new(
      DocumentHeader::bundled(),
      SplitOptions::new().with_file(&input).with_output_folder(&out).with_entries_per_file(2),
    );
    let report = splitter.split().unwrap();

    assert_eq!(report.files, vec![out.join("jmdict_000.xml"), out.join("jmdict_001.xml")]);
    assert!(report.files.iter().all(|f| f.is_file()));
  }
}
