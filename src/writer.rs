//! Dataset persistence: first batch overwrites, later batches append.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::batch::Batch;
use crate::error::{GenerateError, Result};
use crate::table::{read_table, to_record_batch, write_parquet, writer_properties};

/// Persists a sequence of same-schema record batches to one file.
pub trait Appender {
    /// Write the first batch, replacing anything already at the target
    fn create(&mut self, batch: &RecordBatch) -> Result<()>;

    /// Add a batch after every row written so far
    fn append(&mut self, batch: &RecordBatch) -> Result<()>;

    /// Complete the file
    fn finish(&mut self) -> Result<()>;
}

/// Read-modify-rewrite appender.
///
/// Every append reads the whole file back, concatenates the new rows and
/// rewrites it, so each append costs O(file size). After every successful
/// call the file holds all batches written so far.
#[derive(Debug, Clone)]
pub struct RewriteAppender {
    path: PathBuf,
}

impl RewriteAppender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Appender for RewriteAppender {
    fn create(&mut self, batch: &RecordBatch) -> Result<()> {
        write_parquet(&self.path, batch)
    }

    fn append(&mut self, batch: &RecordBatch) -> Result<()> {
        let existing = read_table(&self.path)?;
        let combined = concat_batches(&batch.schema(), [&existing, batch])?;
        write_parquet(&self.path, &combined)
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Incremental appender keeping one Parquet writer open.
///
/// Each batch becomes its own row group. The file has no footer, and so is
/// unreadable, until [`Appender::finish`] succeeds.
pub struct StreamAppender {
    path: PathBuf,
    writer: Option<ArrowWriter<File>>,
}

impl StreamAppender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    fn write_group(&mut self, batch: &RecordBatch) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            std::io::Error::other(format!(
                "no open writer for {}; create must come first",
                self.path.display()
            ))
        })?;
        writer.write(batch)?;
        writer.flush()?;
        Ok(())
    }
}

impl Appender for StreamAppender {
    fn create(&mut self, batch: &RecordBatch) -> Result<()> {
        let file = File::create(&self.path)?;
        let writer = ArrowWriter::try_new(file, batch.schema(), Some(writer_properties().clone()))?;
        self.writer = Some(writer);
        self.write_group(batch)
    }

    fn append(&mut self, batch: &RecordBatch) -> Result<()> {
        self.write_group(batch)
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}

/// How batches after the first reach the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendMode {
    /// Read the file back and rewrite it for every batch
    #[default]
    Rewrite,
    /// Keep the file open and add one row group per batch
    Stream,
}

impl AppendMode {
    pub fn appender(&self, path: &Path) -> Box<dyn Appender> {
        match self {
            AppendMode::Rewrite => Box::new(RewriteAppender::new(path)),
            AppendMode::Stream => Box::new(StreamAppender::new(path)),
        }
    }
}

impl fmt::Display for AppendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendMode::Rewrite => write!(f, "rewrite"),
            AppendMode::Stream => write!(f, "stream"),
        }
    }
}

impl std::str::FromStr for AppendMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rewrite" => Ok(AppendMode::Rewrite),
            "stream" => Ok(AppendMode::Stream),
            _ => Err(format!(
                "Unknown append mode: {}. Valid options: rewrite, stream",
                s
            )),
        }
    }
}

/// Outcome of writing one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteStats {
    pub batches: usize,
    pub rows: u64,
    pub path: PathBuf,
}

/// Write `batches` to `path` with the given append mode.
pub fn write_dataset<I>(path: &Path, batches: I, mode: AppendMode) -> Result<WriteStats>
where
    I: IntoIterator<Item = Result<Batch>>,
{
    let mut appender = mode.appender(path);
    write_with(appender.as_mut(), path, batches, |_| {})
}

fn append_all<I, F>(
    appender: &mut dyn Appender,
    first: Batch,
    rest: I,
    stats: &mut WriteStats,
    on_rows: &mut F,
) -> Result<()>
where
    I: Iterator<Item = Result<Batch>>,
    F: FnMut(u64),
{
    appender.create(&to_record_batch(&first)?)?;
    stats.batches = 1;
    stats.rows = first.num_rows() as u64;
    debug!(batch = 0, rows = stats.rows, path = %stats.path.display(), "created file");
    on_rows(stats.rows);

    for batch in rest {
        let batch = batch?;
        let rows = batch.num_rows() as u64;
        appender.append(&to_record_batch(&batch)?)?;
        stats.batches += 1;
        stats.rows += rows;
        debug!(batch = batch.index(), rows, "appended batch");
        on_rows(stats.rows);
    }
    Ok(())
}

/// Drive `appender` over `batches`, reporting rows written after each batch.
///
/// An empty sequence fails with [`GenerateError::EmptyDataset`] before the
/// appender is touched. Any later error aborts the write, but the appender is
/// still finished so the file keeps every batch written before the failure.
pub fn write_with<I, F>(
    appender: &mut dyn Appender,
    path: &Path,
    batches: I,
    mut on_rows: F,
) -> Result<WriteStats>
where
    I: IntoIterator<Item = Result<Batch>>,
    F: FnMut(u64),
{
    let mut batches = batches.into_iter();

    let first = match batches.next() {
        Some(batch) => batch?,
        None => {
            return Err(GenerateError::EmptyDataset {
                path: path.to_path_buf(),
            })
        }
    };

    let mut stats = WriteStats {
        batches: 0,
        rows: 0,
        path: path.to_path_buf(),
    };

    if let Err(e) = append_all(appender, first, batches, &mut stats, &mut on_rows) {
        // Close whatever was written so the file still holds every completed batch
        if let Err(close) = appender.finish() {
            warn!(path = %path.display(), error = %close, "could not close partial file");
        }
        return Err(e);
    }

    appender.finish()?;
    info!(
        path = %path.display(),
        batches = stats.batches,
        rows = stats.rows,
        "wrote dataset"
    );
    Ok(stats)
}
