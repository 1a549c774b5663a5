//! Error types for dataset generation and persistence.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Failure reported by a [`ValueSource`](crate::source::ValueSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// A finite source has no more values
    #[error("value source exhausted")]
    Exhausted,
    /// The source could not produce a value
    #[error("value source failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid partition: total {total} and divisor {divisor} must be positive")]
    InvalidArgument { total: u64, divisor: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// First generator call failed; the cause is passed through unwrapped
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("generator failed while starting group {group}")]
    GeneratorFailure {
        group: u64,
        #[source]
        source: SourceError,
    },

    #[error(
        "column {column} exhausted prematurely in batch {batch}: expected {expected} rows, got {produced}"
    )]
    PrematureExhaustion {
        column: String,
        batch: usize,
        expected: usize,
        produced: usize,
    },

    #[error("no batches to write for {}", .path.display())]
    EmptyDataset { path: PathBuf },

    #[error("output path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Parquet(#[from] ParquetError),
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
