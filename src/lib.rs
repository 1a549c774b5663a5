//! Batched, group-aligned synthetic dataset generation.
//!
//! Rows are mapped to groups by a [`partition::DividedCount`]; grouped columns
//! draw one value per group from a [`source::ValueSource`]. A
//! [`dataset::DatasetSpec`] builds every column against one row target, the
//! [`batch::BatchAssembler`] pulls them in lock-step, and
//! [`writer::write_dataset`] persists the batches as Parquet.

pub mod batch;
pub mod column;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generate;
pub mod inspect;
pub mod output;
pub mod partition;
pub mod source;
pub mod stream;
pub mod table;
pub mod timer;
pub mod writer;

pub use error::{GenerateError, Result, SourceError};
