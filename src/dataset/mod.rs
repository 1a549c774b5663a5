//! Dataset kinds and their column registries.
//!
//! A [`DatasetSpec`] owns the row target and batch size of one dataset and
//! builds every column stream from that single row target, so all columns
//! run out together.

mod cost_centers;
mod employees;
mod working_time;

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::batch::BatchAssembler;
use crate::column::{ColumnStream, ColumnType, GroupedColumn, IdColumn};
use crate::error::{GenerateError, Result};
use crate::source::ValueSource;

pub use cost_centers::COST_CENTER_DIVISOR;

/// The three record kinds the sandbox generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    CostCenters,
    Employees,
    WorkingTime,
}

impl DatasetKind {
    /// All kinds in generation order
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::CostCenters,
        DatasetKind::Employees,
        DatasetKind::WorkingTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::CostCenters => "cost_centers",
            DatasetKind::Employees => "employees",
            DatasetKind::WorkingTime => "working_time",
        }
    }

    /// Output file name inside the output directory
    pub fn file_name(&self) -> String {
        format!("{}.parquet", self.name())
    }

    /// Rows generated for this kind
    pub fn total_rows(&self, params: &DatasetParams) -> Result<u64> {
        let multiplier = match self {
            DatasetKind::CostCenters => 1,
            DatasetKind::Employees => params.worker_multiplier,
            DatasetKind::WorkingTime => params.time_multiplier,
        };
        params.num_rows.checked_mul(multiplier).ok_or_else(|| {
            GenerateError::InvalidConfig(format!(
                "{} rows overflow: {} x {}",
                self, params.num_rows, multiplier
            ))
        })
    }

    fn ordinal(&self) -> u64 {
        match self {
            DatasetKind::CostCenters => 0,
            DatasetKind::Employees => 1,
            DatasetKind::WorkingTime => 2,
        }
    }

    /// Seed for one fake-backed column of this kind
    pub(crate) fn column_seed(&self, seed: u64, column: u64) -> u64 {
        seed.wrapping_add(((self.ordinal() + 1) << 16) + column)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "cost_centers" | "cost_center" | "cc" => Ok(DatasetKind::CostCenters),
            "employees" | "employee" => Ok(DatasetKind::Employees),
            "working_time" | "workingtime" | "wt" => Ok(DatasetKind::WorkingTime),
            _ => Err(format!(
                "Unknown dataset: {}. Valid options: cost_centers, employees, working_time",
                s
            )),
        }
    }
}

/// Shared sizing inputs for all dataset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetParams {
    /// Base row count (cost centers)
    pub num_rows: u64,
    pub seed: u64,
    /// Employee rows per base row
    pub worker_multiplier: u64,
    /// Working time rows per base row
    pub time_multiplier: u64,
}

impl Default for DatasetParams {
    fn default() -> Self {
        Self {
            num_rows: 1000,
            seed: 42,
            worker_multiplier: 50,
            time_multiplier: 1000,
        }
    }
}

/// A named column stream
pub struct Column {
    name: String,
    stream: Box<dyn ColumnStream>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.stream.column_type()
    }

    pub(crate) fn stream_mut(&mut self) -> &mut dyn ColumnStream {
        self.stream.as_mut()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("type", &self.column_type())
            .field("remaining", &self.stream.remaining())
            .finish()
    }
}

/// Columns of one dataset plus its row target and batch size.
///
/// Consumed exactly once by [`DatasetSpec::into_batches`].
#[derive(Debug)]
pub struct DatasetSpec {
    name: String,
    total_rows: u64,
    batch_size: usize,
    columns: Vec<Column>,
}

impl DatasetSpec {
    pub fn new(name: impl Into<String>, total_rows: u64, batch_size: usize) -> Result<Self> {
        if total_rows == 0 {
            return Err(GenerateError::InvalidConfig(
                "row count must be positive".to_string(),
            ));
        }
        if batch_size == 0 {
            return Err(GenerateError::InvalidConfig(
                "batch size must be positive".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            total_rows,
            batch_size,
            columns: Vec::new(),
        })
    }

    /// Build the registered columns of `kind`
    pub fn for_kind(kind: DatasetKind, params: &DatasetParams, batch_size: usize) -> Result<Self> {
        let total_rows = kind.total_rows(params)?;
        let spec = Self::new(kind.name(), total_rows, batch_size)?;
        match kind {
            DatasetKind::CostCenters => cost_centers::register(spec, params.seed),
            DatasetKind::Employees => employees::register(spec, params),
            DatasetKind::WorkingTime => working_time::register(spec, params),
        }
    }

    /// Add an id column (`group + 1`) partitioned by `divisor`
    pub fn with_ids(self, name: &str, divisor: u64) -> Result<Self> {
        self.check_divisor(name, divisor);
        let column = IdColumn::new(self.total_rows, divisor)?;
        Ok(self.with_stream(name, Box::new(column)))
    }

    /// Add a column drawing one value from `source` per group of `divisor` rows
    pub fn with_grouped<S>(self, name: &str, divisor: u64, source: S) -> Result<Self>
    where
        S: ValueSource + 'static,
        S::Item: crate::column::ColumnValue,
    {
        self.check_divisor(name, divisor);
        let column = GroupedColumn::new(self.total_rows, divisor, source)?;
        Ok(self.with_stream(name, Box::new(column)))
    }

    /// Add a pre-built stream. Its row count is not checked here; the batch
    /// assembler rejects a stream that runs out early.
    pub fn with_stream(mut self, name: &str, stream: Box<dyn ColumnStream>) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            stream,
        });
        self
    }

    fn check_divisor(&self, column: &str, divisor: u64) {
        if divisor > 1 && self.total_rows <= divisor {
            warn!(
                dataset = %self.name,
                column,
                rows = self.total_rows,
                divisor,
                "divisor covers all rows, every row gets its own group"
            );
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batch windows: `ceil(total_rows / batch_size)`
    pub fn batch_count(&self) -> u64 {
        self.total_rows.div_ceil(self.batch_size as u64)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn into_batches(self) -> BatchAssembler {
        BatchAssembler::new(self.columns, self.total_rows, self.batch_size)
    }
}
