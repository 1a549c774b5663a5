//! Column streams: single-pass producers of one column's values in row order.

use std::fmt;

use serde::Serialize;

use crate::error::{GenerateError, Result};
use crate::partition::{DividedCount, GroupIndices};
use crate::source::ValueSource;
use crate::stream::{try_take, GroupAligned};

/// Physical type of a generated column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int64,
    Utf8,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int64 => write!(f, "int64"),
            ColumnType::Utf8 => write!(f, "utf8"),
        }
    }
}

/// A run of values for one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int64(Vec<i64>),
    Utf8(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValues::Int64(_) => ColumnType::Int64,
            ColumnValues::Utf8(_) => ColumnType::Utf8,
        }
    }

    pub fn as_int64(&self) -> Option<&[i64]> {
        match self {
            ColumnValues::Int64(v) => Some(v),
            ColumnValues::Utf8(_) => None,
        }
    }

    pub fn as_utf8(&self) -> Option<&[String]> {
        match self {
            ColumnValues::Utf8(v) => Some(v),
            ColumnValues::Int64(_) => None,
        }
    }
}

/// Scalar types a column can hold
pub trait ColumnValue: Clone {
    const TYPE: ColumnType;

    fn into_values(values: Vec<Self>) -> ColumnValues;
}

impl ColumnValue for i64 {
    const TYPE: ColumnType = ColumnType::Int64;

    fn into_values(values: Vec<Self>) -> ColumnValues {
        ColumnValues::Int64(values)
    }
}

impl ColumnValue for String {
    const TYPE: ColumnType = ColumnType::Utf8;

    fn into_values(values: Vec<Self>) -> ColumnValues {
        ColumnValues::Utf8(values)
    }
}

/// A stateful, single-pass producer of one column.
pub trait ColumnStream {
    fn column_type(&self) -> ColumnType;

    /// Pull up to `n` values. Fewer than `n` means the column is exhausted.
    fn next_values(&mut self, n: usize) -> Result<ColumnValues>;

    /// Rows the column can still produce
    fn remaining(&self) -> u64;
}

/// Numeric ids taken straight from the partition: `group index + 1`.
#[derive(Debug, Clone)]
pub struct IdColumn {
    indices: GroupIndices,
}

impl IdColumn {
    /// Fails with [`GenerateError::InvalidConfig`] when ids would not fit in an `i64`
    pub fn new(total: u64, divisor: u64) -> Result<Self> {
        let partition = DividedCount::new(total, divisor)?;
        if i64::try_from(partition.len()).is_err() {
            return Err(GenerateError::InvalidConfig(format!(
                "{} ids do not fit in a 64-bit signed column",
                partition.len()
            )));
        }
        Ok(Self {
            indices: partition.iter(),
        })
    }
}

impl ColumnStream for IdColumn {
    fn column_type(&self) -> ColumnType {
        ColumnType::Int64
    }

    fn next_values(&mut self, n: usize) -> Result<ColumnValues> {
        let mut ids = (&mut self.indices).map(|group| {
            i64::try_from(group + 1).map_err(|_| {
                GenerateError::InvalidConfig(format!("id {} overflows int64", group + 1))
            })
        });
        Ok(ColumnValues::Int64(try_take(&mut ids, n)?.into_items()))
    }

    fn remaining(&self) -> u64 {
        self.indices.remaining()
    }
}

/// Values from a [`ValueSource`], one per partition group.
pub struct GroupedColumn<S: ValueSource> {
    stream: GroupAligned<S>,
}

impl<S> GroupedColumn<S>
where
    S: ValueSource,
    S::Item: ColumnValue,
{
    pub fn new(total: u64, divisor: u64, source: S) -> Result<Self> {
        let partition = DividedCount::new(total, divisor)?;
        Ok(Self {
            stream: GroupAligned::new(partition, source),
        })
    }
}

impl<S> ColumnStream for GroupedColumn<S>
where
    S: ValueSource,
    S::Item: ColumnValue,
{
    fn column_type(&self) -> ColumnType {
        S::Item::TYPE
    }

    fn next_values(&mut self, n: usize) -> Result<ColumnValues> {
        let chunk = try_take(&mut self.stream, n)?;
        Ok(S::Item::into_values(chunk.into_items()))
    }

    fn remaining(&self) -> u64 {
        self.stream.remaining()
    }
}
