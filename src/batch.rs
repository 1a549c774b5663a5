//! Lock-step batch assembly over a dataset's column streams.

use tracing::debug;

use crate::column::ColumnValues;
use crate::dataset::Column;
use crate::error::{GenerateError, Result};

/// One window of rows across every column, in column insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    index: usize,
    columns: Vec<(String, ColumnValues)>,
}

impl Batch {
    pub fn new(index: usize, columns: Vec<(String, ColumnValues)>) -> Self {
        Self { index, columns }
    }

    /// Zero-based position of this batch in the dataset
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[(String, ColumnValues)] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnValues> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values)
    }

    pub fn into_columns(self) -> Vec<(String, ColumnValues)> {
        self.columns
    }
}

/// Pull-based producer of [`Batch`]es.
///
/// Each call to `next` pulls `min(batch_size, rows_left)` values from every
/// column. A column that comes up short fails the assembly with
/// [`GenerateError::PrematureExhaustion`]; nothing is yielded afterwards.
pub struct BatchAssembler {
    columns: Vec<Column>,
    total_rows: u64,
    batch_size: usize,
    produced: u64,
    next_index: usize,
    failed: bool,
}

impl BatchAssembler {
    pub fn new(columns: Vec<Column>, total_rows: u64, batch_size: usize) -> Self {
        Self {
            columns,
            total_rows,
            batch_size,
            produced: 0,
            next_index: 0,
            failed: false,
        }
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Rows emitted so far
    pub fn rows_produced(&self) -> u64 {
        self.produced
    }

    /// Windows left to emit
    pub fn batches_remaining(&self) -> u64 {
        if self.failed || self.batch_size == 0 {
            return 0;
        }
        (self.total_rows - self.produced).div_ceil(self.batch_size as u64)
    }

    fn assemble(&mut self, expected: usize) -> Result<Batch> {
        let index = self.next_index;
        let mut columns = Vec::with_capacity(self.columns.len());

        for column in &mut self.columns {
            let values = column.stream_mut().next_values(expected)?;
            if values.len() < expected {
                return Err(GenerateError::PrematureExhaustion {
                    column: column.name().to_string(),
                    batch: index,
                    expected,
                    produced: values.len(),
                });
            }
            columns.push((column.name().to_string(), values));
        }

        debug!(batch = index, rows = expected, "assembled batch");
        Ok(Batch::new(index, columns))
    }
}

impl Iterator for BatchAssembler {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.batch_size == 0 || self.produced >= self.total_rows {
            return None;
        }

        let left = self.total_rows - self.produced;
        let expected = usize::try_from(left).map_or(self.batch_size, |n| n.min(self.batch_size));

        match self.assemble(expected) {
            Ok(batch) => {
                self.produced += expected as u64;
                self.next_index += 1;
                Some(Ok(batch))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.batches_remaining()) {
            Ok(n) => (0, Some(n)),
            Err(_) => (0, None),
        }
    }
}

impl std::iter::FusedIterator for BatchAssembler {}
