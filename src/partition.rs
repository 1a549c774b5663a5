//! Row-to-group partitioning.
//!
//! [`DividedCount`] splits `total` rows into runs of `size` rows that share a
//! group index, plus one trailing partial group for the remainder. Iterating it
//! yields one group index per row, so a column driven by it changes value only
//! at group boundaries.

use crate::error::{GenerateError, Result};

/// Deterministic assignment of `total` rows to groups of `size` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividedCount {
    size: u64,
    groups: u64,
    remainder: u64,
}

impl DividedCount {
    /// Partition `total` rows using `divisor` as the group size.
    ///
    /// When `total <= divisor` every row becomes its own group.
    pub fn new(total: u64, divisor: u64) -> Result<Self> {
        if total < 1 || divisor < 1 {
            return Err(GenerateError::InvalidArgument { total, divisor });
        }

        if total <= divisor {
            return Ok(Self {
                size: 1,
                groups: total,
                remainder: 0,
            });
        }

        Ok(Self {
            size: divisor,
            groups: total / divisor,
            remainder: total % divisor,
        })
    }

    /// Rows per full group
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of full groups
    pub fn groups(&self) -> u64 {
        self.groups
    }

    /// Rows in the trailing partial group
    pub fn remainder(&self) -> u64 {
        self.remainder
    }

    /// Total number of rows covered by the partition
    pub fn total(&self) -> u64 {
        self.size * self.groups + self.remainder
    }

    /// Number of distinct group indices the iterator yields
    pub fn len(&self) -> u64 {
        self.groups + u64::from(self.remainder > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-row group indices, starting at zero
    pub fn iter(&self) -> GroupIndices {
        GroupIndices {
            partition: *self,
            emitted: 0,
        }
    }
}

impl IntoIterator for DividedCount {
    type Item = u64;
    type IntoIter = GroupIndices;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DividedCount {
    type Item = u64;
    type IntoIter = GroupIndices;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the group index of each row of a [`DividedCount`].
#[derive(Debug, Clone)]
pub struct GroupIndices {
    partition: DividedCount,
    emitted: u64,
}

impl GroupIndices {
    /// Rows not yet yielded
    pub fn remaining(&self) -> u64 {
        self.partition.total() - self.emitted
    }
}

impl Iterator for GroupIndices {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.emitted >= self.partition.total() {
            return None;
        }

        let full_rows = self.partition.size * self.partition.groups;
        let index = if self.emitted < full_rows {
            self.emitted / self.partition.size
        } else {
            self.partition.groups
        };

        self.emitted += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for GroupIndices {}
