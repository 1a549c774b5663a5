//! Group-aligned value streams and bounded chunk reads.

use crate::error::{GenerateError, Result};
use crate::partition::{DividedCount, GroupIndices};
use crate::source::ValueSource;

/// Lazy per-row stream that asks its source for a new value only when the
/// partition group changes.
///
/// A failure on the very first call is returned as [`GenerateError::Source`]
/// with the cause unwrapped, while a failure when starting any later group is
/// wrapped in [`GenerateError::GeneratorFailure`]. The stream yields nothing
/// after an error.
pub struct GroupAligned<S: ValueSource> {
    indices: GroupIndices,
    source: S,
    current: Option<(u64, S::Item)>,
    failed: bool,
}

impl<S> GroupAligned<S>
where
    S: ValueSource,
    S::Item: Clone,
{
    pub fn new(partition: DividedCount, source: S) -> Self {
        Self {
            indices: partition.iter(),
            source,
            current: None,
            failed: false,
        }
    }

    /// Rows not yet yielded
    pub fn remaining(&self) -> u64 {
        if self.failed {
            0
        } else {
            self.indices.remaining()
        }
    }
}

impl<S> Iterator for GroupAligned<S>
where
    S: ValueSource,
    S::Item: Clone,
{
    type Item = Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let index = self.indices.next()?;

        let cached = match &self.current {
            Some((group, value)) if *group == index => Some(value.clone()),
            _ => None,
        };
        if let Some(value) = cached {
            return Some(Ok(value));
        }

        let first = self.current.is_none();
        match self.source.next_value() {
            Ok(value) => {
                self.current = Some((index, value.clone()));
                Some(Ok(value))
            }
            Err(cause) => {
                self.failed = true;
                if first {
                    Some(Err(GenerateError::Source(cause)))
                } else {
                    Some(Err(GenerateError::GeneratorFailure {
                        group: index,
                        source: cause,
                    }))
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining()).ok())
    }
}

/// Result of a bounded read: up to `n` items and whether the source ran dry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<T> {
    pub items: Vec<T>,
    /// Set when the source ended before `n` items were collected
    pub exhausted: bool,
}

impl<T> Chunk<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

fn capacity_for(hint: (usize, Option<usize>), n: usize) -> usize {
    hint.1.map_or(n, |upper| upper.min(n))
}

/// Pull up to `n` items from `iter`. A short source yields a short chunk.
pub fn take<I: Iterator>(iter: &mut I, n: usize) -> Chunk<I::Item> {
    let mut items = Vec::with_capacity(capacity_for(iter.size_hint(), n));
    while items.len() < n {
        match iter.next() {
            Some(item) => items.push(item),
            None => {
                return Chunk {
                    items,
                    exhausted: true,
                }
            }
        }
    }
    Chunk {
        items,
        exhausted: false,
    }
}

/// Like [`take`] for fallible iterators; stops at the first error.
pub fn try_take<T, E, I>(iter: &mut I, n: usize) -> std::result::Result<Chunk<T>, E>
where
    I: Iterator<Item = std::result::Result<T, E>>,
{
    let mut items = Vec::with_capacity(capacity_for(iter.size_hint(), n));
    while items.len() < n {
        match iter.next() {
            Some(item) => items.push(item?),
            None => {
                return Ok(Chunk {
                    items,
                    exhausted: true,
                })
            }
        }
    }
    Ok(Chunk {
        items,
        exhausted: false,
    })
}
