//! Value sources feeding group-aligned columns.
//!
//! A [`ValueSource`] is a stateful, zero-argument producer. It is not assumed
//! to be pure: every call may advance an RNG or a cursor, so a column asks
//! for a new value only when its partition group changes.
//!
//! The built-in datasets draw from [`FakeSource`] and [`FlagSource`].
//! [`Counter`], [`Enumerate`] and [`from_fn`] are general-purpose sources for
//! columns wired by hand through `DatasetSpec::with_grouped`.

use fake_values::SeededFake;

use crate::error::SourceError;

pub trait ValueSource {
    type Item;

    /// Produce the next value, or fail with [`SourceError::Exhausted`] when a
    /// finite source has nothing left.
    fn next_value(&mut self) -> Result<Self::Item, SourceError>;
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    type Item = S::Item;

    fn next_value(&mut self) -> Result<Self::Item, SourceError> {
        (**self).next_value()
    }
}

/// Sequential integer counter: `start`, `start + 1`, ...
#[derive(Debug, Clone)]
pub struct Counter {
    next: Option<i64>,
}

impl Counter {
    pub fn new(start: i64) -> Self {
        Self { next: Some(start) }
    }
}

impl ValueSource for Counter {
    type Item = i64;

    fn next_value(&mut self) -> Result<i64, SourceError> {
        let current = self
            .next
            .ok_or_else(|| SourceError::Failed("counter overflow".to_string()))?;
        self.next = current.checked_add(1);
        Ok(current)
    }
}

/// Finite enumerator over a fixed list of values.
#[derive(Debug, Clone)]
pub struct Enumerate<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> Enumerate<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl<T> ValueSource for Enumerate<T> {
    type Item = T;

    fn next_value(&mut self) -> Result<T, SourceError> {
        self.values.next().ok_or(SourceError::Exhausted)
    }
}

/// Adapter turning a closure into a source.
pub struct FromFn<F> {
    f: F,
}

/// Wrap a fallible closure as a [`ValueSource`].
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Result<T, SourceError>,
{
    FromFn { f }
}

impl<T, F> ValueSource for FromFn<F>
where
    F: FnMut() -> Result<T, SourceError>,
{
    type Item = T;

    fn next_value(&mut self) -> Result<T, SourceError> {
        (self.f)()
    }
}

/// Which fake value a [`FakeSource`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeKind {
    CompanyName,
    PersonName,
    /// Upper-cased `%b%y` label between two years, inclusive
    MonthYear { low: i32, high: i32 },
    /// Digit-grouped number in `low..high`
    WorkTime { low: i64, high: i64 },
}

/// Text values drawn from a seeded fake provider.
pub struct FakeSource {
    fake: SeededFake,
    kind: FakeKind,
}

impl FakeSource {
    pub fn new(kind: FakeKind, seed: u64) -> Self {
        Self {
            fake: SeededFake::from_seed(seed),
            kind,
        }
    }
}

impl ValueSource for FakeSource {
    type Item = String;

    fn next_value(&mut self) -> Result<String, SourceError> {
        match self.kind {
            FakeKind::CompanyName => Ok(self.fake.company_name()),
            FakeKind::PersonName => Ok(self.fake.full_name()),
            FakeKind::MonthYear { low, high } => self
                .fake
                .month_year(low, high)
                .ok_or_else(|| SourceError::Failed(format!("empty year range {}..={}", low, high))),
            FakeKind::WorkTime { low, high } => self
                .fake
                .work_time(low, high)
                .ok_or_else(|| SourceError::Failed(format!("empty value range {}..{}", low, high))),
        }
    }
}

/// Random 0/1 flags.
pub struct FlagSource {
    fake: SeededFake,
}

impl FlagSource {
    pub fn new(seed: u64) -> Self {
        Self {
            fake: SeededFake::from_seed(seed),
        }
    }
}

impl ValueSource for FlagSource {
    type Item = i64;

    fn next_value(&mut self) -> Result<i64, SourceError> {
        Ok(self.fake.flag())
    }
}
