//! Seeded fake values: company names, person names, flags, month labels and
//! work-time figures.

use crate::format::{format_month_year, format_number};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

/// The RNG-backed provider used for dataset columns.
pub type SeededFake = FakeData<ChaCha8Rng>;

impl FakeData<ChaCha8Rng> {
    /// Create a provider seeded for reproducible output
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    /// Generate a full person name
    pub fn full_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    pub fn company_name(&mut self) -> String {
        CompanyName().fake_with_rng(&mut self.rng)
    }

    /// Generate a 0/1 flag
    pub fn flag(&mut self) -> i64 {
        self.rng.random_range(0..2)
    }

    /// Generate an upper-cased month label (e.g. `MAR19`) between two years, inclusive
    pub fn month_year(&mut self, year_low: i32, year_high: i32) -> Option<String> {
        if year_low > year_high {
            return None;
        }
        let year = self.rng.random_range(year_low..=year_high);
        let month = self.rng.random_range(1..=12);
        format_month_year(year, month)
    }

    /// Generate a digit-grouped number in `low..high` (high exclusive)
    pub fn work_time(&mut self, low: i64, high: i64) -> Option<String> {
        if low >= high {
            return None;
        }
        let value = self.rng.random_range(low..high);
        Some(format_number(value, 3, ","))
    }
}
