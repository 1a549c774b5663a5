//! Fake value providers for data-sandbox.
//!
//! Produces deterministic company names, person names, flags, month/year
//! labels and digit-grouped numbers from a seeded RNG.
//!
//! # Example
//!
//! ```rust
//! use fake_values::{format_number, FakeData};
//!
//! let mut fake = FakeData::from_seed(42);
//! let company = fake.company_name();
//! assert!(!company.is_empty());
//!
//! assert_eq!(format_number(1_234_567, 3, ","), "1,234,567");
//! ```

pub mod fake;
pub mod format;

pub use fake::{FakeData, SeededFake};
pub use format::{format_month_year, format_number};
