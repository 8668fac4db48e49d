//! Day count conventions.
//!
//! Dual bond prospectuses count the accrual exponent on a 30E/360 basis,
//! and the market engine uses the same basis for the bullet-yield horizon.
//!
//! # Usage
//!
//! ```rust
//! use dualtem_core::daycounts::{DayCount, Thirty360E};
//! use dualtem_core::types::Date;
//!
//! let dc = Thirty360E;
//! let start = Date::from_ymd(2025, 1, 29).unwrap();
//! let end = Date::from_ymd(2025, 2, 28).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 29);
//! ```

mod thirty360;

pub use thirty360::Thirty360E;

use crate::types::Date;
use rust_decimal::Decimal;

/// Trait for day count conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}
