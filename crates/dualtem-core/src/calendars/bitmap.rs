//! Bitmap-based holiday set for O(1) lookups.
//!
//! A [`HolidayBitmap`] stores one bit per calendar day between [`MIN_YEAR`]
//! and [`MAX_YEAR`]. Dates outside that range are never holidays, so a
//! calendar asked about a far-away year silently degrades to weekends-only.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

use super::Calendar;
use crate::types::Date;

/// Minimum year supported by the bitmap.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the bitmap.
pub const MAX_YEAR: i32 = 2100;

/// Total number of years in the supported range.
const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;

/// Maximum days per year (leap year).
const MAX_DAYS_PER_YEAR: usize = 366;

/// Total bits needed for the entire date range.
const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;

/// Number of u64 words needed to store all bits.
const WORD_COUNT: usize = TOTAL_BITS.div_ceil(64);

/// Holiday set with Saturday/Sunday weekends.
///
/// - `is_holiday()`: O(1)
/// - `is_business_day()`: O(1)
/// - Memory usage: ~6KB
#[derive(Clone)]
pub struct HolidayBitmap {
    name: &'static str,
    /// One bit per day, 1 = holiday.
    bits: Box<[u64; WORD_COUNT]>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("name", &self.name)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Create a new empty holiday bitmap.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: Box::new([0u64; WORD_COUNT]),
        }
    }

    /// Create a holiday bitmap from a set of holiday dates.
    pub fn from_holidays(name: &'static str, holidays: &HashSet<NaiveDate>) -> Self {
        let mut bitmap = Self::new(name);
        for &date in holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }

    /// Add a holiday to the bitmap. Out-of-range dates are ignored.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Check if a date is a holiday (excluding weekends).
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            (self.bits[word_idx] & (1u64 << bit_idx)) != 0
        } else {
            false
        }
    }

    /// Check if a [`Date`] is listed as a holiday.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.is_holiday(date.as_naive_date())
    }

    /// Count total holidays in the bitmap.
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Convert a date to bitmap indices.
    ///
    /// Returns (word_index, bit_index) or None if date is out of range.
    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        let year_offset = (year - MIN_YEAR) as usize;
        let day_of_year = date.ordinal0() as usize;

        let bit_position = year_offset * MAX_DAYS_PER_YEAR + day_of_year;
        Some((bit_position / 64, bit_position % 64))
    }
}

impl Calendar for HolidayBitmap {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        super::is_business_day(date, Some(self))
    }
}

/// Builder for holiday bitmaps generated from yearly rules.
pub struct HolidayCalendarBuilder {
    name: &'static str,
    holidays: HashSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl HolidayCalendarBuilder {
    /// Create a new builder covering the full supported range.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            holidays: HashSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Set the year range for generating holidays.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add holidays from an iterator. Dates outside the year range are kept
    /// as long as the bitmap can store them.
    pub fn add_holidays<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.holidays.extend(dates);
        self
    }

    /// Add a fixed holiday (same date every year, no weekend observation).
    pub fn add_fixed_holiday(mut self, month: u32, day: u32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Add a movable holiday: Tuesday/Wednesday moves to the previous Monday,
    /// Thursday/Friday to the next Monday, other days stay put.
    pub fn add_movable_holiday(mut self, month: u32, day: u32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(moved_to_monday(date));
            }
        }
        self
    }

    /// Add Easter-based holiday (offset from Easter Sunday).
    pub fn add_easter_holiday(mut self, offset_days: i32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(easter) = easter_sunday(year) {
                if let Some(date) =
                    easter.checked_add_signed(chrono::Duration::days(offset_days as i64))
                {
                    self.holidays.insert(date);
                }
            }
        }
        self
    }

    /// Build the holiday bitmap.
    pub fn build(self) -> HolidayBitmap {
        HolidayBitmap::from_holidays(self.name, &self.holidays)
    }
}

/// Applies the Monday-transfer rule for movable holidays.
pub fn moved_to_monday(date: NaiveDate) -> NaiveDate {
    let shift = match date.weekday() {
        Weekday::Tue => -1,
        Weekday::Wed => -2,
        Weekday::Thu => 4,
        Weekday::Fri => 3,
        _ => 0,
    };
    date.checked_add_signed(chrono::Duration::days(shift))
        .unwrap_or(date)
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bitmap_basic() {
        let mut bitmap = HolidayBitmap::new("Test");
        let date = ymd(2025, 1, 1);
        assert!(!bitmap.is_holiday(date));

        bitmap.add_holiday(date);
        assert!(bitmap.is_holiday(date));
        assert_eq!(bitmap.count_holidays(), 1);
    }

    #[test]
    fn test_out_of_range_is_never_holiday() {
        let mut bitmap = HolidayBitmap::new("Test");
        let ancient = ymd(1900, 1, 1);
        bitmap.add_holiday(ancient);
        assert!(!bitmap.is_holiday(ancient));
        assert_eq!(bitmap.count_holidays(), 0);
    }

    #[test]
    fn test_weekend_check() {
        let bitmap = HolidayBitmap::new("Test");
        assert!(!bitmap.is_business_day(Date::from(ymd(2025, 1, 4))));
        assert!(!bitmap.is_business_day(Date::from(ymd(2025, 1, 5))));
        assert!(bitmap.is_business_day(Date::from(ymd(2025, 1, 6))));
    }

    #[test]
    fn test_easter() {
        assert_eq!(easter_sunday(2025).unwrap(), ymd(2025, 4, 20));
        assert_eq!(easter_sunday(2024).unwrap(), ymd(2024, 3, 31));
        assert_eq!(easter_sunday(2026).unwrap(), ymd(2026, 4, 5));
    }

    #[test]
    fn test_moved_to_monday() {
        // Tuesday 2025-06-17 -> Monday 2025-06-16
        assert_eq!(moved_to_monday(ymd(2025, 6, 17)), ymd(2025, 6, 16));
        // Thursday 2025-11-20 -> Monday 2025-11-24
        assert_eq!(moved_to_monday(ymd(2025, 11, 20)), ymd(2025, 11, 24));
        // Monday and Sunday stay
        assert_eq!(moved_to_monday(ymd(2026, 8, 17)), ymd(2026, 8, 17));
        assert_eq!(moved_to_monday(ymd(2025, 8, 17)), ymd(2025, 8, 17));
    }

    #[test]
    fn test_builder() {
        let calendar = HolidayCalendarBuilder::new("Test")
            .year_range(2025, 2025)
            .add_fixed_holiday(1, 1)
            .add_easter_holiday(-2)
            .build();

        assert!(calendar.is_holiday(ymd(2025, 1, 1)));
        assert!(calendar.is_holiday(ymd(2025, 4, 18)));
        assert!(!calendar.is_holiday(ymd(2026, 1, 1)));
    }
}
