//! Business day calendars.
//!
//! This module provides:
//! - The [`Calendar`] trait with business-day stepping
//! - [`WeekendCalendar`] (no holidays) and [`ArgentinaCalendar`]
//! - [`is_business_day`] and [`shift_business_days`], the entry points used
//!   to build observation windows

mod argentina;
mod bitmap;

pub use argentina::ArgentinaCalendar;
pub use bitmap::{
    easter_sunday, moved_to_monday, HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR,
};

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Moves a date by a number of business days.
    ///
    /// Steps one calendar day at a time in the direction of `days`, counting
    /// only steps that land on a business day. Zero returns the date as is,
    /// even when it is not itself a business day.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        is_business_day(date, None)
    }
}

/// Business-day predicate over an optional holiday set.
///
/// Weekends are never business days. Without a holiday set the calendar is
/// weekends-only.
pub fn is_business_day(date: Date, holidays: Option<&HolidayBitmap>) -> bool {
    if date.is_weekend() {
        return false;
    }
    !holidays.is_some_and(|set| set.contains(date))
}

/// Shifts `date` by `offset` business days.
///
/// With `use_holidays` the Argentine calendar spanning the date's year minus
/// one through plus three is used; otherwise weekends only.
///
/// # Example
///
/// ```rust
/// use dualtem_core::calendars::shift_business_days;
/// use dualtem_core::types::Date;
///
/// let maturity = Date::from_ymd(2026, 3, 16).unwrap();
/// let end = shift_business_days(maturity, -10, false);
/// assert_eq!(end, Date::from_ymd(2026, 3, 2).unwrap());
/// ```
pub fn shift_business_days(date: Date, offset: i32, use_holidays: bool) -> Date {
    if offset == 0 {
        return date;
    }
    if use_holidays {
        ArgentinaCalendar::around(date.year()).add_business_days(date, offset)
    } else {
        WeekendCalendar.add_business_days(date, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(date(2025, 1, 6)));
        assert!(!cal.is_business_day(date(2025, 1, 4)));
        assert!(!cal.is_business_day(date(2025, 1, 5)));
    }

    #[test]
    fn test_is_business_day_with_holidays() {
        let mut set = HolidayBitmap::new("Test");
        set.add_holiday(date(2025, 1, 6).as_naive_date());

        assert!(!is_business_day(date(2025, 1, 6), Some(&set)));
        assert!(is_business_day(date(2025, 1, 6), None));
        assert!(is_business_day(date(2025, 1, 7), Some(&set)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        // Friday + 1 business day = Monday
        assert_eq!(cal.add_business_days(date(2025, 1, 3), 1), date(2025, 1, 6));
        // Monday - 1 business day = Friday
        assert_eq!(cal.add_business_days(date(2025, 1, 6), -1), date(2025, 1, 3));
    }

    #[test]
    fn test_shift_zero_is_identity_on_weekend() {
        let saturday = date(2025, 1, 4);
        assert_eq!(shift_business_days(saturday, 0, true), saturday);
        assert_eq!(shift_business_days(saturday, 0, false), saturday);
    }

    #[test]
    fn test_shift_issue_window_weekends_only() {
        // 2025-01-29 (Wed) minus 10 business days = 2025-01-15 (Wed)
        assert_eq!(
            shift_business_days(date(2025, 1, 29), -10, false),
            date(2025, 1, 15)
        );
    }

    #[test]
    fn test_shift_skips_argentine_holidays() {
        // 2026-03-16 (Mon) back 10 business days. Weekends only lands on
        // 2026-03-02; none of the dates in between are holidays.
        assert_eq!(
            shift_business_days(date(2026, 3, 16), -10, true),
            date(2026, 3, 2)
        );
        // 2025-03-10 (Mon) back 10 business days crosses Carnival (3-4 March)
        assert_eq!(
            shift_business_days(date(2025, 3, 10), -10, false),
            date(2025, 2, 24)
        );
        assert_eq!(
            shift_business_days(date(2025, 3, 10), -10, true),
            date(2025, 2, 20)
        );
    }

    #[test]
    fn test_next_previous_business_day() {
        let cal = WeekendCalendar;
        let saturday = date(2025, 1, 4);
        assert_eq!(cal.next_business_day(saturday), date(2025, 1, 6));
        assert_eq!(cal.previous_business_day(saturday), date(2025, 1, 3));
    }
}
