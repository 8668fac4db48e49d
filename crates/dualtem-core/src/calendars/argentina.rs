//! Argentine national holiday calendar.
//!
//! Generated by rule for a bounded span of years:
//!
//! - Fixed: New Year, Memory Day (Mar 24), Malvinas (Apr 2), Labour Day,
//!   May Revolution, Belgrano (Jun 20), Independence (Jul 9),
//!   Immaculate Conception (Dec 8), Christmas
//! - Easter-relative: Carnival Monday/Tuesday, Maundy Thursday, Good Friday
//! - Movable (Law 27.399): Güemes (Jun 17), San Martín (Aug 17),
//!   Cultural Diversity (Oct 12), National Sovereignty (Nov 20)
//! - Tourism bridge days published by decree

use chrono::NaiveDate;

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder};
use super::Calendar;
use crate::types::Date;

/// Bridge days decreed for tourism purposes, by year.
const BRIDGE_DAYS: &[(i32, u32, u32)] = &[
    (2024, 4, 1),
    (2024, 6, 21),
    (2024, 10, 11),
    (2025, 5, 2),
    (2025, 8, 15),
    (2025, 11, 21),
    (2026, 3, 23),
    (2026, 7, 10),
    (2026, 12, 7),
];

/// Argentine national calendar over an explicit year span.
#[derive(Debug, Clone)]
pub struct ArgentinaCalendar {
    bitmap: HolidayBitmap,
    start_year: i32,
    end_year: i32,
}

impl ArgentinaCalendar {
    /// Builds the calendar for `start_year..=end_year`.
    pub fn for_years(start_year: i32, end_year: i32) -> Self {
        let bridges = BRIDGE_DAYS
            .iter()
            .filter(|(y, _, _)| (start_year..=end_year).contains(y))
            .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));

        let bitmap = HolidayCalendarBuilder::new("Argentina")
            .year_range(start_year, end_year)
            .add_fixed_holiday(1, 1)
            .add_fixed_holiday(3, 24)
            .add_fixed_holiday(4, 2)
            .add_fixed_holiday(5, 1)
            .add_fixed_holiday(5, 25)
            .add_fixed_holiday(6, 20)
            .add_fixed_holiday(7, 9)
            .add_fixed_holiday(12, 8)
            .add_fixed_holiday(12, 25)
            .add_easter_holiday(-48)
            .add_easter_holiday(-47)
            .add_easter_holiday(-3)
            .add_easter_holiday(-2)
            .add_movable_holiday(6, 17)
            .add_movable_holiday(8, 17)
            .add_movable_holiday(10, 12)
            .add_movable_holiday(11, 20)
            .add_holidays(bridges)
            .build();

        Self {
            bitmap,
            start_year,
            end_year,
        }
    }

    /// Builds the calendar used when shifting from `year`: one year back
    /// through three years ahead, so cross-year shifts stay covered.
    pub fn around(year: i32) -> Self {
        Self::for_years(year - 1, year + 3)
    }

    /// The underlying holiday set.
    pub fn holidays(&self) -> &HolidayBitmap {
        &self.bitmap
    }

    /// First and last year with generated holidays.
    pub fn year_span(&self) -> (i32, i32) {
        (self.start_year, self.end_year)
    }
}

impl Calendar for ArgentinaCalendar {
    fn name(&self) -> &'static str {
        "Argentina"
    }

    fn is_business_day(&self, date: Date) -> bool {
        super::is_business_day(date, Some(&self.bitmap))
    }
}
