//! # Dualtem Core
//!
//! Foundational building blocks for computing the monthly effective rate
//! (TEM) of Argentine dual bonds.
//!
//! - **Types**: [`Date`] with the tolerant parser used for feed payloads
//! - **Business Day Calendars**: weekend-only and Argentine holiday calendars,
//!   plus [`calendars::shift_business_days`]
//! - **Day Count Conventions**: 30E/360 day count and year fraction
//! - **Rates**: pure formulas bridging annual and periodic rates to TEM
//!
//! ## Example
//!
//! ```rust
//! use dualtem_core::prelude::*;
//!
//! let issue = Date::from_ymd(2025, 1, 29).unwrap();
//! let window_start = shift_business_days(issue, -10, false);
//! assert_eq!(window_start, Date::from_ymd(2025, 1, 15).unwrap());
//!
//! let tem = rates::annual_yield_to_monthly_tem(0.3055).unwrap();
//! assert!(tem > 0.022 && tem < 0.023);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        is_business_day, shift_business_days, ArgentinaCalendar, Calendar, HolidayBitmap,
        WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, Thirty360E};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rates;
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
