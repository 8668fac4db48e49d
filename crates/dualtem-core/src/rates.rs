//! Rate conversions to the monthly effective rate (TEM).
//!
//! All rates are decimals (`0.30` for 30%). Functions are pure and work in
//! `f64`; the day count helpers convert from the exact `Decimal` year
//! fraction at the boundary.
//!
//! # Example
//!
//! ```rust
//! use dualtem_core::rates;
//! use approx::assert_relative_eq;
//!
//! let tem = rates::annual_yield_to_monthly_tem(0.3055).unwrap();
//! assert_relative_eq!((1.0 + tem).powi(12), 1.3055, epsilon = 1e-12);
//! assert_eq!(rates::format_percentage(tem), "2.25%");
//! ```

use rust_decimal::prelude::ToPrimitive;

use crate::daycounts::{DayCount, Thirty360E};
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Compounding periods per year of the reference rate, quoted over a
/// 32-day deposit tenor.
pub const REFERENCE_PERIODS_PER_YEAR: f64 = 365.0 / 32.0;

/// Lowest implied yield fed into the monthly conversion. Keeps `1 + y`
/// strictly positive.
pub const IMPLIED_YIELD_FLOOR: f64 = -0.9999;

/// Converts a reference rate (annual nominal, 32-day tenor) into TEM.
///
/// `((1 + r / (365/32))^(365/32))^(1/12) - 1`
///
/// # Errors
///
/// Returns `CoreError::Undefined` when `1 + r / (365/32) <= 0` or the rate
/// is not finite.
pub fn reference_rate_to_monthly_tem(rate: f64) -> CoreResult<f64> {
    let n = REFERENCE_PERIODS_PER_YEAR;
    let base = 1.0 + rate / n;
    if !base.is_finite() || base <= 0.0 {
        return Err(CoreError::undefined(format!(
            "reference rate {rate} has no periodic equivalent"
        )));
    }
    finite(base.powf(n).powf(1.0 / 12.0) - 1.0)
}

/// Converts an annual effective yield into TEM: `(1 + y)^(1/12) - 1`.
///
/// # Errors
///
/// Returns `CoreError::Undefined` when `1 + y <= 0` or the yield is not
/// finite.
pub fn annual_yield_to_monthly_tem(annual_yield: f64) -> CoreResult<f64> {
    let base = 1.0 + annual_yield;
    if !base.is_finite() || base <= 0.0 {
        return Err(CoreError::undefined(format!(
            "annual yield {annual_yield} is at or below -100%"
        )));
    }
    finite(base.powf(1.0 / 12.0) - 1.0)
}

fn finite(value: f64) -> CoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::undefined(format!("non-finite rate {value}")))
    }
}

/// Annual yield implied by a single terminal payment of `face` bought at
/// `price`, over `year_fraction` years.
///
/// # Errors
///
/// Returns `CoreError::Undefined` when `year_fraction <= 0`, `price <= 0`
/// or `face <= 0`.
pub fn implied_annual_yield_from_bullet_price(
    face: f64,
    price: f64,
    year_fraction: f64,
) -> CoreResult<f64> {
    if year_fraction <= 0.0 {
        return Err(CoreError::undefined(format!(
            "non-positive year fraction {year_fraction}"
        )));
    }
    if price <= 0.0 {
        return Err(CoreError::undefined(format!("non-positive price {price}")));
    }
    if face <= 0.0 {
        return Err(CoreError::undefined(format!("non-positive face {face}")));
    }
    finite((face / price).powf(1.0 / year_fraction) - 1.0)
}

/// Applies [`IMPLIED_YIELD_FLOOR`].
#[must_use]
pub fn clamp_implied_yield(implied_yield: f64) -> f64 {
    implied_yield.max(IMPLIED_YIELD_FLOOR)
}

/// 30E/360 year fraction as `f64`.
#[must_use]
pub fn year_fraction_30e360(start: Date, end: Date) -> f64 {
    Thirty360E
        .year_fraction(start, end)
        .to_f64()
        .unwrap_or_default()
}

/// 30E/360 year fraction times twelve.
#[must_use]
pub fn months_fraction_30e360(start: Date, end: Date) -> f64 {
    Thirty360E
        .months_fraction(start, end)
        .to_f64()
        .unwrap_or_default()
}

/// TEM as a percentage rounded to two decimals.
#[must_use]
pub fn percentage(tem: f64) -> f64 {
    (tem * 100.0 * 100.0).round() / 100.0
}

/// TEM rendered as `"2.25%"`.
#[must_use]
pub fn format_percentage(tem: f64) -> String {
    format!("{:.2}%", percentage(tem))
}
