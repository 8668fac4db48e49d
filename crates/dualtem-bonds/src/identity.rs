//! Dual bond identity.

use serde::{Deserialize, Serialize};

use dualtem_core::Date;

use crate::error::{BondError, BondResult};

/// Immutable description of a dual bond.
///
/// Rates are decimals: `fixed_monthly_tem` is the contractual monthly floor
/// and `reference_annual_yield` the annual effective yield quoted at launch,
/// known only for catalogued bonds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondIdentity {
    ticker: String,
    issue_date: Date,
    maturity_date: Date,
    fixed_monthly_tem: f64,
    reference_annual_yield: Option<f64>,
}

impl BondIdentity {
    /// Creates a bond identity. The ticker is upper-cased.
    ///
    /// # Errors
    ///
    /// Fails on a blank ticker or when maturity is not after issue.
    pub fn new(
        ticker: impl Into<String>,
        issue_date: Date,
        maturity_date: Date,
        fixed_monthly_tem: f64,
    ) -> BondResult<Self> {
        let ticker = ticker.into().trim().to_uppercase();
        if ticker.is_empty() {
            return Err(BondError::EmptyTicker);
        }
        validate_schedule(issue_date, maturity_date)?;
        Ok(Self {
            ticker,
            issue_date,
            maturity_date,
            fixed_monthly_tem,
            reference_annual_yield: None,
        })
    }

    /// Sets the reference annual yield.
    #[must_use]
    pub fn with_reference_annual_yield(mut self, annual_yield: f64) -> Self {
        self.reference_annual_yield = Some(annual_yield);
        self
    }

    /// Upper-case ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Issue date.
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Contractual fixed monthly rate.
    pub fn fixed_monthly_tem(&self) -> f64 {
        self.fixed_monthly_tem
    }

    /// Reference annual effective yield, if known.
    pub fn reference_annual_yield(&self) -> Option<f64> {
        self.reference_annual_yield
    }

    /// Returns a copy with dates and fixed TEM replaced where given.
    ///
    /// # Errors
    ///
    /// Fails when the resulting maturity is not after issue.
    pub fn with_overrides(
        &self,
        issue_date: Option<Date>,
        maturity_date: Option<Date>,
        fixed_monthly_tem: Option<f64>,
    ) -> BondResult<Self> {
        let issue_date = issue_date.unwrap_or(self.issue_date);
        let maturity_date = maturity_date.unwrap_or(self.maturity_date);
        validate_schedule(issue_date, maturity_date)?;
        Ok(Self {
            ticker: self.ticker.clone(),
            issue_date,
            maturity_date,
            fixed_monthly_tem: fixed_monthly_tem.unwrap_or(self.fixed_monthly_tem),
            reference_annual_yield: self.reference_annual_yield,
        })
    }
}

fn validate_schedule(issue: Date, maturity: Date) -> BondResult<()> {
    if maturity <= issue {
        return Err(BondError::InvalidSchedule { issue, maturity });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_new_uppercases() {
        let bond = BondIdentity::new(" ttx27 ", date(2025, 1, 1), date(2027, 1, 1), 0.02).unwrap();
        assert_eq!(bond.ticker(), "TTX27");
        assert_eq!(bond.reference_annual_yield(), None);
    }

    #[test]
    fn test_invalid_schedule() {
        let err = BondIdentity::new("X", date(2026, 1, 1), date(2025, 1, 1), 0.02).unwrap_err();
        assert!(matches!(err, BondError::InvalidSchedule { .. }));
        assert_eq!(
            BondIdentity::new("  ", date(2025, 1, 1), date(2026, 1, 1), 0.02),
            Err(BondError::EmptyTicker)
        );
    }

    #[test]
    fn test_with_overrides() {
        let bond = BondIdentity::new("X", date(2025, 1, 1), date(2026, 1, 1), 0.02)
            .unwrap()
            .with_reference_annual_yield(0.3);
        let patched = bond
            .with_overrides(None, Some(date(2026, 6, 1)), Some(0.025))
            .unwrap();
        assert_eq!(patched.issue_date(), date(2025, 1, 1));
        assert_eq!(patched.maturity_date(), date(2026, 6, 1));
        assert_eq!(patched.fixed_monthly_tem(), 0.025);
        assert_eq!(patched.reference_annual_yield(), Some(0.3));

        assert!(bond.with_overrides(Some(date(2026, 2, 1)), None, None).is_err());
    }
}
