//! CLI command implementations.

pub mod bonds;
pub mod config;
pub mod report;

pub use report::ReportArgs;

use std::path::PathBuf;
use std::sync::Arc;

use dualtem_core::Date;
use dualtem_ext_http::HttpJsonSource;
use dualtem_ext_json::FileJsonSource;
use dualtem_traits::JsonSource;
use tracing::info;

use crate::cli::OutputFormat;
use crate::config::DualtemConfig;
use crate::error::{CliError, CliResult};

/// State shared by all commands.
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Effective configuration.
    pub config: DualtemConfig,
    /// Captured payload directory, when running offline.
    pub offline_dir: Option<PathBuf>,
}

impl Context {
    /// JSON source: captured files when offline, otherwise HTTP.
    pub fn source(&self) -> CliResult<Arc<dyn JsonSource>> {
        match &self.offline_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "offline mode");
                Ok(Arc::new(FileJsonSource::new(dir)?))
            }
            None => Ok(Arc::new(HttpJsonSource::new(&self.config.http_settings())?)),
        }
    }
}

/// Parses a date. Accepts `YYYY-MM-DD` and the other formats seen in feeds.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse_any(s).ok_or_else(|| CliError::InvalidDate(s.to_string()))
}

/// Validates a monthly or annual rate given as a decimal.
pub fn parse_rate(s: &str) -> CliResult<f64> {
    let value = parse_number(s)?;
    if !(-1.0..=10.0).contains(&value) {
        return Err(CliError::InvalidNumber {
            name: "rate",
            value,
            hint: "Use a decimal, e.g. 0.3055 for 30.55%.",
        });
    }
    Ok(value)
}

/// Validates a strictly positive amount (price, face).
pub fn parse_amount(s: &str) -> CliResult<f64> {
    let value = parse_number(s)?;
    if value <= 0.0 {
        return Err(CliError::InvalidNumber {
            name: "amount",
            value,
            hint: "Must be positive.",
        });
    }
    Ok(value)
}

fn parse_number(s: &str) -> CliResult<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::Config(format!("not a number: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-29").unwrap(), Date::from_ymd(2025, 1, 29).unwrap());
        assert_eq!(parse_date("16/03/2026").unwrap(), Date::from_ymd(2026, 3, 16).unwrap());
        assert!(matches!(parse_date("2025-13-01"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_rate_and_amount() {
        assert_eq!(parse_rate("0.3055").unwrap(), 0.3055);
        assert!(parse_rate("30.55").is_err());
        assert!(parse_rate("abc").is_err());
        assert_eq!(parse_amount("101.5").unwrap(), 101.5);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("NaN").is_err());
    }
}
