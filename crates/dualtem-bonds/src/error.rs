//! Error types for bond reference data.

use thiserror::Error;

use dualtem_core::Date;

/// A specialized Result type for bond reference data.
pub type BondResult<T> = Result<T, BondError>;

/// Errors raised when defining bond reference data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// The ticker is empty or blank.
    #[error("Empty ticker")]
    EmptyTicker,

    /// Maturity does not fall after issue.
    #[error("Maturity {maturity} is not after issue {issue}")]
    InvalidSchedule {
        /// Issue date.
        issue: Date,
        /// Maturity date.
        maturity: Date,
    },
}
