//! CLI error types.

use thiserror::Error;

use dualtem_traits::TraitError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid rate or amount.
    #[error("Invalid {name}: {value}. {hint}")]
    InvalidNumber {
        /// Argument name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Accepted range.
        hint: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data source could not be set up.
    #[error("Source error: {0}")]
    Source(#[from] TraitError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
