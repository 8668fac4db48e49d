//! Error types for the TEM engines.
//!
//! None of these escape a report: resolvers turn them into absent values
//! and the report assembler turns them into section-scoped error strings.

use thiserror::Error;

use dualtem_core::CoreError;
use dualtem_traits::TraitError;

/// Error type for analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A remote value could not be fetched or parsed.
    #[error("data unavailable: {what}: {reason}")]
    DataUnavailable {
        /// What was being fetched.
        what: String,
        /// Underlying failure.
        reason: String,
    },

    /// A formula precondition failed.
    #[error("computation undefined: {0}")]
    ComputationUndefined(String),

    /// Required inputs cannot be determined.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates a data-unavailable error.
    pub fn unavailable(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            what: what.into(),
            reason: reason.into(),
        }
    }
}

impl From<TraitError> for AnalyticsError {
    fn from(err: TraitError) -> Self {
        AnalyticsError::unavailable("source", err.to_string())
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        AnalyticsError::ComputationUndefined(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: AnalyticsError = TraitError::Timeout.into();
        assert_eq!(err.to_string(), "data unavailable: source: timeout");

        let err: AnalyticsError = CoreError::undefined("non-positive price 0").into();
        assert!(matches!(err, AnalyticsError::ComputationUndefined(_)));
    }
}
