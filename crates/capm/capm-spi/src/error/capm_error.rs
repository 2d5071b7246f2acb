//! CAPM estimation error types.

use thiserror::Error;

/// CAPM estimation errors.
///
/// Every failure is surfaced to the caller. No stage substitutes a
/// placeholder beta or expected return.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapmError {
    /// Too few observations to estimate anything.
    #[error("Insufficient data for {series}: required {required}, got {got}")]
    InsufficientData {
        series: String,
        required: usize,
        got: usize,
    },

    /// Benchmark returns do not vary, so beta is undefined.
    #[error("Degenerate benchmark variance: {variance:e}")]
    DegenerateVariance { variance: f64 },

    /// Asset and benchmark share no period after resampling.
    #[error(
        "Misaligned series: asset has {asset_periods} periods, benchmark has {benchmark_periods}, none shared"
    )]
    MisalignedSeries {
        asset_periods: usize,
        benchmark_periods: usize,
    },

    /// Price series violates its ordering or value invariants.
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A price source could not supply the requested series.
    #[error("Price source error: {0}")]
    SourceError(String),
}

impl CapmError {
    pub fn insufficient(series: impl Into<String>, required: usize, got: usize) -> Self {
        Self::InsufficientData {
            series: series.into(),
            required,
            got,
        }
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for CAPM operations.
pub type Result<T> = std::result::Result<T, CapmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let error = CapmError::insufficient("benchmark", 2, 1);
        assert_eq!(
            error.to_string(),
            "Insufficient data for benchmark: required 2, got 1"
        );
    }

    #[test]
    fn test_degenerate_variance_message() {
        let error = CapmError::DegenerateVariance { variance: 0.0 };
        assert!(error.to_string().starts_with("Degenerate benchmark variance"));
    }

    #[test]
    fn test_misaligned_series_message() {
        let error = CapmError::MisalignedSeries {
            asset_periods: 6,
            benchmark_periods: 4,
        };
        assert_eq!(
            error.to_string(),
            "Misaligned series: asset has 6 periods, benchmark has 4, none shared"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let error = CapmError::invalid_parameter("risk_free_rate", "must be finite");
        assert_eq!(
            error.to_string(),
            "Invalid parameter: risk_free_rate - must be finite"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(CapmError::SourceError("symbol not found".to_string()));
        assert_eq!(error.to_string(), "Price source error: symbol not found");
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<f64> = Err(CapmError::DegenerateVariance { variance: 0.0 });
        assert!(matches!(
            result.unwrap_err(),
            CapmError::DegenerateVariance { .. }
        ));
    }
}
