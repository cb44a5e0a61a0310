//! Error types for risk measures.

use hedge_core::types::HedgingError;
use thiserror::Error;

/// Risk measure configuration and evaluation errors.
///
/// # Examples
/// ```
/// use hedge_risk::RiskError;
///
/// let err = RiskError::InvalidConfidence { alpha: 1.0 };
/// assert!(err.to_string().contains("alpha"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskError {
    /// CVaR confidence level outside the open interval (0, 1).
    #[error("Invalid confidence level: alpha = {alpha} (must lie in (0, 1))")]
    InvalidConfidence {
        /// The rejected level
        alpha: f64,
    },

    /// Entropy risk aversion not strictly positive.
    #[error("Invalid risk aversion: lambda = {lambda} (must be positive and finite)")]
    InvalidRiskAversion {
        /// The rejected coefficient
        lambda: f64,
    },

    /// The auxiliary variable `w` is NaN or infinite.
    #[error("Invalid auxiliary variable: w = {w} (must be finite)")]
    InvalidAuxiliary {
        /// The rejected value
        w: f64,
    },

    /// A risk measure was evaluated on an empty sample.
    #[error("Risk measure evaluated on an empty sample")]
    EmptySample,
}

impl From<RiskError> for HedgingError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::EmptySample => HedgingError::DimensionMismatch(err.to_string()),
            _ => HedgingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            RiskError::InvalidRiskAversion { lambda: -1.0 }.to_string(),
            "Invalid risk aversion: lambda = -1 (must be positive and finite)"
        );
        assert_eq!(
            RiskError::EmptySample.to_string(),
            "Risk measure evaluated on an empty sample"
        );
    }

    #[test]
    fn test_to_hedging_error() {
        let err: HedgingError = RiskError::EmptySample.into();
        assert!(matches!(err, HedgingError::DimensionMismatch(_)));

        let err: HedgingError = RiskError::InvalidConfidence { alpha: 0.0 }.into();
        assert!(matches!(err, HedgingError::InvalidInput(_)));
    }
}
