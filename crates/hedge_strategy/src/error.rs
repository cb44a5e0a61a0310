//! Error types for hedging strategies and objectives.

use hedge_core::types::{HedgingError, PathError};
use hedge_models::analytical::AnalyticalError;
use hedge_risk::RiskError;
use thiserror::Error;

use crate::network::NetworkError;

/// Errors raised by strategies and the hedging objective.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StrategyError {
    /// Paths with fewer than two observations have no increment to hedge.
    #[error("Too few timesteps: {0} (need at least 2)")]
    TooFewTimesteps(usize),

    /// Shape disagreement between a strategy and its input.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid strategy hyper-parameter.
    #[error("Invalid strategy configuration: {0}")]
    InvalidConfiguration(String),

    /// The loss evaluated to NaN or infinity.
    #[error("Non-finite loss: {0}")]
    NonFiniteLoss(f64),

    /// Approximator error.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Black-Scholes parameter error.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Risk measure error.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Price path error.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl From<StrategyError> for HedgingError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Network(e) => e.into(),
            StrategyError::Analytical(e) => e.into(),
            StrategyError::Risk(e) => e.into(),
            StrategyError::Path(e) => e.into(),
            StrategyError::NonFiniteLoss(_) => HedgingError::NumericalInstability(err.to_string()),
            StrategyError::InvalidConfiguration(_) => HedgingError::InvalidInput(err.to_string()),
            StrategyError::TooFewTimesteps(_) | StrategyError::DimensionMismatch(_) => {
                HedgingError::DimensionMismatch(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StrategyError::TooFewTimesteps(1).to_string(),
            "Too few timesteps: 1 (need at least 2)"
        );
        // transparent variants forward their source message
        let err: StrategyError = RiskError::EmptySample.into();
        assert_eq!(err.to_string(), "Risk measure evaluated on an empty sample");
    }

    #[test]
    fn test_to_hedging_error() {
        let err: HedgingError = StrategyError::NonFiniteLoss(f64::NAN).into();
        assert!(matches!(err, HedgingError::NumericalInstability(_)));

        let err: HedgingError = StrategyError::TooFewTimesteps(1).into();
        assert!(matches!(err, HedgingError::DimensionMismatch(_)));

        let err: HedgingError =
            StrategyError::from(AnalyticalError::InvalidStrike { strike: 0.0 }).into();
        assert!(matches!(err, HedgingError::InvalidInput(_)));
    }
}
