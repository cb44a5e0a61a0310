//! Error types for analytical pricing operations.

use hedge_core::types::HedgingError;
use thiserror::Error;

/// Invalid Black-Scholes contract parameters.
///
/// Raised at construction so that no formula is ever evaluated on inputs
/// that would yield NaN or infinity.
///
/// # Examples
/// ```
/// use hedge_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive spot price.
    #[error("Invalid spot price: S = {spot} (must be positive)")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Non-positive strike.
    #[error("Invalid strike: K = {strike} (must be positive)")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-positive time to maturity.
    #[error("Invalid maturity: T = {maturity} (must be positive)")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Non-positive volatility.
    #[error("Invalid volatility: σ = {volatility} (must be positive)")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// NaN or infinite parameter.
    #[error("Non-finite parameter {name} = {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },
}

impl From<AnalyticalError> for HedgingError {
    fn from(err: AnalyticalError) -> Self {
        HedgingError::InvalidInput(err.to_string())
    }
}
