//! Error types for structured error handling.
//!
//! This module provides:
//! - `HedgingError`: Umbrella error every layer converts into
//! - `PathError`: Errors from price path construction

use std::fmt;
use thiserror::Error;

/// Categorised errors across the hedging workspace.
///
/// Mirrors the three failure classes of the system: configuration errors
/// (invalid constructor arguments), shape errors (dimension mismatches) and
/// numerical failures that could not be mitigated.
///
/// # Variants
/// - `InvalidInput`: Invalid parameters (non-positive volatility, `alpha >= 1`, ...)
/// - `DimensionMismatch`: Array or approximator shape does not match
/// - `NumericalInstability`: Computation produced a non-finite result
///
/// # Examples
/// ```
/// use hedge_core::types::HedgingError;
///
/// let err = HedgingError::InvalidInput("Negative strike".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative strike");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HedgingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Array or approximator dimensions do not match
    DimensionMismatch(String),

    /// Numerical instability during computation
    NumericalInstability(String),
}

impl fmt::Display for HedgingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HedgingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            HedgingError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            HedgingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
        }
    }
}

impl std::error::Error for HedgingError {}

/// Price path construction errors.
///
/// # Variants
/// - `EmptyDimension`: Zero simulations or zero timesteps
/// - `ShapeOverflow`: `num_simulations * num_timesteps` overflows `usize`
/// - `LengthMismatch`: Buffer length differs from `num_simulations * num_timesteps`
/// - `RaggedRows`: Rows of unequal length passed to `PricePath::from_rows`
/// - `NonPositivePrice`: A price is zero, negative or non-finite
///
/// # Examples
/// ```
/// use hedge_core::types::PathError;
///
/// let err = PathError::LengthMismatch { expected: 6, got: 5 };
/// assert!(format!("{}", err).contains("expected 6"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathError {
    /// Zero simulations or zero timesteps.
    #[error("Empty path dimension: {num_simulations} simulations x {num_timesteps} timesteps")]
    EmptyDimension {
        /// Number of simulations requested
        num_simulations: usize,
        /// Number of timesteps requested
        num_timesteps: usize,
    },

    /// The element count does not fit in `usize`.
    #[error("Path shape overflows: {num_simulations} simulations x {num_timesteps} timesteps")]
    ShapeOverflow {
        /// Number of simulations requested
        num_simulations: usize,
        /// Number of timesteps requested
        num_timesteps: usize,
    },

    /// Buffer length differs from the declared shape.
    #[error("Path buffer length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// `num_simulations * num_timesteps`
        expected: usize,
        /// Actual buffer length
        got: usize,
    },

    /// Rows of unequal length.
    #[error("Row {row} has {got} prices, expected {expected}")]
    RaggedRows {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        got: usize,
    },

    /// A price is zero, negative or non-finite.
    #[error("Invalid price {value} at simulation {simulation}, timestep {timestep}: prices must be positive and finite")]
    NonPositivePrice {
        /// Simulation index
        simulation: usize,
        /// Timestep index
        timestep: usize,
        /// The offending value
        value: f64,
    },
}

impl From<PathError> for HedgingError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NonPositivePrice { .. } => HedgingError::InvalidInput(err.to_string()),
            _ => HedgingError::DimensionMismatch(err.to_string()),
        }
    }
}
