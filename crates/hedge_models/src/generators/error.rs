//! Error types for path generation.

use hedge_core::types::{HedgingError, PathError};
use thiserror::Error;

/// Path generation errors.
///
/// Configuration errors are raised before any random number is drawn.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeneratorError {
    /// Simulation count outside `[1, MAX_SIMULATIONS]`.
    #[error("Invalid simulation count {0}: must be in range [1, 10_000_000]")]
    InvalidSimulationCount(usize),

    /// Timestep count outside `[2, MAX_TIMESTEPS]`.
    #[error("Invalid timestep count {0}: must be in range [2, 10_000]")]
    InvalidTimestepCount(usize),

    /// Model parameter outside its domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The simulated prices did not form a valid path array (e.g. overflow).
    #[error("Simulated paths rejected: {0}")]
    Path(#[from] PathError),
}

impl GeneratorError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<GeneratorError> for HedgingError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Path(e) => e.into(),
            GeneratorError::InvalidSimulationCount(_) | GeneratorError::InvalidTimestepCount(_) => {
                HedgingError::DimensionMismatch(err.to_string())
            }
            GeneratorError::InvalidParameter { .. } => HedgingError::InvalidInput(err.to_string()),
        }
    }
}
