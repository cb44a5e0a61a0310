//! Error types for function approximators.

use hedge_core::types::HedgingError;
use thiserror::Error;

/// Approximator construction and evaluation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Weight or bias buffer does not match the declared layer shape.
    #[error("Layer shape mismatch: expected {expected} {what}, got {got}")]
    LayerShape {
        /// Which buffer ("weights" or "biases")
        what: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// Consecutive layers do not chain.
    #[error("Layer {layer} expects {expected} inputs but the previous layer produces {got}")]
    LayerChain {
        /// Index of the offending layer
        layer: usize,
        /// Its input width
        expected: usize,
        /// Output width of the previous layer
        got: usize,
    },

    /// Input vector width differs from the approximator's input width.
    #[error("Input size mismatch: expected {expected}, got {got}")]
    InputSize {
        /// Input width of the approximator
        expected: usize,
        /// Supplied width
        got: usize,
    },

    /// Flat parameter vector of the wrong length.
    #[error("Parameter count mismatch: expected {expected}, got {got}")]
    ParameterCount {
        /// Number of parameters of the approximator
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// A layer or approximator with a zero-width dimension, or no layers.
    #[error("Empty network: {0}")]
    Empty(String),
}

impl From<NetworkError> for HedgingError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Empty(_) => HedgingError::InvalidInput(err.to_string()),
            _ => HedgingError::DimensionMismatch(err.to_string()),
        }
    }
}
