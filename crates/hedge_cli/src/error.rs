//! CLI error types

use hedge_core::types::HedgingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error raised by the hedging libraries
    #[error("Hedging error: {0}")]
    Hedging(#[from] HedgingError),

    /// Report serialisation failed
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Lifts any library error into [`CliError::Hedging`].
pub(crate) fn hedging<E: Into<HedgingError>>(err: E) -> CliError {
    CliError::Hedging(err.into())
}
