//! Core data and error types.
//!
//! This module provides:
//! - `path`: Simulated price paths, shape (num_simulations, num_timesteps)
//! - `dual`: Dual number type integration with num-dual for automatic differentiation (when `num-dual-mode` feature is enabled)
//! - `error`: Structured error types for path construction and the umbrella `HedgingError`
//!
//! # Re-exports
//!
//! - [`PricePath`] from `path`
//! - [`HedgingError`], [`PathError`] from `error`

#[cfg(feature = "num-dual-mode")]
pub mod dual;
pub mod error;
pub mod path;

pub use error::{HedgingError, PathError};
pub use path::PricePath;
