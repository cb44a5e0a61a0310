//! # hedge_core: Numeric Foundation for Deep Hedging
//!
//! ## Layer 1 (Foundation) Role
//!
//! hedge_core is the bottom layer of the workspace, providing:
//! - Simulated price paths (`types::path`)
//! - Dual number type integration (`types::dual`)
//! - Error taxonomy: `HedgingError`, `PathError` (`types::error`)
//! - Reductions used by the risk measures (`math::reductions`)
//! - The generic `Scalar` bound shared by every crate (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other hedge_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - num-dual: Dual number types and automatic differentiation (optional)
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use hedge_core::math::reductions::{log_mean_exp, mean};
//! use hedge_core::types::PricePath;
//!
//! let paths = PricePath::from_rows(vec![
//!     vec![100.0_f64, 101.0, 99.5],
//!     vec![100.0, 98.0, 97.0],
//! ])
//! .unwrap();
//! assert_eq!(paths.shape(), (2, 3));
//!
//! let terminal = paths.terminal_prices();
//! assert_eq!(mean(&terminal), Some(98.25));
//!
//! // Stable even where a naive exp would overflow
//! let lme = log_mean_exp(&[1000.0_f64, 1000.0]).unwrap();
//! # assert!((lme - 1000.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): Use num-dual for forward-mode automatic differentiation
//! - `serde`: Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
