//! Numeric helpers shared across the workspace.
//!
//! - `reductions`: mean, maximum and log-mean-exp over sample slices, plus
//!   the scalar helpers (`scalar`, `relu`) used by the approximators.

pub mod reductions;

pub use reductions::{log_mean_exp, max_value, mean, relu, scalar};
