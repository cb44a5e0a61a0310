//! Closed-form pricing for European call options.
//!
//! - Black-Scholes model with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Vega)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Scalar`**: Supports both `f64` and `Dual64` for AD
//! - **Fail fast**: Invalid contract parameters are rejected at construction
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy in the tails

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholesCallOption;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
