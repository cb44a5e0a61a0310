//! # hedge_risk: Risk Measures for Hedging Objectives
//!
//! Convex risk measures applied to a sample of terminal hedging outcomes
//! (`premium + hedging P&L - payoff`, one value per simulated path). Larger
//! values mean more risk; the optimiser minimises them.
//!
//! - [`Cvar`]: Conditional Value-at-Risk in its Rockafellar-Uryasev form,
//!   `ρ(x; w) = w + mean(max(-x - w, 0)) / (1 - α)`
//! - [`Entropy`]: Exponential utility indifference measure,
//!   `ρ(x) = (1/λ) ln(mean(exp(-λx)))`, evaluated with log-sum-exp
//!   stabilisation
//! - [`RiskMeasure`] and [`RiskObjective`]: the selected measure together
//!   with the auxiliary variable `w` the optimiser trains alongside the
//!   strategy
//!
//! Every measure is generic over `T: Scalar`, so it evaluates on `f64`
//! samples and on dual-number samples carrying derivatives.
//!
//! ## Example
//!
//! ```rust
//! use hedge_risk::{Cvar, Entropy};
//!
//! let cvar = Cvar::new(0.9).unwrap();
//! let losses = cvar.evaluate(&[-1.0_f64, -2.0, -3.0], 0.0).unwrap();
//! let shifted = cvar.evaluate(&[0.0_f64, -1.0, -2.0], 0.0).unwrap();
//! assert!(shifted < losses);
//!
//! let entropy = Entropy::new(1.0).unwrap();
//! assert!(entropy.evaluate(&[1e4_f64, -1e4]).unwrap().is_finite());
//! ```

#![deny(missing_docs)]

pub mod cvar;
pub mod entropy;
pub mod error;
pub mod measure;

pub use cvar::Cvar;
pub use entropy::Entropy;
pub use error::RiskError;
pub use measure::{RiskMeasure, RiskObjective};
