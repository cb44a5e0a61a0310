//! # hedge_models: Pricing Formulas and Path Simulation
//!
//! ## Layer 2 Role
//!
//! - `analytical`: Black-Scholes call option (price, delta, gamma, vega) and
//!   AD-compatible normal distribution functions
//! - `instruments`: European call terminal payoff
//! - `rng`: Seeded random number generator
//! - `generators`: Price path generators (Black-Scholes/GBM, Heston) behind
//!   the [`generators::PathGenerator`] trait
//!
//! Pricing code is generic over `T: Scalar`, so a Black-Scholes price built
//! from dual numbers carries its own sensitivities.
//!
//! ## Example
//!
//! ```rust
//! use hedge_models::analytical::BlackScholesCallOption;
//! use hedge_models::instruments::european_call_payoff;
//!
//! let option = BlackScholesCallOption::new(100.0_f64, 100.0, 0.05, 0.0, 1.0, 0.2).unwrap();
//! assert!((option.price() - 10.4506).abs() < 1e-3);
//!
//! let payoff = european_call_payoff(&[150.0_f64, 80.0], 100.0);
//! assert_eq!(payoff, vec![50.0, 0.0]);
//! ```

pub mod analytical;
pub mod generators;
pub mod instruments;
pub mod rng;
