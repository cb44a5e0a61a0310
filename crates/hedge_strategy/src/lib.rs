//! # hedge_strategy: Hedging Strategies and Objectives
//!
//! ## Layer 3 Role
//!
//! - `network`: dense layers and ReLU multi-layer perceptrons, generic over
//!   `T: Scalar`
//! - `strategy`: the [`strategy::HedgingStrategy`] trait with the P&L
//!   accumulation loop, the neural [`strategy::FeedForwardHedgingStrategy`]
//!   and the Black-Scholes [`strategy::DeltaHedgingStrategy`] benchmark
//! - `objective`: risk of the hedged short call and its forward-mode
//!   gradient for an external optimiser
//!
//! No optimiser is included: callers read [`objective::ObjectiveGradient`],
//! compute an update and write it back with
//! `FeedForwardHedgingStrategy::set_parameters` and `RiskObjective::set_w`.
//!
//! ## Example
//!
//! ```rust
//! use hedge_models::generators::{BlackScholesGenerator, PathGenerator, SimulationConfig};
//! use hedge_models::rng::HedgeRng;
//! use hedge_risk::{RiskMeasure, RiskObjective};
//! use hedge_strategy::objective::HedgingObjective;
//! use hedge_strategy::strategy::{FeedForwardHedgingStrategy, HedgingStrategy};
//!
//! let config = SimulationConfig::builder()
//!     .num_simulations(64)
//!     .num_timesteps(5)
//!     .seed(3)
//!     .build()
//!     .unwrap();
//! let paths = BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.2, 1.0)
//!     .unwrap()
//!     .simulate(&config)
//!     .unwrap();
//!
//! let mut rng = HedgeRng::from_seed(config.seed());
//! let strategy = FeedForwardHedgingStrategy::new(4, config.num_steps(), &mut rng).unwrap();
//! let output = strategy.forward(&paths).unwrap();
//! assert_eq!(output.hedge.shape(), (64, 4));
//!
//! let risk = RiskObjective::new(RiskMeasure::entropy(1.0).unwrap(), 0.0).unwrap();
//! let objective = HedgingObjective::new(100.0, 8.0, risk).unwrap();
//! let gradient = objective.gradient(&strategy, &paths).unwrap();
//! assert_eq!(gradient.parameters.len(), strategy.num_parameters());
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): forward-mode gradients via num-dual

pub mod error;
pub mod network;
pub mod objective;
pub mod strategy;

pub use error::StrategyError;
