//! Price path generators.
//!
//! Each generator simulates an `(num_simulations, num_timesteps)` array of
//! prices under a risk-neutral model. Column 0 holds the spot; consecutive
//! columns are `dt = maturity / (num_timesteps - 1)` apart.
//!
//! - [`BlackScholesGenerator`]: geometric Brownian motion, exact log-space step
//! - [`HestonGenerator`]: stochastic variance, full-truncation Euler scheme
//!
//! ## Usage Example
//!
//! ```rust
//! use hedge_models::generators::{BlackScholesGenerator, PathGenerator, SimulationConfig};
//!
//! let generator = BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.2, 1.0).unwrap();
//! let config = SimulationConfig::builder()
//!     .num_simulations(100)
//!     .num_timesteps(11)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! let paths = generator.simulate(&config).unwrap();
//! assert_eq!(paths.shape(), (100, 11));
//! assert!(paths.initial_prices().iter().all(|&s| s == 100.0));
//! ```

pub mod black_scholes;
pub mod config;
pub mod error;
pub mod heston;

pub use black_scholes::BlackScholesGenerator;
pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_SEED, MAX_SIMULATIONS, MAX_TIMESTEPS,
};
pub use error::GeneratorError;
pub use heston::HestonGenerator;

use hedge_core::types::PricePath;

use crate::rng::HedgeRng;

/// Source of simulated price paths.
pub trait PathGenerator {
    /// Short model name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Initial price of every path.
    fn spot(&self) -> f64;

    /// Simulation horizon in years.
    fn maturity(&self) -> f64;

    /// Simulates paths drawing from `rng`.
    ///
    /// # Errors
    ///
    /// - `GeneratorError::InvalidSimulationCount` / `InvalidTimestepCount`
    ///   if `config` is out of range
    /// - `GeneratorError::Path` if the simulated prices overflow
    fn generate(
        &self,
        config: &SimulationConfig,
        rng: &mut HedgeRng,
    ) -> Result<PricePath<f64>, GeneratorError>;

    /// Simulates paths with a generator seeded from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`PathGenerator::generate`].
    fn simulate(&self, config: &SimulationConfig) -> Result<PricePath<f64>, GeneratorError> {
        let mut rng = HedgeRng::from_seed(config.seed());
        self.generate(config, &mut rng)
    }
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), GeneratorError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeneratorError::invalid(name, format!("{} is not finite", value)))
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), GeneratorError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeneratorError::invalid(name, format!("{} must be positive", value)))
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<(), GeneratorError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(GeneratorError::invalid(name, format!("{} must be non-negative", value)))
    }
}
