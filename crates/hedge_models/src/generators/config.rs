//! Simulation configuration.

use super::error::GeneratorError;

/// Maximum number of simulated paths.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Maximum number of price observations per path.
pub const MAX_TIMESTEPS: usize = 10_000;

/// Default seed when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Size and seed of a path simulation.
///
/// `num_timesteps` counts price observations including `t = 0`, so a path
/// has `num_timesteps - 1` increments and `dt = maturity / (num_timesteps - 1)`.
///
/// # Examples
///
/// ```rust
/// use hedge_models::generators::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .num_simulations(10_000)
///     .num_timesteps(31)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.num_steps(), 30);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SimulationConfigBuilder"))]
pub struct SimulationConfig {
    num_simulations: usize,
    num_timesteps: usize,
    seed: u64,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of simulated paths.
    #[inline]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Number of price observations per path.
    #[inline]
    pub fn num_timesteps(&self) -> usize {
        self.num_timesteps
    }

    /// Number of hedging steps, `num_timesteps - 1`.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_timesteps - 1
    }

    /// Seed of the random number generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Time between observations for a horizon of `maturity` years.
    #[inline]
    pub fn dt(&self, maturity: f64) -> f64 {
        maturity / self.num_steps() as f64
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidSimulationCount` if `num_simulations` is 0 or above [`MAX_SIMULATIONS`]
    /// - `InvalidTimestepCount` if `num_timesteps` is below 2 or above [`MAX_TIMESTEPS`]
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            return Err(GeneratorError::InvalidSimulationCount(self.num_simulations));
        }
        if self.num_timesteps < 2 || self.num_timesteps > MAX_TIMESTEPS {
            return Err(GeneratorError::InvalidTimestepCount(self.num_timesteps));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// With the `serde` feature it is also the wire form of a configuration:
/// missing fields take the builder defaults and the result is validated.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfigBuilder {
    num_simulations: usize,
    num_timesteps: usize,
    seed: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<SimulationConfigBuilder> for SimulationConfig {
    type Error = GeneratorError;

    fn try_from(builder: SimulationConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            num_timesteps: 31,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the number of simulated paths.
    #[inline]
    pub fn num_simulations(mut self, n: usize) -> Self {
        self.num_simulations = n;
        self
    }

    /// Sets the number of price observations per path.
    #[inline]
    pub fn num_timesteps(mut self, m: usize) -> Self {
        self.num_timesteps = m;
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, GeneratorError> {
        let config = SimulationConfig {
            num_simulations: self.num_simulations,
            num_timesteps: self.num_timesteps,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
