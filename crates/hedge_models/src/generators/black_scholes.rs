//! Geometric Brownian motion paths.
//!
//! ```text
//! dS = (r - q) S dt + σ S dW
//! S(t+dt) = S(t) · exp((r - q - σ²/2) dt + σ √dt Z)
//! ```
//!
//! The log-space step is exact, so the marginal law does not depend on the
//! number of timesteps.

use hedge_core::types::PricePath;
use tracing::debug;

use super::{require_finite, require_non_negative, require_positive};
use super::{GeneratorError, PathGenerator, SimulationConfig};
use crate::rng::HedgeRng;

/// Black-Scholes (GBM) path generator.
///
/// # Examples
///
/// ```rust
/// use hedge_models::generators::BlackScholesGenerator;
///
/// assert!(BlackScholesGenerator::new(100.0, 0.05, 0.0, 0.2, 1.0).is_ok());
/// assert!(BlackScholesGenerator::new(-1.0, 0.05, 0.0, 0.2, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholesGenerator {
    spot: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    maturity: f64,
}

impl BlackScholesGenerator {
    /// Creates a GBM generator.
    ///
    /// A zero volatility is allowed and yields deterministic paths.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidParameter` if `spot` or `maturity` is not
    /// positive, `volatility` is negative, or any value is non-finite.
    pub fn new(
        spot: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
        maturity: f64,
    ) -> Result<Self, GeneratorError> {
        require_positive("spot", spot)?;
        require_finite("rate", rate)?;
        require_finite("dividend", dividend)?;
        require_non_negative("volatility", volatility)?;
        require_positive("maturity", maturity)?;

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
            maturity,
        })
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }
}

impl PathGenerator for BlackScholesGenerator {
    fn name(&self) -> &'static str {
        "black-scholes"
    }

    fn spot(&self) -> f64 {
        self.spot
    }

    fn maturity(&self) -> f64 {
        self.maturity
    }

    fn generate(
        &self,
        config: &SimulationConfig,
        rng: &mut HedgeRng,
    ) -> Result<PricePath<f64>, GeneratorError> {
        config.validate()?;

        let n = config.num_simulations();
        let m = config.num_timesteps();
        let dt = config.dt(self.maturity);
        let drift = (self.rate - self.dividend - 0.5 * self.volatility * self.volatility) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();

        debug!(
            model = self.name(),
            num_simulations = n,
            num_timesteps = m,
            seed = rng.seed(),
            dt,
            "generating paths"
        );

        let mut values = vec![0.0; n * m];
        let mut shocks = vec![0.0; m - 1];
        for row in values.chunks_exact_mut(m) {
            rng.fill_normal(&mut shocks);

            let mut log_s = self.spot.ln();
            row[0] = self.spot;
            for (price, z) in row[1..].iter_mut().zip(&shocks) {
                log_s += drift + vol_sqrt_dt * z;
                *price = log_s.exp();
            }
        }

        Ok(PricePath::new(values, n, m)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(n: usize, m: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .num_simulations(n)
            .num_timesteps(m)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_shape_and_initial_column() {
        let generator = BlackScholesGenerator::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
        let paths = generator.simulate(&config(50, 13, 1)).unwrap();
        assert_eq!(paths.shape(), (50, 13));
        assert!(paths.initial_prices().iter().all(|&s| s == 100.0));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let generator = BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.3, 1.0).unwrap();
        let a = generator.simulate(&config(20, 5, 9)).unwrap();
        let b = generator.simulate(&config(20, 5, 9)).unwrap();
        let c = generator.simulate(&config(20, 5, 10)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let generator = BlackScholesGenerator::new(100.0, 0.05, 0.01, 0.0, 2.0).unwrap();
        let paths = generator.simulate(&config(3, 5, 0)).unwrap();
        for &s in &paths.terminal_prices() {
            assert_relative_eq!(s, 100.0 * (0.04_f64 * 2.0).exp(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_martingale_under_discounting() {
        // E[S_T] = S_0 · e^((r - q)T)
        let generator = BlackScholesGenerator::new(100.0, 0.03, 0.01, 0.2, 1.0).unwrap();
        let paths = generator.simulate(&config(40_000, 5, 2024)).unwrap();
        let terminal = paths.terminal_prices();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        let expected = 100.0 * 0.02_f64.exp();
        assert!(
            (mean - expected).abs() < 0.5,
            "mean {} vs expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(BlackScholesGenerator::new(100.0, 0.0, 0.0, -0.1, 1.0).is_err());
        assert!(BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.2, 0.0).is_err());
        assert!(BlackScholesGenerator::new(100.0, f64::NAN, 0.0, 0.2, 1.0).is_err());
    }

    #[test]
    fn test_minimum_timesteps() {
        let generator = BlackScholesGenerator::new(100.0, 0.0, 0.0, 0.2, 1.0).unwrap();
        let mut rng = HedgeRng::from_seed(0);
        let paths = generator.generate(&config(4, 2, 0), &mut rng).unwrap();
        assert_eq!(paths.shape(), (4, 2));
        assert_eq!(paths.increments(0).len(), 4);
    }
}
