//! Heston stochastic volatility paths.
//!
//! ```text
//! dS = (r - q) S dt + √v S dW₁
//! dv = κ(θ - v) dt + ξ √v dW₂,   d⟨W₁, W₂⟩ = ρ dt
//! ```
//!
//! Discretised with full truncation: the variance may go negative between
//! steps, but only `v⁺ = max(v, 0)` enters the drift and diffusion terms.
//! The price is stepped in log space.

use hedge_core::types::PricePath;
use tracing::{debug, warn};

use super::{require_finite, require_non_negative, require_positive};
use super::{GeneratorError, PathGenerator, SimulationConfig};
use crate::rng::HedgeRng;

/// Heston model parameters.
///
/// # Examples
///
/// ```rust
/// use hedge_models::generators::heston::HestonParams;
///
/// let params = HestonParams::default();
/// assert!(params.satisfies_feller());
/// ```
///
/// Deserialised parameters are not validated; [`HestonGenerator::new`] is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HestonParams {
    /// Initial spot price (S₀)
    pub spot: f64,
    /// Risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend yield (q)
    pub dividend: f64,
    /// Horizon in years (T)
    pub maturity: f64,
    /// Initial variance (v₀)
    pub v0: f64,
    /// Long-run variance (θ)
    pub theta: f64,
    /// Mean-reversion speed (κ)
    pub kappa: f64,
    /// Volatility of variance (ξ)
    pub xi: f64,
    /// Spot/variance correlation (ρ)
    pub rho: f64,
}

impl Default for HestonParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.0,
            dividend: 0.0,
            maturity: 1.0,
            v0: 0.04,
            theta: 0.04,
            kappa: 1.5,
            xi: 0.3,
            rho: -0.7,
        }
    }
}

impl HestonParams {
    /// Checks the parameter domain.
    ///
    /// # Errors
    ///
    /// `GeneratorError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        require_positive("spot", self.spot)?;
        require_finite("rate", self.rate)?;
        require_finite("dividend", self.dividend)?;
        require_positive("maturity", self.maturity)?;
        require_non_negative("v0", self.v0)?;
        require_non_negative("theta", self.theta)?;
        require_non_negative("kappa", self.kappa)?;
        require_non_negative("xi", self.xi)?;
        require_finite("rho", self.rho)?;
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(GeneratorError::invalid(
                "rho",
                format!("{} must lie in [-1, 1]", self.rho),
            ));
        }
        Ok(())
    }

    /// Feller condition, 2κθ > ξ².
    #[inline]
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.xi * self.xi
    }
}

/// Heston path generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonGenerator {
    params: HestonParams,
}

impl HestonGenerator {
    /// Creates a Heston generator from validated parameters.
    ///
    /// A violated Feller condition is logged, not rejected; full truncation
    /// keeps the simulated variance usable.
    ///
    /// # Errors
    ///
    /// See [`HestonParams::validate`].
    pub fn new(params: HestonParams) -> Result<Self, GeneratorError> {
        params.validate()?;
        if !params.satisfies_feller() {
            warn!(
                kappa = params.kappa,
                theta = params.theta,
                xi = params.xi,
                "Feller condition violated; variance can reach zero"
            );
        }
        Ok(Self { params })
    }

    /// Returns the model parameters.
    #[inline]
    pub fn params(&self) -> &HestonParams {
        &self.params
    }
}

impl PathGenerator for HestonGenerator {
    fn name(&self) -> &'static str {
        "heston"
    }

    fn spot(&self) -> f64 {
        self.params.spot
    }

    fn maturity(&self) -> f64 {
        self.params.maturity
    }

    fn generate(
        &self,
        config: &SimulationConfig,
        rng: &mut HedgeRng,
    ) -> Result<PricePath<f64>, GeneratorError> {
        config.validate()?;

        let p = &self.params;
        let n = config.num_simulations();
        let m = config.num_timesteps();
        let dt = config.dt(p.maturity);
        let sqrt_dt = dt.sqrt();
        let rho_perp = (1.0 - p.rho * p.rho).sqrt();

        debug!(
            model = self.name(),
            num_simulations = n,
            num_timesteps = m,
            seed = rng.seed(),
            dt,
            "generating paths"
        );

        let mut values = vec![0.0; n * m];
        for row in values.chunks_exact_mut(m) {
            let mut log_s = p.spot.ln();
            let mut v = p.v0;
            row[0] = p.spot;

            for price in row[1..].iter_mut() {
                let z1 = rng.gen_normal();
                let z2 = rng.gen_normal();
                let v_pos = v.max(0.0);
                let sqrt_v = v_pos.sqrt();

                log_s += (p.rate - p.dividend - 0.5 * v_pos) * dt + sqrt_v * sqrt_dt * z1;
                v += p.kappa * (p.theta - v_pos) * dt
                    + p.xi * sqrt_v * sqrt_dt * (p.rho * z1 + rho_perp * z2);

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

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_partial_params() {
        let params: HestonParams = serde_json::from_str(r#"{"rho": 0.5, "xi": 0.1}"#).unwrap();
        assert_eq!(params.rho, 0.5);
        assert_eq!(params.v0, HestonParams::default().v0);

        let bad: HestonParams = serde_json::from_str(r#"{"rho": 2.0}"#).unwrap();
        assert!(HestonGenerator::new(bad).is_err());
    }

    fn config(n: usize, m: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .num_simulations(n)
            .num_timesteps(m)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_shape_and_positivity() {
        let generator = HestonGenerator::new(HestonParams::default()).unwrap();
        let paths = generator.simulate(&config(200, 31, 5)).unwrap();
        assert_eq!(paths.shape(), (200, 31));
        assert!(paths.as_slice().iter().all(|&s| s > 0.0 && s.is_finite()));
        assert!(paths.initial_prices().iter().all(|&s| s == 100.0));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let generator = HestonGenerator::new(HestonParams::default()).unwrap();
        let a = generator.simulate(&config(10, 7, 3)).unwrap();
        let b = generator.simulate(&config(10, 7, 3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_variance_is_deterministic() {
        // zero variance throughout: deterministic growth at r - q
        let params = HestonParams {
            xi: 0.0,
            v0: 0.0,
            theta: 0.0,
            rate: 0.02,
            ..HestonParams::default()
        };
        let generator = HestonGenerator::new(params).unwrap();
        let paths = generator.simulate(&config(2, 5, 0)).unwrap();
        for &s in &paths.terminal_prices() {
            assert_relative_eq!(s, 100.0 * 0.02_f64.exp(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_terminal_mean() {
        let params = HestonParams {
            rate: 0.03,
            ..HestonParams::default()
        };
        let generator = HestonGenerator::new(params).unwrap();
        let paths = generator.simulate(&config(40_000, 26, 77)).unwrap();
        let terminal = paths.terminal_prices();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        let expected = 100.0 * 0.03_f64.exp();
        assert!(
            (mean - expected).abs() < 0.5,
            "mean {} vs expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_rejects_invalid_correlation() {
        let params = HestonParams {
            rho: 1.5,
            ..HestonParams::default()
        };
        let err = HestonGenerator::new(params).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidParameter { name: "rho", .. }));
    }

    #[test]
    fn test_rejects_negative_variance() {
        let params = HestonParams {
            v0: -0.01,
            ..HestonParams::default()
        };
        assert!(HestonGenerator::new(params).is_err());
    }

    #[test]
    fn test_feller_condition() {
        let params = HestonParams {
            kappa: 0.5,
            xi: 0.5,
            ..HestonParams::default()
        };
        assert!(!params.satisfies_feller());
        // Accepted with a warning
        assert!(HestonGenerator::new(params).is_ok());
    }
}
