//! Black-Scholes delta hedging benchmark.
//!
//! With observations at `t_i = i·T/(m-1)`, step `i` holds the delta of the
//! call at the current price and remaining maturity `T - t_i`:
//!
//! ```text
//! H_i = e^(-q(T - t_i)) · N(d₁(S_i, T - t_i))
//! ```

use hedge_core::math::scalar;
use hedge_models::analytical::BlackScholesCallOption;
use hedge_core::traits::Scalar;

use super::HedgingStrategy;
use crate::error::StrategyError;

/// Classical delta hedge of a European call.
///
/// Does not use the initial price; it exists so neural strategies have a
/// closed-form benchmark on the same paths.
///
/// # Examples
/// ```
/// use hedge_core::types::PricePath;
/// use hedge_strategy::strategy::{DeltaHedgingStrategy, HedgingStrategy};
///
/// let strategy = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, 2).unwrap();
/// let paths = PricePath::from_rows(vec![vec![100.0_f64, 102.0, 101.0]]).unwrap();
/// let out = strategy.forward(&paths).unwrap();
/// assert!(out.hedge.get(0, 0) > 0.5 && out.hedge.get(0, 0) < 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaHedgingStrategy {
    strike: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    maturity: f64,
    num_steps: usize,
}

impl DeltaHedgingStrategy {
    /// Creates the benchmark for a call expiring at `maturity`, rebalanced
    /// `num_steps` times.
    ///
    /// # Errors
    /// - `StrategyError::InvalidConfiguration` if `num_steps` is zero
    /// - `StrategyError::Analytical` if the contract parameters are invalid
    pub fn new(
        strike: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
        maturity: f64,
        num_steps: usize,
    ) -> Result<Self, StrategyError> {
        if num_steps == 0 {
            return Err(StrategyError::InvalidConfiguration(
                "num_steps must be at least 1".to_string(),
            ));
        }
        // Validate once with a unit spot; the spot varies along the path.
        BlackScholesCallOption::new(1.0, strike, rate, dividend, maturity, volatility)?;

        Ok(Self {
            strike,
            rate,
            dividend,
            volatility,
            maturity,
            num_steps,
        })
    }

    /// Remaining maturity at step `step`.
    #[inline]
    pub fn time_to_maturity(&self, step: usize) -> f64 {
        self.maturity * (1.0 - step as f64 / self.num_steps as f64)
    }
}

impl<T: Scalar> HedgingStrategy<T> for DeltaHedgingStrategy {
    fn num_steps(&self) -> usize {
        self.num_steps
    }

    fn hedge_ratio(&self, step: usize, spot: T, _initial_spot: T) -> Result<T, StrategyError> {
        if step >= self.num_steps {
            return Err(StrategyError::DimensionMismatch(format!(
                "step {} out of range for {} steps",
                step, self.num_steps
            )));
        }
        let option = BlackScholesCallOption::new(
            spot,
            scalar(self.strike),
            scalar(self.rate),
            scalar(self.dividend),
            scalar(self.time_to_maturity(step)),
            scalar(self.volatility),
        )?;
        Ok(option.delta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hedge_core::types::PricePath;

    #[test]
    fn test_first_step_matches_black_scholes_delta() {
        let strategy = DeltaHedgingStrategy::new(100.0, 0.05, 0.0, 0.2, 1.0, 4).unwrap();
        let h: f64 = strategy.hedge_ratio(0, 100.0, 100.0).unwrap();
        assert_relative_eq!(h, 0.636_830_651, epsilon = 1e-6);
    }

    #[test]
    fn test_time_grid() {
        let strategy = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 2.0, 4).unwrap();
        assert_relative_eq!(strategy.time_to_maturity(0), 2.0);
        assert_relative_eq!(strategy.time_to_maturity(1), 1.5);
        assert_relative_eq!(strategy.time_to_maturity(3), 0.5);
    }

    #[test]
    fn test_deep_itm_late_step_holds_one() {
        let strategy = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, 10).unwrap();
        let h: f64 = strategy.hedge_ratio(9, 200.0, 100.0).unwrap();
        assert_relative_eq!(h, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_forward_shapes_and_bounds() {
        let strategy = DeltaHedgingStrategy::new(100.0, 0.01, 0.02, 0.3, 1.0, 3).unwrap();
        let paths = PricePath::from_rows(vec![
            vec![100.0, 90.0, 80.0, 85.0],
            vec![100.0, 115.0, 120.0, 130.0],
        ])
        .unwrap();
        let out = strategy.forward(&paths).unwrap();
        assert_eq!(out.pnl.len(), 2);
        assert_eq!(out.hedge.shape(), (2, 3));
        // e^(-q·τ) <= 1 at every step
        assert!(out.hedge.as_slice().iter().all(|&h| (0.0..=1.0).contains(&h)));
    }

    #[test]
    fn test_rejects_invalid_contract() {
        assert!(matches!(
            DeltaHedgingStrategy::new(-100.0, 0.0, 0.0, 0.2, 1.0, 3),
            Err(StrategyError::Analytical(_))
        ));
        assert!(DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, 0).is_err());
    }
}
