//! Hedging strategies and the P&L accumulation loop.
//!
//! A strategy maps a simulated path array of shape `(n, m)` to one hedge
//! ratio per simulation and step. The loop that turns those decisions into
//! hedging P&L lives once, in [`HedgingStrategy::forward`]:
//!
//! ```text
//! dS[t]  = price[t+1] - price[t]                  t = 0..m-1
//! H_i    = hedge_ratio(i, price[i], price[0])     i = 0..m-1
//! pnl   += dS[i] · H_i
//! ```
//!
//! - [`FeedForwardHedgingStrategy`]: one neural approximator per step
//! - [`DeltaHedgingStrategy`]: Black-Scholes delta benchmark

pub mod delta;
pub mod feedforward;

pub use delta::DeltaHedgingStrategy;
pub use feedforward::FeedForwardHedgingStrategy;

use hedge_core::types::PricePath;
use hedge_core::traits::Scalar;

use crate::error::StrategyError;

/// Hedge ratios, shape `(num_simulations, num_steps)`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeTable<T: Scalar> {
    values: Vec<T>,
    num_simulations: usize,
    num_steps: usize,
}

impl<T: Scalar> HedgeTable<T> {
    fn zeros(num_simulations: usize, num_steps: usize) -> Self {
        Self {
            values: vec![T::zero(); num_simulations * num_steps],
            num_simulations,
            num_steps,
        }
    }

    /// Hedge ratio of simulation `sim` at step `step`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, sim: usize, step: usize) -> T {
        assert!(step < self.num_steps, "step out of range");
        self.values[sim * self.num_steps + step]
    }

    /// Every hedge ratio of simulation `sim`.
    #[inline]
    pub fn row(&self, sim: usize) -> &[T] {
        let start = sim * self.num_steps;
        &self.values[start..start + self.num_steps]
    }

    /// `(num_simulations, num_steps)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_simulations, self.num_steps)
    }

    /// Row-major view of the table.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

/// Result of applying a strategy to a path array.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeOutput<T: Scalar> {
    /// Hedging P&L per simulation.
    pub pnl: Vec<T>,
    /// Hedge ratio per simulation and step.
    pub hedge: HedgeTable<T>,
}

/// A per-step hedging rule.
///
/// Implementors decide the hedge ratio at one step; [`HedgingStrategy::forward`]
/// runs the accumulation loop over a whole path array.
pub trait HedgingStrategy<T: Scalar> {
    /// Number of hedging steps, i.e. price increments, the strategy covers.
    fn num_steps(&self) -> usize;

    /// Hedge ratio held over `[t_step, t_step+1]` given the current price
    /// and the initial price of the same simulation.
    ///
    /// # Errors
    /// Implementation specific; must not fail for `step < num_steps()` and
    /// positive prices unless the strategy itself is misconfigured.
    fn hedge_ratio(&self, step: usize, spot: T, initial_spot: T) -> Result<T, StrategyError>;

    /// Applies the strategy to every simulation of `paths`.
    ///
    /// # Errors
    /// - `StrategyError::TooFewTimesteps` if `paths` has fewer than two columns
    /// - `StrategyError::DimensionMismatch` if `paths` does not have
    ///   `num_steps() + 1` columns
    /// - any error of [`HedgingStrategy::hedge_ratio`]
    fn forward(&self, paths: &PricePath<T>) -> Result<HedgeOutput<T>, StrategyError> {
        let (n, m) = paths.shape();
        if m < 2 {
            return Err(StrategyError::TooFewTimesteps(m));
        }
        let steps = self.num_steps();
        if m - 1 != steps {
            return Err(StrategyError::DimensionMismatch(format!(
                "strategy covers {} steps but paths have {} timesteps (expected {})",
                steps,
                m,
                steps + 1
            )));
        }

        let mut pnl = vec![T::zero(); n];
        let mut hedge = HedgeTable::zeros(n, steps);

        for (sim, (acc, ratios)) in pnl
            .iter_mut()
            .zip(hedge.values.chunks_exact_mut(steps))
            .enumerate()
        {
            let prices = paths.row(sim);
            let initial = prices[0];
            for (i, ratio) in ratios.iter_mut().enumerate() {
                let h = self.hedge_ratio(i, prices[i], initial)?;
                *acc = *acc + (prices[i + 1] - prices[i]) * h;
                *ratio = h;
            }
        }

        Ok(HedgeOutput { pnl, hedge })
    }
}
