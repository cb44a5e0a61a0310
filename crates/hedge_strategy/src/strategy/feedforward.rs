//! Neural hedging strategy with one approximator per step.
//!
//! At step `i` the approximator for that step receives the normalised
//! log-price `ln(price[i] / price[0])` and returns the hedge ratio.

use hedge_models::rng::HedgeRng;
use hedge_core::traits::Scalar;

use super::HedgingStrategy;
use crate::error::StrategyError;
use crate::network::Mlp;

/// Feed-forward hedging strategy.
///
/// Holds an ordered list of independent `1 -> 1` approximators, one per
/// hedging step. Parameters change only through
/// [`FeedForwardHedgingStrategy::set_parameters`].
///
/// # Examples
/// ```
/// use hedge_core::types::PricePath;
/// use hedge_models::rng::HedgeRng;
/// use hedge_strategy::strategy::{FeedForwardHedgingStrategy, HedgingStrategy};
///
/// let mut rng = HedgeRng::from_seed(42);
/// let strategy = FeedForwardHedgingStrategy::new(8, 2, &mut rng).unwrap();
///
/// let paths = PricePath::from_rows(vec![vec![100.0, 101.0, 99.0]]).unwrap();
/// let out = strategy.forward(&paths).unwrap();
/// assert_eq!(out.pnl.len(), 1);
/// assert_eq!(out.hedge.shape(), (1, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardHedgingStrategy<T: Scalar> {
    networks: Vec<Mlp<T>>,
}

impl FeedForwardHedgingStrategy<f64> {
    /// Freshly initialised strategy with a
    /// `1 -> hidden -> ReLU -> hidden -> ReLU -> 1` approximator per step.
    ///
    /// # Errors
    /// `StrategyError::InvalidConfiguration` if `hidden_nodes` or
    /// `num_steps` is zero.
    pub fn new(
        hidden_nodes: usize,
        num_steps: usize,
        rng: &mut HedgeRng,
    ) -> Result<Self, StrategyError> {
        if hidden_nodes == 0 {
            return Err(StrategyError::InvalidConfiguration(
                "hidden_nodes must be at least 1".to_string(),
            ));
        }
        if num_steps == 0 {
            return Err(StrategyError::InvalidConfiguration(
                "num_steps must be at least 1".to_string(),
            ));
        }

        let architecture = [1, hidden_nodes, hidden_nodes, 1];
        let networks = (0..num_steps)
            .map(|_| Mlp::random(&architecture, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { networks })
    }
}

impl<T: Scalar> FeedForwardHedgingStrategy<T> {
    /// Wraps existing approximators, one per step.
    ///
    /// # Errors
    /// - `StrategyError::InvalidConfiguration` if `networks` is empty
    /// - `StrategyError::DimensionMismatch` naming the first approximator
    ///   that is not scalar-in/scalar-out
    pub fn from_networks(networks: Vec<Mlp<T>>) -> Result<Self, StrategyError> {
        if networks.is_empty() {
            return Err(StrategyError::InvalidConfiguration(
                "at least one approximator is required".to_string(),
            ));
        }
        if let Some((step, net)) = networks
            .iter()
            .enumerate()
            .find(|(_, net)| net.input_size() != 1 || net.output_size() != 1)
        {
            return Err(StrategyError::DimensionMismatch(format!(
                "approximator for step {} maps {} -> {} (expected 1 -> 1)",
                step,
                net.input_size(),
                net.output_size()
            )));
        }
        Ok(Self { networks })
    }

    /// The per-step approximators.
    #[inline]
    pub fn networks(&self) -> &[Mlp<T>] {
        &self.networks
    }

    /// Total number of trainable scalars.
    pub fn num_parameters(&self) -> usize {
        self.networks.iter().map(Mlp::num_parameters).sum()
    }

    /// Flat parameters, step by step, in [`Mlp::parameters`] order.
    pub fn parameters(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.num_parameters());
        for net in &self.networks {
            out.extend(net.parameters());
        }
        out
    }

    /// Overwrites every parameter in [`FeedForwardHedgingStrategy::parameters`] order.
    ///
    /// # Errors
    /// `StrategyError::Network` with `ParameterCount` if the length
    /// differs; nothing is written in that case.
    pub fn set_parameters(&mut self, params: &[T]) -> Result<(), StrategyError> {
        self.check_count(params.len())?;
        let mut rest = params;
        for net in &mut self.networks {
            let (head, tail) = rest.split_at(net.num_parameters());
            net.set_parameters(head)?;
            rest = tail;
        }
        Ok(())
    }

    /// Same architecture over another scalar type with the given
    /// parameters.
    ///
    /// # Errors
    /// `StrategyError::Network` with `ParameterCount` if the length differs.
    pub fn with_parameters<U: Scalar>(
        &self,
        params: &[U],
    ) -> Result<FeedForwardHedgingStrategy<U>, StrategyError> {
        self.check_count(params.len())?;
        let mut rest = params;
        let mut networks = Vec::with_capacity(self.networks.len());
        for net in &self.networks {
            let (head, tail) = rest.split_at(net.num_parameters());
            networks.push(net.with_parameters(head)?);
            rest = tail;
        }
        Ok(FeedForwardHedgingStrategy { networks })
    }

    /// Converts every parameter into another scalar type.
    pub fn cast<U: Scalar>(&self) -> FeedForwardHedgingStrategy<U> {
        FeedForwardHedgingStrategy {
            networks: self.networks.iter().map(Mlp::cast).collect(),
        }
    }

    /// Offset of the first parameter of `step` in the flat vector.
    pub fn parameter_offset(&self, step: usize) -> usize {
        self.networks[..step].iter().map(Mlp::num_parameters).sum()
    }

    fn check_count(&self, got: usize) -> Result<(), StrategyError> {
        let expected = self.num_parameters();
        if got != expected {
            return Err(crate::network::NetworkError::ParameterCount { expected, got }.into());
        }
        Ok(())
    }
}

impl<T: Scalar> HedgingStrategy<T> for FeedForwardHedgingStrategy<T> {
    fn num_steps(&self) -> usize {
        self.networks.len()
    }

    fn hedge_ratio(&self, step: usize, spot: T, initial_spot: T) -> Result<T, StrategyError> {
        let net = self.networks.get(step).ok_or_else(|| {
            StrategyError::DimensionMismatch(format!(
                "step {} out of range for {} approximators",
                step,
                self.networks.len()
            ))
        })?;
        let log_moneyness = (spot / initial_spot).ln();
        Ok(net.forward_scalar(log_moneyness)?)
    }
}
