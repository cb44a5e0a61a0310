//! Hedging objective and its exact parameter gradient.
//!
//! ## Loss
//!
//! For each simulated path the terminal outcome of selling the call for
//! `premium` and running the strategy is
//!
//! ```text
//! x = premium + hedging P&L - max(S_T, K) + K
//! ```
//!
//! and the loss is the configured risk measure `ρ(x; w)`.
//!
//! ## Gradient
//!
//! With the `num-dual-mode` feature, [`HedgingObjective::gradient`]
//! differentiates the loss in forward mode. A parameter of the step-`i`
//! approximator only moves the step-`i` hedge, so its tangent on the
//! outcome is `dS[i] · ∂H_i/∂θ`; one dual pass through that single
//! approximator per parameter suffices. `w` gets one more pass.

use hedge_core::math::scalar;
use hedge_core::types::PricePath;
use hedge_models::instruments::european_call_payoff;
use hedge_risk::RiskObjective;
use hedge_core::traits::Scalar;
#[cfg(feature = "num-dual-mode")]
use tracing::debug;

use crate::error::StrategyError;
use crate::strategy::HedgingStrategy;

#[cfg(feature = "num-dual-mode")]
use crate::strategy::FeedForwardHedgingStrategy;
#[cfg(feature = "num-dual-mode")]
use hedge_core::types::dual::{self, DualNumber};

/// Loss of hedging a short European call.
///
/// # Examples
/// ```
/// use hedge_core::types::PricePath;
/// use hedge_risk::{RiskMeasure, RiskObjective};
/// use hedge_strategy::objective::HedgingObjective;
/// use hedge_strategy::strategy::DeltaHedgingStrategy;
///
/// let risk = RiskObjective::new(RiskMeasure::cvar(0.5).unwrap(), 0.0).unwrap();
/// let objective = HedgingObjective::new(100.0, 8.0, risk).unwrap();
///
/// let strategy = DeltaHedgingStrategy::new(100.0, 0.0, 0.0, 0.2, 1.0, 2).unwrap();
/// let paths = PricePath::from_rows(vec![
///     vec![100.0, 104.0, 110.0],
///     vec![100.0, 97.0, 92.0],
/// ])
/// .unwrap();
/// let loss = objective.loss(&strategy, &paths).unwrap();
/// assert!(loss.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgingObjective {
    strike: f64,
    premium: f64,
    risk: RiskObjective,
}

/// Value and gradient of the loss.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveGradient {
    /// Loss at the current parameters and `w`.
    pub value: f64,
    /// ∂loss/∂θ in [`FeedForwardHedgingStrategy::parameters`] order.
    pub parameters: Vec<f64>,
    /// ∂loss/∂w; zero for measures that ignore `w`.
    pub w: f64,
}

impl ObjectiveGradient {
    /// Euclidean norm over the parameters and `w`.
    pub fn norm(&self) -> f64 {
        (self.parameters.iter().map(|g| g * g).sum::<f64>() + self.w * self.w).sqrt()
    }
}

impl HedgingObjective {
    /// Creates the objective.
    ///
    /// # Errors
    /// `StrategyError::InvalidConfiguration` if `strike` is not positive or
    /// `premium` is not finite.
    pub fn new(strike: f64, premium: f64, risk: RiskObjective) -> Result<Self, StrategyError> {
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(StrategyError::InvalidConfiguration(format!(
                "strike {} must be positive",
                strike
            )));
        }
        if !premium.is_finite() {
            return Err(StrategyError::InvalidConfiguration(format!(
                "premium {} must be finite",
                premium
            )));
        }
        Ok(Self {
            strike,
            premium,
            risk,
        })
    }

    /// Strike of the hedged call.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Premium received for the call.
    #[inline]
    pub fn premium(&self) -> f64 {
        self.premium
    }

    /// Risk measure and auxiliary variable.
    #[inline]
    pub fn risk(&self) -> &RiskObjective {
        &self.risk
    }

    /// Mutable access for the optimiser to update `w`.
    #[inline]
    pub fn risk_mut(&mut self) -> &mut RiskObjective {
        &mut self.risk
    }

    /// Terminal outcome per simulation, `premium + pnl - payoff`.
    ///
    /// # Errors
    /// Any error of [`HedgingStrategy::forward`].
    pub fn outcomes<T, S>(&self, strategy: &S, paths: &PricePath<T>) -> Result<Vec<T>, StrategyError>
    where
        T: Scalar,
        S: HedgingStrategy<T> + ?Sized,
    {
        let output = strategy.forward(paths)?;
        let payoff = european_call_payoff(&paths.terminal_prices(), scalar::<T>(self.strike));
        let premium = scalar::<T>(self.premium);
        Ok(output
            .pnl
            .iter()
            .zip(&payoff)
            .map(|(&pnl, &p)| premium + pnl - p)
            .collect())
    }

    /// Risk of the terminal outcomes at the stored `w`.
    ///
    /// # Errors
    /// - any error of [`HedgingObjective::outcomes`]
    /// - `StrategyError::NonFiniteLoss` if the loss is NaN or infinite
    pub fn loss<T, S>(&self, strategy: &S, paths: &PricePath<T>) -> Result<T, StrategyError>
    where
        T: Scalar,
        S: HedgingStrategy<T> + ?Sized,
    {
        let x = self.outcomes(strategy, paths)?;
        let value = self.risk.value(&x)?;
        check_finite(value)?;
        Ok(value)
    }
}

#[cfg(feature = "num-dual-mode")]
impl HedgingObjective {
    /// Exact gradient of the loss with respect to every strategy parameter
    /// and `w`.
    ///
    /// # Errors
    /// Any error of [`HedgingObjective::loss`].
    pub fn gradient(
        &self,
        strategy: &FeedForwardHedgingStrategy<f64>,
        paths: &PricePath<f64>,
    ) -> Result<ObjectiveGradient, StrategyError> {
        let x = self.outcomes(strategy, paths)?;
        let value = self.risk.value(&x)?;
        check_finite(value)?;

        let num_parameters = strategy.num_parameters();
        debug!(
            num_parameters,
            num_simulations = paths.num_simulations(),
            measure = self.risk.measure().name(),
            value,
            "computing objective gradient"
        );

        let w = dual::constant(self.risk.w());
        let initial = paths.initial_prices();
        let mut grad = Vec::with_capacity(num_parameters);

        for (step, net) in strategy.networks().iter().enumerate() {
            let increments = paths.increments(step);
            let inputs: Vec<DualNumber> = paths
                .column(step)
                .iter()
                .zip(&initial)
                .map(|(&s, &s0)| dual::constant((s / s0).ln()))
                .collect();

            let base = net.parameters();
            for k in 0..base.len() {
                let seeded: Vec<DualNumber> = base
                    .iter()
                    .enumerate()
                    .map(|(j, &p)| if j == k { dual::seeded(p) } else { dual::constant(p) })
                    .collect();
                let tangent_net = net.with_parameters(&seeded)?;

                let perturbed = inputs
                    .iter()
                    .zip(&increments)
                    .zip(&x)
                    .map(|((&input, &ds), &xi)| {
                        let dh = tangent_net.forward_scalar(input)?.eps;
                        Ok(dual::with_tangent(xi, ds * dh))
                    })
                    .collect::<Result<Vec<_>, StrategyError>>()?;

                grad.push(self.risk.value_at(&perturbed, w)?.eps);
            }
        }

        let w_grad = if self.risk.measure().uses_w() {
            let constant: Vec<DualNumber> = x.iter().map(|&xi| dual::constant(xi)).collect();
            self.risk
                .value_at(&constant, dual::seeded(self.risk.w()))?
                .eps
        } else {
            0.0
        };

        let gradient = ObjectiveGradient {
            value,
            parameters: grad,
            w: w_grad,
        };
        debug!(norm = gradient.norm(), "objective gradient computed");
        Ok(gradient)
    }

    /// Loss and its derivative along `direction` in parameter space and
    /// `dw` in `w`, from a single dual pass through the whole strategy.
    ///
    /// Returns `(loss, derivative)`.
    ///
    /// # Errors
    /// - `StrategyError::Network` if `direction` has the wrong length
    /// - any error of [`HedgingObjective::loss`]
    pub fn directional_derivative(
        &self,
        strategy: &FeedForwardHedgingStrategy<f64>,
        paths: &PricePath<f64>,
        direction: &[f64],
        dw: f64,
    ) -> Result<(f64, f64), StrategyError> {
        if direction.len() != strategy.num_parameters() {
            return Err(crate::network::NetworkError::ParameterCount {
                expected: strategy.num_parameters(),
                got: direction.len(),
            }
            .into());
        }
        let params: Vec<DualNumber> = strategy
            .parameters()
            .iter()
            .zip(direction)
            .map(|(&p, &d)| dual::with_tangent(p, d))
            .collect();
        let dual_strategy = strategy.with_parameters(&params)?;
        let dual_paths: PricePath<DualNumber> = paths.cast()?;

        let x = self.outcomes(&dual_strategy, &dual_paths)?;
        let value = self
            .risk
            .value_at(&x, dual::with_tangent(self.risk.w(), dw))?;
        check_finite(value.re)?;
        Ok((value.re, value.eps))
    }
}

fn check_finite<T: Scalar>(value: T) -> Result<(), StrategyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StrategyError::NonFiniteLoss(value.real()))
    }
}
