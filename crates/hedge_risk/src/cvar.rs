//! Conditional Value-at-Risk.
//!
//! ## Mathematical Definition
//!
//! Rockafellar-Uryasev representation with auxiliary variable `w`:
//!
//! ```text
//! CVaR_α(x) = min_w { w + E[max(-x - w, 0)] / (1 - α) }
//! ```
//!
//! [`Cvar::evaluate`] returns the bracket for a given `w`; minimising over
//! `w` is left to the optimiser, which treats `w` as a trainable parameter.
//! At the optimum `w` equals the α-quantile of the loss `-x`.

use hedge_core::math::{mean, relu, scalar};
use hedge_core::traits::Scalar;

use crate::error::RiskError;

/// CVaR at confidence level `alpha`.
///
/// # Examples
/// ```
/// use hedge_risk::Cvar;
///
/// let cvar = Cvar::new(0.5).unwrap();
/// // losses -x = [1, 3]; w = 1 → 1 + mean([0, 2]) / 0.5 = 3
/// assert_eq!(cvar.evaluate(&[-1.0_f64, -3.0], 1.0).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CvarParams"))]
pub struct Cvar {
    alpha: f64,
}

/// Unvalidated wire form of [`Cvar`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CvarParams {
    alpha: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<CvarParams> for Cvar {
    type Error = RiskError;

    fn try_from(params: CvarParams) -> Result<Self, Self::Error> {
        Cvar::new(params.alpha)
    }
}

impl Cvar {
    /// Creates a CVaR measure.
    ///
    /// # Errors
    /// `RiskError::InvalidConfidence` unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> Result<Self, RiskError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(RiskError::InvalidConfidence { alpha });
        }
        Ok(Self { alpha })
    }

    /// Returns the confidence level.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `w + mean(max(-x - w, 0)) / (1 - alpha)`.
    ///
    /// # Errors
    /// `RiskError::EmptySample` if `x` is empty.
    pub fn evaluate<T: Scalar>(&self, x: &[T], w: T) -> Result<T, RiskError> {
        let shortfall: Vec<T> = x.iter().map(|&xi| relu(-xi - w)).collect();
        let expected = mean(&shortfall).ok_or(RiskError::EmptySample)?;
        Ok(w + expected / scalar::<T>(1.0 - self.alpha))
    }
}
