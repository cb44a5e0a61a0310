//! Risk measure selection and the optimiser-owned objective state.

use hedge_core::math::scalar;
use hedge_core::traits::Scalar;

use crate::cvar::Cvar;
use crate::entropy::Entropy;
use crate::error::RiskError;

/// The risk measures available to a hedging objective.
///
/// Dispatch is static over the closed set of measures.
///
/// # Examples
/// ```
/// use hedge_risk::{Cvar, Entropy, RiskMeasure};
///
/// let cvar = RiskMeasure::Cvar(Cvar::new(0.9).unwrap());
/// assert!(cvar.uses_w());
/// assert_eq!(cvar.name(), "cvar");
///
/// let entropy = RiskMeasure::Entropy(Entropy::new(1.0).unwrap());
/// // w is ignored by the entropic measure
/// assert_eq!(
///     entropy.evaluate(&[1.0_f64, 2.0], 0.0).unwrap(),
///     entropy.evaluate(&[1.0_f64, 2.0], 5.0).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskMeasure {
    /// Conditional Value-at-Risk
    Cvar(Cvar),
    /// Entropic risk measure
    Entropy(Entropy),
}

impl RiskMeasure {
    /// Builds a CVaR measure.
    ///
    /// # Errors
    /// See [`Cvar::new`].
    pub fn cvar(alpha: f64) -> Result<Self, RiskError> {
        Cvar::new(alpha).map(Self::Cvar)
    }

    /// Builds an entropic measure.
    ///
    /// # Errors
    /// See [`Entropy::new`].
    pub fn entropy(lambda: f64) -> Result<Self, RiskError> {
        Entropy::new(lambda).map(Self::Entropy)
    }

    /// Evaluates the measure on `x` with auxiliary variable `w`.
    ///
    /// # Errors
    /// `RiskError::EmptySample` if `x` is empty.
    pub fn evaluate<T: Scalar>(&self, x: &[T], w: T) -> Result<T, RiskError> {
        match self {
            RiskMeasure::Cvar(cvar) => cvar.evaluate(x, w),
            RiskMeasure::Entropy(entropy) => entropy.evaluate(x),
        }
    }

    /// Whether the measure depends on the auxiliary variable `w`.
    #[inline]
    pub fn uses_w(&self) -> bool {
        matches!(self, RiskMeasure::Cvar(_))
    }

    /// Short identifier used in configuration and reports.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            RiskMeasure::Cvar(_) => "cvar",
            RiskMeasure::Entropy(_) => "entropy",
        }
    }
}

/// A risk measure paired with its trainable auxiliary variable `w`.
///
/// The external optimiser reads `w`, computes an update and writes it back
/// through [`RiskObjective::set_w`]. Nothing else mutates it.
///
/// # Examples
/// ```
/// use hedge_risk::{RiskMeasure, RiskObjective};
///
/// let mut objective = RiskObjective::new(RiskMeasure::cvar(0.9).unwrap(), 0.0).unwrap();
/// let before = objective.value(&[-1.0_f64, -2.0, -3.0]).unwrap();
/// objective.set_w(2.0).unwrap();
/// assert!(objective.value(&[-1.0_f64, -2.0, -3.0]).unwrap() < before);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RiskObjectiveParams"))]
pub struct RiskObjective {
    measure: RiskMeasure,
    w: f64,
}

/// Wire form of [`RiskObjective`]; the measure validates itself, `w` is
/// checked on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RiskObjectiveParams {
    measure: RiskMeasure,
    w: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RiskObjectiveParams> for RiskObjective {
    type Error = RiskError;

    fn try_from(params: RiskObjectiveParams) -> Result<Self, Self::Error> {
        RiskObjective::new(params.measure, params.w)
    }
}

impl RiskObjective {
    /// Creates an objective with an initial `w`.
    ///
    /// # Errors
    /// `RiskError::InvalidAuxiliary` if `w` is not finite.
    pub fn new(measure: RiskMeasure, w: f64) -> Result<Self, RiskError> {
        check_w(w)?;
        Ok(Self { measure, w })
    }

    /// Returns the risk measure.
    #[inline]
    pub fn measure(&self) -> &RiskMeasure {
        &self.measure
    }

    /// Returns the current auxiliary variable.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Replaces the auxiliary variable.
    ///
    /// # Errors
    /// `RiskError::InvalidAuxiliary` if `w` is not finite; the previous
    /// value is kept.
    pub fn set_w(&mut self, w: f64) -> Result<(), RiskError> {
        check_w(w)?;
        self.w = w;
        Ok(())
    }

    /// Evaluates the measure at the stored `w`.
    ///
    /// # Errors
    /// `RiskError::EmptySample` if `x` is empty.
    pub fn value<T: Scalar>(&self, x: &[T]) -> Result<T, RiskError> {
        self.measure.evaluate(x, scalar::<T>(self.w))
    }

    /// Evaluates the measure at an explicit `w`, e.g. a dual number seeded
    /// for differentiation with respect to `w`.
    ///
    /// # Errors
    /// `RiskError::EmptySample` if `x` is empty.
    pub fn value_at<T: Scalar>(&self, x: &[T], w: T) -> Result<T, RiskError> {
        self.measure.evaluate(x, w)
    }
}

fn check_w(w: f64) -> Result<(), RiskError> {
    if w.is_finite() {
        Ok(())
    } else {
        Err(RiskError::InvalidAuxiliary { w })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dispatch_matches_direct_call() {
        let x = [0.5_f64, -1.5, 2.0];
        let cvar = Cvar::new(0.75).unwrap();
        assert_eq!(
            RiskMeasure::Cvar(cvar).evaluate(&x, 0.3).unwrap(),
            cvar.evaluate(&x, 0.3).unwrap()
        );

        let entropy = Entropy::new(2.0).unwrap();
        assert_eq!(
            RiskMeasure::Entropy(entropy).evaluate(&x, 0.3).unwrap(),
            entropy.evaluate(&x).unwrap()
        );
    }

    #[test]
    fn test_constructors_validate() {
        assert!(RiskMeasure::cvar(1.0).is_err());
        assert!(RiskMeasure::entropy(0.0).is_err());
        assert!(!RiskMeasure::entropy(1.0).unwrap().uses_w());
    }

    #[test]
    fn test_objective_uses_stored_w() {
        let mut objective = RiskObjective::new(RiskMeasure::cvar(0.5).unwrap(), 1.0).unwrap();
        assert_eq!(objective.value(&[-1.0_f64, -3.0]).unwrap(), 3.0);

        objective.set_w(0.0).unwrap();
        assert_eq!(objective.w(), 0.0);
        assert_relative_eq!(objective.value(&[-1.0_f64, -3.0]).unwrap(), 4.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialised_objective_is_validated() {
        let objective: RiskObjective =
            serde_json::from_str(r#"{"measure":{"Cvar":{"alpha":0.5}},"w":1.0}"#).unwrap();
        assert_eq!(objective.value(&[-1.0_f64, -3.0]).unwrap(), 3.0);

        for bad in [
            r#"{"measure":{"Entropy":{"lambda":0.0}},"w":0.0}"#,
            r#"{"measure":{"Cvar":{"alpha":1.0}},"w":0.0}"#,
            r#"{"measure":{"Cvar":{"alpha":0.5}},"w":1e999}"#,
        ] {
            assert!(serde_json::from_str::<RiskObjective>(bad).is_err(), "{} accepted", bad);
        }
    }

    #[test]
    fn test_set_w_rejects_non_finite() {
        let mut objective = RiskObjective::new(RiskMeasure::cvar(0.5).unwrap(), 1.0).unwrap();
        assert_eq!(
            objective.set_w(f64::NAN).map_err(|e| e.to_string()).unwrap_err(),
            "Invalid auxiliary variable: w = NaN (must be finite)"
        );
        assert_eq!(objective.w(), 1.0);
        assert!(RiskObjective::new(RiskMeasure::cvar(0.5).unwrap(), f64::INFINITY).is_err());
    }
}
