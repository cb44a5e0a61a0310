//! Entropic risk measure.
//!
//! ## Mathematical Definition
//!
//! ```text
//! ρ_λ(x) = (1/λ) ln(E[exp(-λx)])
//! ```
//!
//! ## Stabilisation
//!
//! `exp(-λx)` overflows `f64` once `-λx` exceeds about 709. The measure is
//! evaluated through the log-mean-exp identity with `y = -λx`:
//!
//! ```text
//! m = max(y)
//! ρ_λ(x) = (m + ln(mean(exp(y - m)))) / λ
//! ```
//!
//! which is finite for every finite sample.
//!
//! ## Small λ
//!
//! Expanding to first order, `ρ_λ(x) → -mean(x)` as `λ → 0⁺`: a sample of
//! gains carries negative risk.

use hedge_core::math::{log_mean_exp, scalar};
use hedge_core::traits::Scalar;

use crate::error::RiskError;

/// Entropic risk measure with risk aversion `lambda`.
///
/// # Examples
/// ```
/// use hedge_risk::Entropy;
///
/// let entropy = Entropy::new(1.0).unwrap();
/// // A certain outcome c has risk -c
/// let value = entropy.evaluate(&[3.0_f64, 3.0, 3.0]).unwrap();
/// assert!((value + 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EntropyParams"))]
pub struct Entropy {
    lambda: f64,
}

/// Unvalidated wire form of [`Entropy`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct EntropyParams {
    lambda: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<EntropyParams> for Entropy {
    type Error = RiskError;

    fn try_from(params: EntropyParams) -> Result<Self, Self::Error> {
        Entropy::new(params.lambda)
    }
}

impl Entropy {
    /// Creates an entropic measure.
    ///
    /// # Errors
    /// `RiskError::InvalidRiskAversion` unless `lambda` is positive and finite.
    pub fn new(lambda: f64) -> Result<Self, RiskError> {
        if !(lambda > 0.0 && lambda.is_finite()) {
            return Err(RiskError::InvalidRiskAversion { lambda });
        }
        Ok(Self { lambda })
    }

    /// Returns the risk aversion coefficient.
    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// `(1/λ) ln(mean(exp(-λx)))`, stabilised.
    ///
    /// # Errors
    /// `RiskError::EmptySample` if `x` is empty.
    pub fn evaluate<T: Scalar>(&self, x: &[T]) -> Result<T, RiskError> {
        let lambda = scalar::<T>(self.lambda);
        let scaled: Vec<T> = x.iter().map(|&xi| -lambda * xi).collect();
        let lme = log_mean_exp(&scaled).ok_or(RiskError::EmptySample)?;
        Ok(lme / lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn naive(x: &[f64], lambda: f64) -> f64 {
        let m = x.iter().map(|xi| (-lambda * xi).exp()).sum::<f64>() / x.len() as f64;
        m.ln() / lambda
    }

    #[test]
    fn test_new_rejects_non_positive() {
        for lambda in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Entropy::new(lambda).is_err(), "lambda = {} accepted", lambda);
        }
    }

    #[test]
    fn test_small_lambda_limit() {
        let entropy = Entropy::new(1e-6).unwrap();
        let value = entropy.evaluate(&[1.0_f64, 2.0, 3.0]).unwrap();
        assert_relative_eq!(value, -2.0, epsilon = 1e-5);
        assert_relative_eq!(value.abs(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_matches_naive_formula() {
        let x = [0.4_f64, -1.3, 2.2, 0.0, -0.7];
        for lambda in [0.1, 1.0, 3.0] {
            let entropy = Entropy::new(lambda).unwrap();
            assert_relative_eq!(
                entropy.evaluate(&x).unwrap(),
                naive(&x, lambda),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_finite_for_large_magnitudes() {
        let entropy = Entropy::new(1.0).unwrap();
        let x = [1e4_f64, -1e4, 0.0, 5e3];
        let value = entropy.evaluate(&x).unwrap();
        assert!(value.is_finite());
        // Dominated by the worst outcome: 1e4 + ln(1/4)
        assert_relative_eq!(value, 1e4 + 0.25_f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_at_least_negative_mean() {
        // Jensen: ρ_λ(x) >= -mean(x)
        let x = [1.0_f64, -4.0, 2.5, 0.5];
        let mean = x.iter().sum::<f64>() / x.len() as f64;
        let entropy = Entropy::new(0.7).unwrap();
        assert!(entropy.evaluate(&x).unwrap() >= -mean);
    }

    #[test]
    fn test_empty_sample() {
        let entropy = Entropy::new(1.0).unwrap();
        assert_eq!(entropy.evaluate::<f64>(&[]), Err(RiskError::EmptySample));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_validates_lambda() {
        let entropy: Entropy = serde_json::from_str(r#"{"lambda":0.5}"#).unwrap();
        assert_eq!(entropy.lambda(), 0.5);

        for bad in [r#"{"lambda":0.0}"#, r#"{"lambda":-2.0}"#] {
            assert!(serde_json::from_str::<Entropy>(bad).is_err(), "{} accepted", bad);
        }
    }

    #[test]
    fn test_dual_derivative_is_softmax_weighted() {
        use num_dual::Dual64;

        // ∂ρ/∂x_i = -exp(-λx_i) / Σ_j exp(-λx_j); shift x_0 only
        let lambda = 0.5;
        let raw = [1.0_f64, -2.0, 0.5];
        let x: Vec<Dual64> = raw
            .iter()
            .enumerate()
            .map(|(i, &v)| Dual64::new(v, if i == 0 { 1.0 } else { 0.0 }))
            .collect();
        let value = Entropy::new(lambda).unwrap().evaluate(&x).unwrap();

        let weights: Vec<f64> = raw.iter().map(|v| (-lambda * v).exp()).collect();
        let expected = -weights[0] / weights.iter().sum::<f64>();
        assert_relative_eq!(value.eps, expected, epsilon = 1e-12);
    }
}
