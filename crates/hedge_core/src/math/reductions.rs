//! Reductions over sample slices.
//!
//! All functions are generic over `T: Scalar` so they propagate derivatives
//! when called with dual numbers. Empty inputs yield `None`; callers decide
//! which error to raise.

use crate::traits::Scalar;

/// Converts an `f64` constant into `T` (zero derivative).
///
/// # Examples
/// ```
/// use hedge_core::math::scalar;
///
/// let half: f64 = scalar(0.5);
/// assert_eq!(half, 0.5);
/// ```
#[inline]
pub fn scalar<T: Scalar>(value: f64) -> T {
    T::from_f64(value)
}

/// Rectified linear unit, `max(x, 0)`.
///
/// Written as a branch on the primal value so dual numbers keep the
/// derivative of the selected side (1 above zero, 0 below).
#[inline]
pub fn relu<T: Scalar>(x: T) -> T {
    let zero = T::zero();
    if x > zero {
        x
    } else {
        zero
    }
}

/// Arithmetic mean of a sample.
///
/// # Examples
/// ```
/// use hedge_core::math::mean;
///
/// assert_eq!(mean(&[1.0_f64, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean::<f64>(&[]), None);
/// ```
#[inline]
pub fn mean<T: Scalar>(xs: &[T]) -> Option<T> {
    if xs.is_empty() {
        return None;
    }
    let sum = xs.iter().fold(T::zero(), |acc, &x| acc + x);
    Some(sum / T::from_f64(xs.len() as f64))
}

/// Largest element of a sample (by primal value).
#[inline]
pub fn max_value<T: Scalar>(xs: &[T]) -> Option<T> {
    let (&first, rest) = xs.split_first()?;
    Some(rest.iter().fold(first, |m, &x| if x > m { x } else { m }))
}

/// Numerically stable `ln(mean(exp(x)))`.
///
/// # Mathematical Definition
/// ```text
/// m = max(x)
/// log_mean_exp(x) = m + ln(mean(exp(x - m)))
/// ```
///
/// Subtracting the maximum keeps every exponent at or below zero, so the
/// result is finite whenever the inputs are, however large they are.
///
/// # Examples
/// ```
/// use hedge_core::math::log_mean_exp;
///
/// let value = log_mean_exp(&[0.0_f64, 0.0]).unwrap();
/// assert!(value.abs() < 1e-15);
///
/// // exp(1e4) overflows f64, the stabilised form does not
/// let large = log_mean_exp(&[1e4_f64, 1e4 - 1.0]).unwrap();
/// assert!(large.is_finite());
/// ```
pub fn log_mean_exp<T: Scalar>(xs: &[T]) -> Option<T> {
    let m = max_value(xs)?;
    if m.real().is_infinite() {
        return Some(m);
    }
    let shifted: T = xs.iter().fold(T::zero(), |acc, &x| acc + (x - m).exp());
    Some(m + (shifted / T::from_f64(xs.len() as f64)).ln())
}
