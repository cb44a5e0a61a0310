//! Standard normal distribution functions.
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Scalar`, so the
//! Black-Scholes formulas built on them differentiate under dual numbers.

use hedge_core::math::scalar;
use hedge_core::traits::Scalar;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 7.1.26 coefficients, lowest order first.
const ERFC_COEFFS: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Abramowitz and Stegun 7.1.26 scale factor.
const ERFC_P: f64 = 0.327_591_1;

/// Complementary error function, maximum absolute error 1.5e-7.
///
/// ```text
/// erfc(|x|) ≈ t·P(t)·exp(-x²),  t = 1 / (1 + p|x|)
/// erfc(-x)  = 2 - erfc(x)
/// ```
#[inline]
fn erfc<T: Scalar>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();
    let t = one / (one + scalar::<T>(ERFC_P) * abs_x);

    // Horner evaluation from the highest coefficient down
    let poly = ERFC_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &c| acc * t + scalar(c));

    let tail = t * poly * (-abs_x * abs_x).exp();
    if x < T::zero() {
        scalar::<T>(2.0) - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / √2) / 2, accurate to about 1e-7 and bounded in [0, 1].
///
/// # Examples
/// ```
/// use hedge_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Scalar>(x: T) -> T {
    let arg = -x / scalar(std::f64::consts::SQRT_2);
    scalar::<T>(0.5) * erfc(arg)
}

/// Standard normal probability density function, φ(x) = exp(-x²/2) / √(2π).
///
/// # Examples
/// ```
/// use hedge_models::analytical::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Scalar>(x: T) -> T {
    scalar::<T>(FRAC_1_SQRT_2PI) * (scalar::<T>(-0.5) * x * x).exp()
}
