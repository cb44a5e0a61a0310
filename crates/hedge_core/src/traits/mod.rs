//! Core numeric traits.
//!
//! Every computation in the workspace is generic over [`Scalar`] so that the
//! same code runs on `f64` for evaluation and on dual numbers when a caller
//! needs derivatives. Implementations use static dispatch only.
//!
//! `Dual64` does not implement `num_traits::Float`, so [`Scalar`] asks only
//! for field arithmetic, ordering by primal value and the elementary
//! functions used by the pricing and risk formulas.

use std::fmt::Debug;
use std::iter::Sum;

use num_traits::{NumAssignOps, NumOps, One, Zero};

/// Differentiable real scalar.
///
/// Implemented for `f64` and, with the `num-dual-mode` feature, for
/// `num_dual::Dual64`. Comparisons (`PartialOrd`) and [`Scalar::real`] look
/// at the primal value only; arithmetic and the elementary functions carry
/// derivatives along.
///
/// # Examples
/// ```
/// use hedge_core::traits::Scalar;
///
/// fn discount<T: Scalar>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let df: f64 = discount(0.05, 1.0);
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + NumOps
    + NumAssignOps
    + std::ops::Neg<Output = Self>
    + Sum
    + 'static
{
    /// Lifts an `f64` constant (zero derivative).
    fn from_f64(value: f64) -> Self;

    /// Primal value.
    fn real(&self) -> f64;

    /// `e^x`
    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// `true` if the value and every derivative part are finite.
    fn is_finite(&self) -> bool;

    /// Larger of two values by primal value; ties keep `self`.
    #[inline]
    fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Smaller of two values by primal value; ties keep `self`.
    #[inline]
    fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn real(&self) -> f64 {
        *self
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

#[cfg(feature = "num-dual-mode")]
mod dual_impl {
    use super::Scalar;
    use num_dual::{Dual64, DualNum};

    impl Scalar for Dual64 {
        #[inline]
        fn from_f64(value: f64) -> Self {
            Dual64::from(value)
        }

        #[inline]
        fn real(&self) -> f64 {
            self.re
        }

        #[inline]
        fn exp(self) -> Self {
            DualNum::exp(&self)
        }

        #[inline]
        fn ln(self) -> Self {
            DualNum::ln(&self)
        }

        #[inline]
        fn sqrt(self) -> Self {
            DualNum::sqrt(&self)
        }

        #[inline]
        fn abs(self) -> Self {
            num_traits::Signed::abs(&self)
        }

        #[inline]
        fn is_finite(&self) -> bool {
            self.re.is_finite() && self.eps.is_finite()
        }
    }
}
