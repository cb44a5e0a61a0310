//! Dual number type integration for automatic differentiation.
//!
//! This module provides a type alias for num-dual's Dual64 type, enabling
//! forward-mode automatic differentiation of hedging losses and option
//! prices through the same generic code that evaluates them on `f64`.
//!
//! ## Usage
//!
//! ```
//! use hedge_core::types::dual::{seeded, DualNumber};
//!
//! let x = seeded(3.0);          // dx/dx = 1
//! let y: DualNumber = x * x;    // y = x²
//! assert_eq!(y.re, 9.0);
//! assert_eq!(y.eps, 6.0);       // dy/dx = 2x
//! ```

/// Type alias for num-dual's Dual64 (f64-based dual numbers).
///
/// This type supports first-order automatic differentiation with:
/// - `re`: Real part (function value)
/// - `eps`: Dual part (derivative along the seeded direction)
pub type DualNumber = num_dual::Dual64;

/// A dual number carrying no derivative (a constant).
#[inline]
pub fn constant(value: f64) -> DualNumber {
    DualNumber::new(value, 0.0)
}

/// A dual number seeded as the differentiation variable (`eps = 1`).
#[inline]
pub fn seeded(value: f64) -> DualNumber {
    DualNumber::new(value, 1.0)
}

/// A dual number with an arbitrary tangent, for directional derivatives.
#[inline]
pub fn with_tangent(value: f64, tangent: f64) -> DualNumber {
    DualNumber::new(value, tangent)
}
