//! European call payoff.
//!
//! ```text
//! payoff(S_T) = max(S_T, K) - K
//! ```
//!
//! The result is exactly zero at and below the strike, including its
//! derivative part under dual numbers.

use hedge_core::traits::Scalar;

/// Terminal payoff of a single European call.
///
/// # Examples
/// ```
/// use hedge_models::instruments::european_call_payoff_scalar;
///
/// assert_eq!(european_call_payoff_scalar(150.0_f64, 100.0), 50.0);
/// assert_eq!(european_call_payoff_scalar(80.0_f64, 100.0), 0.0);
/// ```
#[inline]
pub fn european_call_payoff_scalar<T: Scalar>(terminal: T, strike: T) -> T {
    let upper = if terminal > strike { terminal } else { strike };
    upper - strike
}

/// Elementwise European call payoff over a sample of terminal prices.
///
/// An empty input yields an empty output.
///
/// # Examples
/// ```
/// use hedge_models::instruments::european_call_payoff;
///
/// let payoff = european_call_payoff(&[150.0_f64, 80.0, 100.0], 100.0);
/// assert_eq!(payoff, vec![50.0, 0.0, 0.0]);
/// ```
pub fn european_call_payoff<T: Scalar>(terminal: &[T], strike: T) -> Vec<T> {
    terminal
        .iter()
        .map(|&x| european_call_payoff_scalar(x, strike))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_in_the_money() {
        assert_relative_eq!(european_call_payoff_scalar(150.0_f64, 100.0), 50.0);
    }

    #[test]
    fn test_out_of_the_money() {
        assert_eq!(european_call_payoff_scalar(80.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_at_the_money() {
        assert_eq!(european_call_payoff_scalar(100.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_empty_slice() {
        assert!(european_call_payoff::<f64>(&[], 100.0).is_empty());
    }

    #[test]
    fn test_payoff_non_negative() {
        let terminal = [0.5_f64, 99.999, 100.0, 100.001, 1e6];
        for p in european_call_payoff(&terminal, 100.0) {
            assert!(p >= 0.0);
        }
    }

    #[test]
    fn test_dual_derivative() {
        use num_dual::Dual64;

        let itm = european_call_payoff_scalar(Dual64::new(120.0, 1.0), Dual64::new(100.0, 0.0));
        assert_eq!(itm.re, 20.0);
        assert_eq!(itm.eps, 1.0);

        let otm = european_call_payoff_scalar(Dual64::new(90.0, 1.0), Dual64::new(100.0, 0.0));
        assert_eq!(otm.re, 0.0);
        assert_eq!(otm.eps, 0.0);
    }
}
