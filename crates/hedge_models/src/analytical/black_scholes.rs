//! Black-Scholes pricing for European call options with dividend yield.
//!
//! ## Mathematical Formulas
//!
//! ```text
//! d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! d₂ = d₁ - σ√T
//! C  = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! Δ  = e^(-qT)·N(d₁)
//! Γ  = e^(-qT)·φ(d₁) / (S·σ·√T)
//! ν  = S·e^(-qT)·φ(d₁)·√T
//! ```

use hedge_core::math::scalar;
use hedge_core::traits::Scalar;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// European call option under Black-Scholes dynamics.
///
/// An immutable value object holding the six contract/market parameters.
/// All parameters are validated at construction, so every formula below is
/// evaluated on a well-defined domain.
///
/// # Type Parameters
/// * `T` - Scalar type implementing `Scalar` (e.g., `f64`, `Dual64`)
///
/// # Examples
/// ```
/// use hedge_models::analytical::BlackScholesCallOption;
///
/// let call = BlackScholesCallOption::new(100.0_f64, 100.0, 0.05, 0.0, 1.0, 0.2).unwrap();
/// assert!((call.price() - 10.4506).abs() < 1e-3);
/// assert!(call.delta() > 0.5 && call.delta() < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesCallOption<T: Scalar> {
    /// Spot price (S)
    spot: T,
    /// Strike price (K)
    strike: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend: T,
    /// Time to maturity in years (T)
    maturity: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Scalar> BlackScholesCallOption<T> {
    /// Creates a new call option.
    ///
    /// # Arguments
    /// * `spot` - Current price of the underlying (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, any finite value)
    /// * `dividend` - Continuous dividend yield (annualised, any finite value)
    /// * `maturity` - Time to maturity in years (must be positive)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidMaturity` if maturity <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    /// - `AnalyticalError::NonFinite` if any parameter is NaN or infinite
    ///
    /// # Examples
    /// ```
    /// use hedge_models::analytical::BlackScholesCallOption;
    ///
    /// assert!(BlackScholesCallOption::new(100.0_f64, 0.0, 0.05, 0.0, 1.0, 0.2).is_err());
    /// assert!(BlackScholesCallOption::new(100.0_f64, 100.0, 0.05, 0.0, 0.0, 0.2).is_err());
    /// assert!(BlackScholesCallOption::new(100.0_f64, 100.0, 0.05, 0.0, 1.0, 0.0).is_err());
    /// ```
    pub fn new(
        spot: T,
        strike: T,
        rate: T,
        dividend: T,
        maturity: T,
        volatility: T,
    ) -> Result<Self, AnalyticalError> {
        let as_f64 = |x: T| x.real();

        for (name, value) in [
            ("spot", spot),
            ("strike", strike),
            ("rate", rate),
            ("dividend", dividend),
            ("maturity", maturity),
            ("volatility", volatility),
        ] {
            if !value.is_finite() {
                return Err(AnalyticalError::NonFinite {
                    name,
                    value: as_f64(value),
                });
            }
        }

        let zero = T::zero();
        if spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: as_f64(spot),
            });
        }
        if strike <= zero {
            return Err(AnalyticalError::InvalidStrike {
                strike: as_f64(strike),
            });
        }
        if maturity <= zero {
            return Err(AnalyticalError::InvalidMaturity {
                maturity: as_f64(maturity),
            });
        }
        if volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: as_f64(volatility),
            });
        }

        Ok(Self {
            spot,
            strike,
            rate,
            dividend,
            maturity,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the time to maturity.
    #[inline]
    pub fn maturity(&self) -> T {
        self.maturity
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Same contract re-quoted at another spot price.
    ///
    /// # Errors
    /// Same validation as [`BlackScholesCallOption::new`].
    pub fn with_spot(&self, spot: T) -> Result<Self, AnalyticalError> {
        Self::new(
            spot,
            self.strike,
            self.rate,
            self.dividend,
            self.maturity,
            self.volatility,
        )
    }

    /// Same contract with a different remaining time to maturity.
    ///
    /// # Errors
    /// Same validation as [`BlackScholesCallOption::new`].
    pub fn with_maturity(&self, maturity: T) -> Result<Self, AnalyticalError> {
        Self::new(
            self.spot,
            self.strike,
            self.rate,
            self.dividend,
            maturity,
            self.volatility,
        )
    }

    #[inline]
    fn vol_sqrt_t(&self) -> T {
        self.volatility * self.maturity.sqrt()
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> T {
        let half = scalar::<T>(0.5);
        let log_moneyness = (self.spot / self.strike).ln();
        let drift =
            (self.rate - self.dividend + half * self.volatility * self.volatility) * self.maturity;
        (log_moneyness + drift) / self.vol_sqrt_t()
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> T {
        self.d1() - self.vol_sqrt_t()
    }

    /// Dividend discount factor e^(-qT).
    #[inline]
    fn dividend_discount(&self) -> T {
        (-self.dividend * self.maturity).exp()
    }

    /// Call price, C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂).
    ///
    /// As σ → 0 the price converges to the discounted intrinsic value.
    ///
    /// # Examples
    /// ```
    /// use hedge_models::analytical::BlackScholesCallOption;
    ///
    /// let call = BlackScholesCallOption::new(110.0_f64, 100.0, 0.0, 0.0, 1.0, 1e-4).unwrap();
    /// assert!((call.price() - 10.0).abs() < 1e-8);
    /// ```
    #[inline]
    pub fn price(&self) -> T {
        let discount = (-self.rate * self.maturity).exp();
        self.spot * self.dividend_discount() * norm_cdf(self.d1())
            - self.strike * discount * norm_cdf(self.d2())
    }

    /// Delta (∂C/∂S) = e^(-qT)·N(d₁), bounded in [0, e^(-qT)].
    #[inline]
    pub fn delta(&self) -> T {
        self.dividend_discount() * norm_cdf(self.d1())
    }

    /// Gamma (∂²C/∂S²) = e^(-qT)·φ(d₁) / (S·σ·√T).
    #[inline]
    pub fn gamma(&self) -> T {
        self.dividend_discount() * norm_pdf(self.d1()) / (self.spot * self.vol_sqrt_t())
    }

    /// Vega (∂C/∂σ) = S·e^(-qT)·φ(d₁)·√T.
    #[inline]
    pub fn vega(&self) -> T {
        self.spot * self.dividend_discount() * norm_pdf(self.d1()) * self.maturity.sqrt()
    }
}
