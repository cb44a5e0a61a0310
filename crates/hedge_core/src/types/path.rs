//! Simulated price paths.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[sim * num_timesteps + t]`
//! where `t = 0` holds the initial price of simulation `sim`.

use crate::traits::Scalar;

use super::error::PathError;

/// Dense array of simulated prices, shape (num_simulations, num_timesteps).
///
/// Invariants enforced at construction:
/// - at least one simulation and one timestep
/// - buffer length equals `num_simulations * num_timesteps`
/// - every price is finite and strictly positive
///
/// The type is immutable after construction; consumers read it through
/// slices and column copies.
///
/// # Type Parameters
/// * `T` - Scalar type implementing `Scalar` (e.g., `f64`, `Dual64`)
///
/// # Examples
/// ```
/// use hedge_core::types::PricePath;
///
/// let paths = PricePath::new(vec![100.0_f64, 102.0, 100.0, 97.0], 2, 2).unwrap();
/// assert_eq!(paths.price(1, 1), 97.0);
/// assert_eq!(paths.increments(0), vec![2.0, -3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath<T: Scalar> {
    values: Vec<T>,
    num_simulations: usize,
    num_timesteps: usize,
}

impl<T: Scalar> PricePath<T> {
    /// Creates a path array from a row-major buffer.
    ///
    /// # Errors
    /// - `PathError::EmptyDimension` if either dimension is zero
    /// - `PathError::ShapeOverflow` if the element count overflows `usize`
    /// - `PathError::LengthMismatch` if the buffer length does not match
    /// - `PathError::NonPositivePrice` for the first non-positive or non-finite price
    pub fn new(
        values: Vec<T>,
        num_simulations: usize,
        num_timesteps: usize,
    ) -> Result<Self, PathError> {
        if num_simulations == 0 || num_timesteps == 0 {
            return Err(PathError::EmptyDimension {
                num_simulations,
                num_timesteps,
            });
        }

        let expected = num_simulations.checked_mul(num_timesteps).ok_or(
            PathError::ShapeOverflow {
                num_simulations,
                num_timesteps,
            },
        )?;
        if values.len() != expected {
            return Err(PathError::LengthMismatch {
                expected,
                got: values.len(),
            });
        }

        let zero = T::zero();
        if let Some((idx, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(**v > zero && v.is_finite()))
        {
            return Err(PathError::NonPositivePrice {
                simulation: idx / num_timesteps,
                timestep: idx % num_timesteps,
                value: value.real(),
            });
        }

        Ok(Self {
            values,
            num_simulations,
            num_timesteps,
        })
    }

    /// Creates a path array from one vector per simulation.
    ///
    /// # Errors
    /// - `PathError::RaggedRows` if rows differ in length
    /// - any error of [`PricePath::new`]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, PathError> {
        let num_simulations = rows.len();
        let num_timesteps = rows.first().map_or(0, Vec::len);

        let mut values = Vec::with_capacity(num_simulations.saturating_mul(num_timesteps));
        for (row, prices) in rows.into_iter().enumerate() {
            if prices.len() != num_timesteps {
                return Err(PathError::RaggedRows {
                    row,
                    expected: num_timesteps,
                    got: prices.len(),
                });
            }
            values.extend(prices);
        }

        Self::new(values, num_simulations, num_timesteps)
    }

    /// Returns the number of simulations (rows).
    #[inline]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Returns the number of price observations per simulation (columns).
    #[inline]
    pub fn num_timesteps(&self) -> usize {
        self.num_timesteps
    }

    /// Returns `(num_simulations, num_timesteps)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_simulations, self.num_timesteps)
    }

    /// Returns the price of simulation `sim` at timestep `t`.
    ///
    /// # Panics
    /// Panics if `sim` or `t` is out of range.
    #[inline]
    pub fn price(&self, sim: usize, t: usize) -> T {
        assert!(t < self.num_timesteps, "timestep out of range");
        self.values[sim * self.num_timesteps + t]
    }

    /// Returns all prices of simulation `sim`.
    ///
    /// # Panics
    /// Panics if `sim` is out of range.
    #[inline]
    pub fn row(&self, sim: usize) -> &[T] {
        let start = sim * self.num_timesteps;
        &self.values[start..start + self.num_timesteps]
    }

    /// Returns the prices of every simulation at timestep `t`.
    ///
    /// # Panics
    /// Panics if `t` is out of range.
    pub fn column(&self, t: usize) -> Vec<T> {
        assert!(t < self.num_timesteps, "timestep out of range");
        self.values
            .chunks_exact(self.num_timesteps)
            .map(|row| row[t])
            .collect()
    }

    /// Initial prices, column 0.
    #[inline]
    pub fn initial_prices(&self) -> Vec<T> {
        self.column(0)
    }

    /// Terminal prices, last column.
    #[inline]
    pub fn terminal_prices(&self) -> Vec<T> {
        self.column(self.num_timesteps - 1)
    }

    /// Price increments `price[t + 1] - price[t]` for every simulation.
    ///
    /// # Panics
    /// Panics if `t + 1 >= num_timesteps`.
    pub fn increments(&self, t: usize) -> Vec<T> {
        assert!(t + 1 < self.num_timesteps, "increment index out of range");
        self.values
            .chunks_exact(self.num_timesteps)
            .map(|row| row[t + 1] - row[t])
            .collect()
    }

    /// Row-major view of the underlying buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Converts every price into another scalar type.
    ///
    /// Used to lift `f64` paths into dual numbers; the converted prices carry
    /// no derivative. The result is validated like any new path.
    ///
    /// # Errors
    /// `PathError::NonPositivePrice` if a converted price is not positive
    /// and finite in the target type.
    pub fn cast<U: Scalar>(&self) -> Result<PricePath<U>, PathError> {
        let values = self
            .values
            .iter()
            .map(|v| U::from_f64(v.real()))
            .collect();
        PricePath::new(values, self.num_simulations, self.num_timesteps)
    }
}
