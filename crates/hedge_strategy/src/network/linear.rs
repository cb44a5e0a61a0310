//! Dense affine layer.
//!
//! # Memory Layout
//!
//! Weights are stored row-major with one row per output:
//! `weights[o * in_features + i]`.

use hedge_models::rng::HedgeRng;
use hedge_core::traits::Scalar;

use super::error::NetworkError;

/// Affine map `y = W x + b`.
///
/// # Type Parameters
/// * `T` - Scalar type implementing `Scalar` (e.g., `f64`, `Dual64`)
#[derive(Debug, Clone, PartialEq)]
pub struct Linear<T: Scalar> {
    weights: Vec<T>,
    biases: Vec<T>,
    in_features: usize,
    out_features: usize,
}

impl<T: Scalar> Linear<T> {
    /// Creates a layer from explicit weights and biases.
    ///
    /// # Errors
    /// - `NetworkError::Empty` if either width is zero
    /// - `NetworkError::LayerShape` if a buffer has the wrong length
    ///
    /// # Examples
    /// ```
    /// use hedge_strategy::network::Linear;
    ///
    /// // y = 2x + 1
    /// let layer = Linear::new(vec![2.0_f64], vec![1.0], 1, 1).unwrap();
    /// assert_eq!(layer.forward(&[3.0]).unwrap(), vec![7.0]);
    /// ```
    pub fn new(
        weights: Vec<T>,
        biases: Vec<T>,
        in_features: usize,
        out_features: usize,
    ) -> Result<Self, NetworkError> {
        if in_features == 0 || out_features == 0 {
            return Err(NetworkError::Empty(format!(
                "layer shape {} -> {}",
                in_features, out_features
            )));
        }
        if weights.len() != in_features * out_features {
            return Err(NetworkError::LayerShape {
                what: "weights",
                expected: in_features * out_features,
                got: weights.len(),
            });
        }
        if biases.len() != out_features {
            return Err(NetworkError::LayerShape {
                what: "biases",
                expected: out_features,
                got: biases.len(),
            });
        }
        Ok(Self {
            weights,
            biases,
            in_features,
            out_features,
        })
    }

    /// Input width.
    #[inline]
    pub fn in_features(&self) -> usize {
        self.in_features
    }

    /// Output width.
    #[inline]
    pub fn out_features(&self) -> usize {
        self.out_features
    }

    /// Number of trainable scalars, weights plus biases.
    #[inline]
    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// Weight matrix, row-major by output.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Bias vector.
    #[inline]
    pub fn biases(&self) -> &[T] {
        &self.biases
    }

    /// Applies the layer.
    ///
    /// # Errors
    /// `NetworkError::InputSize` if `input.len() != in_features`.
    pub fn forward(&self, input: &[T]) -> Result<Vec<T>, NetworkError> {
        if input.len() != self.in_features {
            return Err(NetworkError::InputSize {
                expected: self.in_features,
                got: input.len(),
            });
        }
        Ok(self
            .weights
            .chunks_exact(self.in_features)
            .zip(&self.biases)
            .map(|(row, &b)| {
                row.iter()
                    .zip(input)
                    .fold(b, |acc, (&w, &x)| acc + w * x)
            })
            .collect())
    }

    /// Appends weights then biases to `out`.
    pub(crate) fn extend_parameters(&self, out: &mut Vec<T>) {
        out.extend_from_slice(&self.weights);
        out.extend_from_slice(&self.biases);
    }

    /// Overwrites weights then biases from the front of `params`, returning
    /// the unread remainder. The caller has checked the length.
    pub(crate) fn load_parameters<'a>(&mut self, params: &'a [T]) -> &'a [T] {
        let (w, rest) = params.split_at(self.weights.len());
        let (b, rest) = rest.split_at(self.biases.len());
        self.weights.copy_from_slice(w);
        self.biases.copy_from_slice(b);
        rest
    }

    /// Same shape with weights then biases taken from the front of
    /// `params` in another scalar type, returning the unread remainder.
    /// The caller has checked the length.
    pub(crate) fn rebuild<'a, U: Scalar>(&self, params: &'a [U]) -> (Linear<U>, &'a [U]) {
        let (w, rest) = params.split_at(self.weights.len());
        let (b, rest) = rest.split_at(self.biases.len());
        let layer = Linear {
            weights: w.to_vec(),
            biases: b.to_vec(),
            in_features: self.in_features,
            out_features: self.out_features,
        };
        (layer, rest)
    }
}

impl Linear<f64> {
    /// Creates a layer with every weight and bias drawn from
    /// `U(-1/√in_features, 1/√in_features)`.
    ///
    /// # Errors
    /// `NetworkError::Empty` if either width is zero.
    pub fn random(
        in_features: usize,
        out_features: usize,
        rng: &mut HedgeRng,
    ) -> Result<Self, NetworkError> {
        let bound = 1.0 / (in_features.max(1) as f64).sqrt();
        let weights = (0..in_features * out_features)
            .map(|_| rng.gen_uniform_range(-bound, bound))
            .collect();
        let biases = (0..out_features)
            .map(|_| rng.gen_uniform_range(-bound, bound))
            .collect();
        Self::new(weights, biases, in_features, out_features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_matrix_vector() {
        // W = [[1, 2], [3, 4], [5, 6]], b = [0.5, -0.5, 0]
        let layer = Linear::new(
            vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![0.5, -0.5, 0.0],
            2,
            3,
        )
        .unwrap();
        assert_eq!(layer.forward(&[1.0, -1.0]).unwrap(), vec![-0.5, -1.5, -1.0]);
    }

    #[test]
    fn test_shape_validation() {
        assert!(matches!(
            Linear::new(vec![1.0_f64; 3], vec![0.0; 2], 2, 2),
            Err(NetworkError::LayerShape { what: "weights", .. })
        ));
        assert!(matches!(
            Linear::new(vec![1.0_f64; 4], vec![0.0; 3], 2, 2),
            Err(NetworkError::LayerShape { what: "biases", .. })
        ));
        assert!(matches!(
            Linear::<f64>::new(vec![], vec![], 0, 2),
            Err(NetworkError::Empty(_))
        ));
    }

    #[test]
    fn test_forward_rejects_wrong_width() {
        let layer = Linear::new(vec![1.0_f64, 1.0], vec![0.0], 2, 1).unwrap();
        assert_eq!(
            layer.forward(&[1.0]),
            Err(NetworkError::InputSize {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_random_within_bounds() {
        let mut rng = HedgeRng::from_seed(3);
        let layer = Linear::random(4, 16, &mut rng).unwrap();
        assert_eq!(layer.num_parameters(), 4 * 16 + 16);
        assert!(layer
            .weights()
            .iter()
            .chain(layer.biases())
            .all(|w| w.abs() <= 0.5));
    }

    #[test]
    fn test_parameter_round_trip() {
        let mut layer = Linear::new(vec![1.0_f64, 2.0], vec![3.0], 2, 1).unwrap();
        let mut flat = Vec::new();
        layer.extend_parameters(&mut flat);
        assert_eq!(flat, vec![1.0, 2.0, 3.0]);

        let rest = layer.load_parameters(&[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(rest, &[7.0]);
        assert_eq!(layer.weights(), &[4.0, 5.0]);
        assert_eq!(layer.biases(), &[6.0]);
    }
}
