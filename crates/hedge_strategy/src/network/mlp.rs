//! Multi-layer perceptron with ReLU hidden activations.

use hedge_core::math::relu;
use hedge_models::rng::HedgeRng;
use hedge_core::traits::Scalar;

use super::error::NetworkError;
use super::linear::Linear;

/// Stack of [`Linear`] layers with ReLU between consecutive layers and an
/// affine output.
///
/// # Examples
/// ```
/// use hedge_models::rng::HedgeRng;
/// use hedge_strategy::network::Mlp;
///
/// let mut rng = HedgeRng::from_seed(1);
/// let mlp = Mlp::random(&[1, 8, 8, 1], &mut rng).unwrap();
/// assert_eq!(mlp.input_size(), 1);
/// assert_eq!(mlp.output_size(), 1);
/// assert_eq!(mlp.num_parameters(), (8 + 8) + (64 + 8) + (8 + 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp<T: Scalar> {
    layers: Vec<Linear<T>>,
}

impl<T: Scalar> Mlp<T> {
    /// Creates an approximator from chained layers.
    ///
    /// # Errors
    /// - `NetworkError::Empty` if `layers` is empty
    /// - `NetworkError::LayerChain` if a layer's input width differs from
    ///   the previous layer's output width
    pub fn new(layers: Vec<Linear<T>>) -> Result<Self, NetworkError> {
        if layers.is_empty() {
            return Err(NetworkError::Empty("no layers".to_string()));
        }
        for (idx, pair) in layers.windows(2).enumerate() {
            if pair[1].in_features() != pair[0].out_features() {
                return Err(NetworkError::LayerChain {
                    layer: idx + 1,
                    expected: pair[1].in_features(),
                    got: pair[0].out_features(),
                });
            }
        }
        Ok(Self { layers })
    }

    /// Input width of the first layer.
    #[inline]
    pub fn input_size(&self) -> usize {
        self.layers[0].in_features()
    }

    /// Output width of the last layer.
    #[inline]
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].out_features()
    }

    /// The layers, input first.
    #[inline]
    pub fn layers(&self) -> &[Linear<T>] {
        &self.layers
    }

    /// Number of trainable scalars across all layers.
    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(Linear::num_parameters).sum()
    }

    /// Evaluates the approximator.
    ///
    /// # Errors
    /// `NetworkError::InputSize` if `input.len() != input_size()`.
    pub fn forward(&self, input: &[T]) -> Result<Vec<T>, NetworkError> {
        let last = self.layers.len() - 1;
        let mut activations = input.to_vec();
        for (idx, layer) in self.layers.iter().enumerate() {
            activations = layer.forward(&activations)?;
            if idx < last {
                activations.iter_mut().for_each(|a| *a = relu(*a));
            }
        }
        Ok(activations)
    }

    /// Evaluates a scalar-in/scalar-out approximator.
    ///
    /// # Errors
    /// `NetworkError::InputSize` if the approximator is not `1 -> 1`.
    pub fn forward_scalar(&self, x: T) -> Result<T, NetworkError> {
        let output = self.forward(&[x])?;
        match output.as_slice() {
            [y] => Ok(*y),
            other => Err(NetworkError::InputSize {
                expected: 1,
                got: other.len(),
            }),
        }
    }

    /// Flat parameter vector, layer by layer, weights before biases.
    pub fn parameters(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.num_parameters());
        for layer in &self.layers {
            layer.extend_parameters(&mut out);
        }
        out
    }

    /// Overwrites every parameter in [`Mlp::parameters`] order.
    ///
    /// # Errors
    /// `NetworkError::ParameterCount` if the length differs; nothing is
    /// written in that case.
    pub fn set_parameters(&mut self, params: &[T]) -> Result<(), NetworkError> {
        self.check_count(params.len())?;
        let mut rest = params;
        for layer in &mut self.layers {
            rest = layer.load_parameters(rest);
        }
        Ok(())
    }

    /// Same architecture over another scalar type with the given
    /// parameters, e.g. dual numbers seeded for differentiation.
    ///
    /// # Errors
    /// `NetworkError::ParameterCount` if the length differs.
    pub fn with_parameters<U: Scalar>(&self, params: &[U]) -> Result<Mlp<U>, NetworkError> {
        self.check_count(params.len())?;
        let mut rest = params;
        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let (rebuilt, remaining) = layer.rebuild(rest);
            layers.push(rebuilt);
            rest = remaining;
        }
        Ok(Mlp { layers })
    }

    /// Converts every parameter into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Mlp<U> {
        let params: Vec<U> = self
            .parameters()
            .into_iter()
            .map(|p| U::from_f64(p.real()))
            .collect();
        let mut rest = params.as_slice();
        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let (rebuilt, remaining) = layer.rebuild(rest);
            layers.push(rebuilt);
            rest = remaining;
        }
        Mlp { layers }
    }

    fn check_count(&self, got: usize) -> Result<(), NetworkError> {
        let expected = self.num_parameters();
        if got != expected {
            return Err(NetworkError::ParameterCount { expected, got });
        }
        Ok(())
    }
}

impl Mlp<f64> {
    /// Randomly initialised approximator with the given layer widths,
    /// input first.
    ///
    /// # Errors
    /// `NetworkError::Empty` if fewer than two widths are given or any
    /// width is zero.
    pub fn random(sizes: &[usize], rng: &mut HedgeRng) -> Result<Self, NetworkError> {
        if sizes.len() < 2 {
            return Err(NetworkError::Empty(format!(
                "need at least two layer widths, got {}",
                sizes.len()
            )));
        }
        let layers = sizes
            .windows(2)
            .map(|w| Linear::random(w[0], w[1], rng))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 1 -> 2 -> 1 with hand-picked weights.
    fn tiny() -> Mlp<f64> {
        let hidden = Linear::new(vec![1.0, -1.0], vec![0.0, 0.5], 1, 2).unwrap();
        let output = Linear::new(vec![2.0, 3.0], vec![-1.0], 2, 1).unwrap();
        Mlp::new(vec![hidden, output]).unwrap()
    }

    #[test]
    fn test_forward_applies_relu_between_layers() {
        let mlp = tiny();
        // x = 1: hidden = relu([1, -0.5]) = [1, 0] -> 2 - 1 = 1
        assert_relative_eq!(mlp.forward_scalar(1.0).unwrap(), 1.0);
        // x = -1: hidden = relu([-1, 1.5]) = [0, 1.5] -> 4.5 - 1 = 3.5
        assert_relative_eq!(mlp.forward_scalar(-1.0).unwrap(), 3.5);
    }

    #[test]
    fn test_no_activation_on_output() {
        let mlp = tiny();
        let negative = Mlp::new(vec![Linear::new(vec![1.0], vec![-5.0], 1, 1).unwrap()]).unwrap();
        assert_eq!(negative.forward_scalar(0.0).unwrap(), -5.0);
        assert_relative_eq!(mlp.forward_scalar(0.0).unwrap(), 0.5);
    }

    #[test]
    fn test_layer_chain_validation() {
        let a = Linear::new(vec![1.0_f64; 2], vec![0.0; 2], 1, 2).unwrap();
        let b = Linear::new(vec![1.0_f64; 3], vec![0.0], 3, 1).unwrap();
        assert_eq!(
            Mlp::new(vec![a, b]),
            Err(NetworkError::LayerChain {
                layer: 1,
                expected: 3,
                got: 2
            })
        );
        assert!(Mlp::<f64>::new(vec![]).is_err());
    }

    #[test]
    fn test_forward_scalar_rejects_vector_output() {
        let layer = Linear::new(vec![1.0_f64, 1.0], vec![0.0, 0.0], 1, 2).unwrap();
        let mlp = Mlp::new(vec![layer]).unwrap();
        assert!(mlp.forward_scalar(1.0).is_err());
    }

    #[test]
    fn test_parameters_round_trip() {
        let mut mlp = tiny();
        let params = mlp.parameters();
        assert_eq!(params, vec![1.0, -1.0, 0.0, 0.5, 2.0, 3.0, -1.0]);

        let doubled: Vec<f64> = params.iter().map(|p| 2.0 * p).collect();
        mlp.set_parameters(&doubled).unwrap();
        assert_eq!(mlp.parameters(), doubled);

        assert_eq!(
            mlp.set_parameters(&[0.0; 3]),
            Err(NetworkError::ParameterCount {
                expected: 7,
                got: 3
            })
        );
        assert_eq!(mlp.parameters(), doubled);
    }

    #[test]
    fn test_with_parameters_dual_gradient() {
        use num_dual::Dual64;

        // Seed the output bias: d(output)/d(bias) = 1
        let mlp = tiny();
        let params: Vec<Dual64> = mlp
            .parameters()
            .iter()
            .enumerate()
            .map(|(k, &p)| Dual64::new(p, if k == 6 { 1.0 } else { 0.0 }))
            .collect();
        let dual = mlp.with_parameters(&params).unwrap();
        let y = dual.forward_scalar(Dual64::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(y.re, 1.0);
        assert_relative_eq!(y.eps, 1.0);
    }

    #[test]
    fn test_cast_preserves_output() {
        use num_dual::Dual64;

        let mlp = tiny();
        let dual: Mlp<Dual64> = mlp.cast();
        let y = dual.forward_scalar(Dual64::new(-1.0, 1.0)).unwrap();
        assert_relative_eq!(y.re, 3.5);
        // d/dx on x < 0: only the second hidden unit is active, -1 * 3
        assert_relative_eq!(y.eps, -3.0);
    }

    #[test]
    fn test_random_rejects_short_architecture() {
        let mut rng = HedgeRng::from_seed(0);
        assert!(Mlp::random(&[1], &mut rng).is_err());
        assert!(Mlp::random(&[1, 0, 1], &mut rng).is_err());
    }
}
