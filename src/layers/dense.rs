use rand::distributions::Uniform;
use rand::Rng;

use crate::math::matrix::{self, Matrix};

/// One non-input layer: `weights` is (size × input_size), one row per neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl Layer {
    /// Uniform random weights drawn from `dist`, zero biases.
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, dist: &Uniform<f64>, rng: &mut R) -> Layer {
        Layer {
            weights: Matrix::random(size, input_size, dist, rng),
            biases: vec![0.0; size],
        }
    }

    /// Neurons in this layer.
    pub fn size(&self) -> usize {
        self.weights.rows
    }

    /// Neurons in the layer feeding this one.
    pub fn input_size(&self) -> usize {
        self.weights.cols
    }

    /// z = W·a_prev + b
    pub fn pre_activation(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.mul_vec(input);
        matrix::axpy(&mut z, 1.0, &self.biases);
        z
    }

    /// W ← W − lr·∂W, b ← b − lr·∂b
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &[f64], lr: f64) {
        self.weights.axpy(-lr, weights_grad);
        matrix::axpy(&mut self.biases, -lr, biases_grad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_layer_has_zero_biases_and_bounded_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        let dist = Uniform::new_inclusive(-0.5, 0.5);
        let layer = Layer::new(3, 4, &dist, &mut rng);
        assert_eq!((layer.size(), layer.input_size()), (3, 4));
        assert_eq!(layer.biases, vec![0.0; 3]);
        assert!(layer.weights.iter().all(|w| (-0.5..=0.5).contains(w)));
    }

    #[test]
    fn pre_activation_is_affine() {
        let layer = Layer {
            weights: Matrix::from_data(vec![vec![1.0, 2.0], vec![0.0, -1.0]]).unwrap(),
            biases: vec![0.5, 1.0],
        };
        assert_eq!(layer.pre_activation(&[1.0, 1.0]), vec![3.5, 0.0]);
    }

    #[test]
    fn apply_gradients_steps_against_gradient() {
        let mut layer = Layer {
            weights: Matrix::from_data(vec![vec![1.0, 1.0]]).unwrap(),
            biases: vec![0.0],
        };
        let grad = Matrix::from_data(vec![vec![2.0, -2.0]]).unwrap();
        layer.apply_gradients(&grad, &[4.0], 0.5);
        assert_eq!(layer.weights.data[0], vec![0.0, 2.0]);
        assert_eq!(layer.biases, vec![-2.0]);
    }
}
