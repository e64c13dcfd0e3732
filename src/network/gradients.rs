use crate::layers::dense::Layer;
use crate::math::matrix::{self, Matrix};

/// ∂C/∂W and ∂C/∂b for every non-input layer, shaped like the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Vec<f64>>,
}

impl Gradients {
    pub fn zeros_like(layers: &[Layer]) -> Gradients {
        Gradients {
            weights: layers.iter()
                .map(|l| Matrix::zeros(l.weights.rows, l.weights.cols))
                .collect(),
            biases: layers.iter().map(|l| vec![0.0; l.biases.len()]).collect(),
        }
    }

    /// Element-wise `self += other`.
    pub fn accumulate(&mut self, other: &Gradients) {
        for (acc, g) in self.weights.iter_mut().zip(&other.weights) {
            acc.add_assign(g);
        }
        for (acc, g) in self.biases.iter_mut().zip(&other.biases) {
            matrix::axpy(acc, 1.0, g);
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for w in &mut self.weights {
            w.scale(factor);
        }
        for b in &mut self.biases {
            b.iter_mut().for_each(|x| *x *= factor);
        }
    }

    /// `(weight gradient, bias gradient)` per layer.
    pub fn iter(&self) -> impl Iterator<Item = (&Matrix, &[f64])> {
        self.weights.iter().zip(self.biases.iter().map(Vec::as_slice))
    }
}
