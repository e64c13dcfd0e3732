use crate::error::{NetError, Result};
use crate::layers::dense::Layer;
use crate::network::gradients::Gradients;

/// Plain gradient descent with a fixed learning rate η.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    /// Fails unless η is finite and strictly positive.
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetError::InvalidHyperparameter(format!(
                "learning rate must be finite and > 0, got {learning_rate}"
            )));
        }
        Ok(Sgd { learning_rate })
    }

    /// Applies already-averaged gradients to every layer.
    pub fn step(&self, layers: &mut [Layer], grads: &Gradients) {
        for (layer, (w_grad, b_grad)) in layers.iter_mut().zip(grads.iter()) {
            layer.apply_gradients(w_grad, b_grad, self.learning_rate);
        }
    }
}
