use rand::Rng;

use crate::activation::sigmoid::{sigmoid, sigmoid_prime};
use crate::data::Example;
use crate::error::{NetError, Result};
use crate::layers::dense::Layer;
use crate::loss::quadratic::QuadraticCost;
use crate::math::matrix::{self, Matrix};
use crate::network::gradients::Gradients;
use crate::network::init::WeightInit;
use crate::network::topology::Topology;
use crate::optim::sgd::Sgd;

/// Fully-connected sigmoid network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    topology: Topology,
    layers: Vec<Layer>,
}

/// Values cached by one forward pass and consumed by the backward pass.
///
/// `activations[0]` is the raw input; `pre_activations[l]` and
/// `activations[l + 1]` belong to network layer `l + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub pre_activations: Vec<Vec<f64>>,
    pub activations: Vec<Vec<f64>>,
}

impl ForwardPass {
    pub fn output(&self) -> &[f64] {
        self.activations.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Network {
    /// Random weights from `init`, zero biases, drawing from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(sizes: &[usize], init: WeightInit, rng: &mut R) -> Result<Network> {
        let topology = Topology::new(sizes.to_vec())?;
        let dist = init.validated()?.distribution();
        let layers = topology.layer_shapes()
            .map(|(size, input_size)| Layer::new(size, input_size, &dist, rng))
            .collect();
        Ok(Network { topology, layers })
    }

    /// Same as [`Network::with_rng`] using the thread-local generator.
    pub fn new(sizes: &[usize], init: WeightInit) -> Result<Network> {
        Network::with_rng(sizes, init, &mut rand::thread_rng())
    }

    /// Builds a network from explicit layers, checking that consecutive shapes chain.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network> {
        let first = layers.first()
            .ok_or_else(|| NetError::InvalidTopology("network has no layers".into()))?;
        let mut sizes = vec![first.input_size()];
        for (i, layer) in layers.iter().enumerate() {
            let expected_input = sizes[sizes.len() - 1];
            if layer.input_size() != expected_input {
                return Err(NetError::InvalidTopology(format!(
                    "layer {} takes {} inputs but the previous layer has {} neurons",
                    i + 1, layer.input_size(), expected_input
                )));
            }
            if layer.biases.len() != layer.size() {
                return Err(NetError::InvalidTopology(format!(
                    "layer {} has {} biases for {} neurons",
                    i + 1, layer.biases.len(), layer.size()
                )));
            }
            sizes.push(layer.size());
        }
        let topology = Topology::new(sizes)?;
        Ok(Network { topology, layers })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn sizes(&self) -> &[usize] {
        self.topology.sizes()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Forward pass; the returned context owns every cached z and σ(z).
    pub fn forward(&self, input: &[f64]) -> Result<ForwardPass> {
        self.check_input(input)?;
        Ok(self.forward_unchecked(input))
    }

    /// Output-layer activations for `input`.
    pub fn output(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut pass = self.forward(input)?;
        Ok(pass.activations.pop().unwrap_or_default())
    }

    /// Predicted class: index of the most active output neuron.
    pub fn feed_forward(&self, input: &[f64]) -> Result<usize> {
        Ok(argmax(self.forward(input)?.output()))
    }

    /// ∂C/∂W and ∂C/∂b of the quadratic cost for a single example.
    pub fn backprop(&self, example: &Example) -> Result<Gradients> {
        self.check_example(example)?;
        Ok(self.backprop_unchecked(example).0)
    }

    /// One gradient-descent step averaged over `batch`; returns the mean
    /// pre-update cost of the batch.
    ///
    /// Every example is validated before any parameter changes.
    pub fn train_mini_batch(&mut self, batch: &[Example], eta: f64) -> Result<f64> {
        if batch.is_empty() {
            return Err(NetError::EmptyBatch);
        }
        let optimizer = Sgd::new(eta)?;
        for example in batch {
            self.check_example(example)?;
        }

        let mut nabla = Gradients::zeros_like(&self.layers);
        let mut total_cost = 0.0;
        for example in batch {
            let (delta_nabla, cost) = self.backprop_unchecked(example);
            nabla.accumulate(&delta_nabla);
            total_cost += cost;
        }

        let inv_batch = 1.0 / batch.len() as f64;
        nabla.scale(inv_batch);
        optimizer.step(&mut self.layers, &nabla);

        Ok(total_cost * inv_batch)
    }

    pub fn check_input(&self, input: &[f64]) -> Result<()> {
        let expected = self.topology.input_size();
        if input.len() != expected {
            return Err(NetError::mismatch("input", expected, input.len()));
        }
        Ok(())
    }

    pub fn check_example(&self, example: &Example) -> Result<()> {
        self.check_input(&example.input)?;
        let expected = self.topology.output_size();
        if example.expected.len() != expected {
            return Err(NetError::mismatch("expected output", expected, example.expected.len()));
        }
        if !example.input.iter().all(|x| x.is_finite()) {
            return Err(NetError::NonFinite("input"));
        }
        if !example.expected.iter().all(|x| x.is_finite()) {
            return Err(NetError::NonFinite("expected output"));
        }
        Ok(())
    }

    /// Backward pass for an example whose dimensions are already checked.
    fn backprop_unchecked(&self, example: &Example) -> (Gradients, f64) {
        let pass = self.forward_unchecked(&example.input);
        let last = self.layers.len() - 1;
        let mut nabla = Gradients::zeros_like(&self.layers);

        let output = pass.output();
        let cost = QuadraticCost::cost(output, &example.expected);

        // δ_L = (a_L − y) ⊙ σ'(z_L)
        let mut delta = matrix::hadamard(
            &QuadraticCost::derivative(output, &example.expected),
            &pass.pre_activations[last].iter().map(|&z| sigmoid_prime(z)).collect::<Vec<_>>(),
        );

        for l in (0..=last).rev() {
            nabla.weights[l] = Matrix::outer(&delta, &pass.activations[l]);
            if l > 0 {
                // δ of the layer below: (Wᵀ · δ) ⊙ σ'(z)
                let back = self.layers[l].weights.transpose_mul_vec(&delta);
                let prime: Vec<f64> = pass.pre_activations[l - 1].iter().map(|&z| sigmoid_prime(z)).collect();
                nabla.biases[l] = std::mem::replace(&mut delta, matrix::hadamard(&back, &prime));
            } else {
                nabla.biases[l] = std::mem::take(&mut delta);
            }
        }

        (nabla, cost)
    }

    fn forward_unchecked(&self, input: &[f64]) -> ForwardPass {
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_vec());

        for layer in &self.layers {
            let z = layer.pre_activation(&activations[activations.len() - 1]);
            activations.push(z.iter().map(|&x| sigmoid(x)).collect());
            pre_activations.push(z);
        }

        ForwardPass { pre_activations, activations }
    }
}

/// Index of the largest value; the lowest index wins ties. NaNs never win.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] || v[best].is_nan() {
            best = i;
        }
    }
    best
}
