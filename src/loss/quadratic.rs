/// Quadratic cost, the only cost the hand-derived backward pass supports.
pub struct QuadraticCost;

impl QuadraticCost {
    /// C = ½·Σ(a − y)²
    pub fn cost(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, y)| (a - y).powi(2))
            .sum::<f64>()
    }

    /// ∂C/∂a = a − y, per output neuron.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, y)| a - y)
            .collect()
    }
}
