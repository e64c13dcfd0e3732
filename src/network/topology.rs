use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Neuron count per layer, input layer first.
///
/// Always holds at least two layers and no empty layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    sizes: Vec<usize>,
}

impl Topology {
    pub fn new(sizes: Vec<usize>) -> Result<Topology> {
        if sizes.len() < 2 {
            return Err(NetError::InvalidTopology(format!(
                "need at least an input and an output layer, got {} layer(s)",
                sizes.len()
            )));
        }
        if let Some(pos) = sizes.iter().position(|&n| n == 0) {
            return Err(NetError::InvalidTopology(format!("layer {pos} has no neurons")));
        }
        Ok(Topology { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of layers, including the input layer.
    pub fn layer_count(&self) -> usize {
        self.sizes.len()
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// `(size, input_size)` for each non-input layer, in order.
    pub fn layer_shapes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sizes.windows(2).map(|w| (w[1], w[0]))
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetError;

    fn try_from(sizes: Vec<usize>) -> Result<Topology> {
        Topology::new(sizes)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_or_empty_layers() {
        assert!(matches!(Topology::new(vec![]), Err(NetError::InvalidTopology(_))));
        assert!(matches!(Topology::new(vec![3]), Err(NetError::InvalidTopology(_))));
        assert!(matches!(Topology::new(vec![3, 0, 1]), Err(NetError::InvalidTopology(_))));
    }

    #[test]
    fn layer_shapes_pair_each_layer_with_its_input() {
        let t = Topology::new(vec![4, 3, 2]).unwrap();
        assert_eq!(t.layer_shapes().collect::<Vec<_>>(), vec![(3, 4), (2, 3)]);
        assert_eq!((t.input_size(), t.output_size(), t.layer_count()), (4, 2, 3));
    }

    #[test]
    fn deserializing_validates() {
        let t: Topology = serde_json::from_str("[2, 2, 1]").unwrap();
        assert_eq!(t.sizes(), &[2, 2, 1]);
        assert!(serde_json::from_str::<Topology>("[2]").is_err());
    }
}
