pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use network::{ForwardPass, Gradients, Network, SavedNetwork, Topology, WeightInit};
pub use loss::quadratic::QuadraticCost;
pub use optim::sgd::Sgd;
pub use train::{evaluate, train_loop, EpochStats, TrainConfig};
pub use data::Example;
pub use config::RunConfig;
pub use error::{NetError, Result};
