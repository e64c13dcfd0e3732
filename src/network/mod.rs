pub mod gradients;
pub mod init;
pub mod network;
pub mod persist;
pub mod topology;

pub use gradients::Gradients;
pub use init::WeightInit;
pub use network::{argmax, ForwardPass, Network};
pub use persist::SavedNetwork;
pub use topology::Topology;
