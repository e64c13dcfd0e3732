pub mod quadratic;

pub use quadratic::QuadraticCost;
