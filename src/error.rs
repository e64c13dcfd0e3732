//! Error types shared by every part of the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Error, Debug)]
pub enum NetError {
    /// Layer-size list is too short or contains a zero.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A vector does not match the size of the layer it is fed to or compared with.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// NaN or ±inf where only finite numbers are meaningful.
    #[error("{0} contains a non-finite value")]
    NonFinite(&'static str),

    /// A mini-batch (or training set) with no examples.
    #[error("mini-batch is empty")]
    EmptyBatch,

    #[error("invalid mini-batch size: {0}")]
    InvalidBatchSize(usize),

    /// Learning rate or weight range out of bounds.
    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    /// Persisted state is malformed, truncated, or inconsistent.
    #[error("corrupt file: {0}")]
    CorruptFile(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl NetError {
    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> NetError {
        NetError::DimensionMismatch { what, expected, actual }
    }
}
