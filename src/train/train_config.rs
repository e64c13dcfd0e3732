use std::path::PathBuf;

use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`          — full passes over the training set
/// - `mini_batch_size` — examples per gradient step; the last batch of an
///                       epoch may be smaller
/// - `learning_rate`   — η, must be > 0
/// - `shuffle_seed`    — when set, the training order is reshuffled every
///                       epoch from a generator seeded with this value;
///                       when unset the caller's order is kept
/// - `output`          — parameter file written after the last epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub mini_batch_size: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that keeps the caller's ordering and writes no file.
    pub fn new(epochs: usize, mini_batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            mini_batch_size,
            learning_rate,
            shuffle_seed: None,
            output: None,
        }
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.mini_batch_size == 0 {
            return Err(NetError::InvalidBatchSize(self.mini_batch_size));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetError::InvalidHyperparameter(format!(
                "learning rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = TrainConfig::new(1, 0, 0.5).validate().unwrap_err();
        assert!(matches!(err, NetError::InvalidBatchSize(0)));
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let cfg: TrainConfig =
            serde_json::from_str(r#"{"epochs": 3, "mini_batch_size": 10, "learning_rate": 3.0}"#).unwrap();
        assert_eq!(cfg, TrainConfig::new(3, 10, 3.0));
    }
}
