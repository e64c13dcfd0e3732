//! Run configuration read by the `sigmoid-nn` binary.
//!
//! # Example
//!
//! ```json
//! {
//!   "sizes": [784, 30, 10],
//!   "weight_init": { "min": -0.5, "max": 0.5 },
//!   "seed": 7,
//!   "train": { "epochs": 30, "mini_batch_size": 10, "learning_rate": 3.0,
//!              "shuffle_seed": 11, "output": "mnist.json" },
//!   "training_set": "train.json",
//!   "test_set": "test.json"
//! }
//! ```

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::data::load_examples;
use crate::error::{NetError, Result};
use crate::network::init::WeightInit;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Neurons per layer, input first. Ignored when `resume_from` is set.
    pub sizes: Vec<usize>,
    #[serde(default)]
    pub weight_init: WeightInit,
    /// Seed for weight initialization; thread-local randomness when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub train: TrainConfig,
    pub training_set: PathBuf,
    #[serde(default)]
    pub test_set: Option<PathBuf>,
    /// Parameter file to continue training from.
    #[serde(default)]
    pub resume_from: Option<PathBuf>,
}

impl RunConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<RunConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| NetError::CorruptFile(format!("{}: {e}", path.display())))
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| NetError::Io(e.into()))
    }

    /// The network this run starts from.
    pub fn build_network(&self) -> Result<Network> {
        if let Some(ref path) = self.resume_from {
            return Network::from_file(path);
        }
        match self.seed {
            Some(seed) => Network::with_rng(&self.sizes, self.weight_init, &mut StdRng::seed_from_u64(seed)),
            None => Network::new(&self.sizes, self.weight_init),
        }
    }

    /// Loads the datasets, trains, and returns the trained network with its history.
    pub fn run(&self) -> Result<(Network, Vec<EpochStats>)> {
        let mut network = self.build_network()?;
        let training_set = load_examples(&self.training_set)?;
        let test_set = self.test_set.as_ref().map(|p| load_examples(p)).transpose()?;
        info!(
            sizes = ?network.sizes(),
            training = training_set.len(),
            test = test_set.as_ref().map_or(0, Vec::len),
            "starting training"
        );
        let history = train_loop(&mut network, &training_set, test_set.as_deref(), &self.train)?;
        Ok((network, history))
    }
}
