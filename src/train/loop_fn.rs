use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::data::Example;
use crate::error::{NetError, Result};
use crate::network::network::{argmax, Network};
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of mini-batch SGD and returns
/// the statistics of every completed epoch.
///
/// # Arguments
/// - `network`      — mutable reference to the network; modified in place
/// - `training_set` — labeled examples, consumed in order unless
///                    `config.shuffle_seed` is set
/// - `test_set`     — optional held-out examples scored after every epoch
/// - `config`       — hyperparameters and optional output file
///
/// # Errors
/// - `InvalidBatchSize` / `InvalidHyperparameter` for a bad `config`
/// - `EmptyBatch` if `training_set` is empty
/// - `DimensionMismatch` if any example does not fit the network; all
///   examples are checked before the first update
/// - `Io` if the output file cannot be written
pub fn train_loop(
    network: &mut Network,
    training_set: &[Example],
    test_set: Option<&[Example]>,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    config.validate()?;
    if training_set.is_empty() {
        return Err(NetError::EmptyBatch);
    }
    for example in training_set.iter().chain(test_set.unwrap_or_default()) {
        network.check_example(example)?;
    }

    let mut shuffler = config.shuffle_seed
        .map(|seed| (StdRng::seed_from_u64(seed), training_set.to_vec()));
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let ordered = match shuffler.as_mut() {
            Some((rng, examples)) => {
                examples.shuffle(rng);
                examples.as_slice()
            }
            None => training_set,
        };

        // ── One full pass over the training data ───────────────────────────
        let mean_cost = run_one_epoch(network, ordered, config.mini_batch_size, config.learning_rate)?;

        // ── Evaluation ────────────────────────────────────────────────────
        let success_rate = match test_set {
            Some(set) => Some(evaluate(network, set)?),
            None => None,
        };

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        match success_rate {
            Some(rate) => info!(epoch, total = config.epochs, mean_cost, success_rate = rate, elapsed_ms, "epoch complete"),
            None => info!(epoch, total = config.epochs, mean_cost, elapsed_ms, "epoch complete"),
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            mean_cost,
            success_rate,
            elapsed_ms,
        });
    }

    if let Some(ref path) = config.output {
        let last_rate = history.last().and_then(|s| s.success_rate);
        network.save(path, last_rate)?;
    }

    Ok(history)
}

/// Fraction of `test_set` whose predicted class equals the argmax of its
/// expected output. An empty set scores 0.0.
pub fn evaluate(network: &Network, test_set: &[Example]) -> Result<f64> {
    if test_set.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for example in test_set {
        network.check_example(example)?;
        if network.feed_forward(&example.input)? == argmax(&example.expected) {
            correct += 1;
        }
    }
    Ok(correct as f64 / test_set.len() as f64)
}

impl Network {
    /// Trains on `training_set` for `epochs` epochs in the given order and,
    /// if `file` is set, writes the parameters there afterwards.
    pub fn train(
        &mut self,
        training_set: &[Example],
        epochs: usize,
        mini_batch_size: usize,
        eta: f64,
        file: Option<&Path>,
    ) -> Result<Vec<EpochStats>> {
        let mut config = TrainConfig::new(epochs, mini_batch_size, eta);
        config.output = file.map(Path::to_path_buf);
        train_loop(self, training_set, None, &config)
    }

    /// Like [`Network::train`], scoring `test_set` after every epoch. The
    /// written file carries the final success rate.
    pub fn train_with_evaluation(
        &mut self,
        training_set: &[Example],
        epochs: usize,
        mini_batch_size: usize,
        eta: f64,
        test_set: &[Example],
        file: Option<&Path>,
    ) -> Result<Vec<EpochStats>> {
        let mut config = TrainConfig::new(epochs, mini_batch_size, eta);
        config.output = file.map(Path::to_path_buf);
        train_loop(self, training_set, Some(test_set), &config)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one epoch of consecutive mini-batches over `examples`.
/// Returns the mean pre-update cost per example.
fn run_one_epoch(
    network: &mut Network,
    examples: &[Example],
    mini_batch_size: usize,
    eta: f64,
) -> Result<f64> {
    let mut total_cost = 0.0;

    for (i, batch) in examples.chunks(mini_batch_size).enumerate() {
        let batch_cost = network.train_mini_batch(batch, eta)?;
        debug!(batch = i, size = batch.len(), cost = batch_cost, "mini-batch step");
        total_cost += batch_cost * batch.len() as f64;
    }

    Ok(total_cost / examples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::init::WeightInit;

    fn xor_set() -> Vec<Example> {
        vec![
            Example::new(vec![0.0, 0.0], vec![1.0, 0.0]),
            Example::new(vec![0.0, 1.0], vec![0.0, 1.0]),
            Example::new(vec![1.0, 0.0], vec![0.0, 1.0]),
            Example::new(vec![1.0, 1.0], vec![1.0, 0.0]),
        ]
    }

    fn seeded_network() -> Network {
        let mut rng = StdRng::seed_from_u64(3);
        Network::with_rng(&[2, 3, 2], WeightInit::default(), &mut rng).unwrap()
    }

    #[test]
    fn returns_one_stat_per_epoch() {
        let mut net = seeded_network();
        let stats = train_loop(&mut net, &xor_set(), Some(&xor_set()[..]), &TrainConfig::new(5, 2, 0.5)).unwrap();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[4].epoch, 5);
        assert!(stats.iter().all(|s| s.success_rate.is_some()));
    }

    #[test]
    fn zero_epochs_is_a_no_op() {
        let mut net = seeded_network();
        let before = net.clone();
        let stats = train_loop(&mut net, &xor_set(), None, &TrainConfig::new(0, 2, 0.5)).unwrap();
        assert!(stats.is_empty());
        assert_eq!(net, before);
    }

    #[test]
    fn oversized_batch_is_a_single_step() {
        let mut whole = seeded_network();
        let mut oversized = seeded_network();
        whole.train_mini_batch(&xor_set(), 0.5).unwrap();
        train_loop(&mut oversized, &xor_set(), None, &TrainConfig::new(1, 100, 0.5)).unwrap();
        assert_eq!(whole, oversized);
    }

    #[test]
    fn rejects_empty_training_set_and_bad_examples() {
        let mut net = seeded_network();
        let cfg = TrainConfig::new(1, 2, 0.5);
        assert!(matches!(train_loop(&mut net, &[], None, &cfg), Err(NetError::EmptyBatch)));

        let before = net.clone();
        let mut set = xor_set();
        set.push(Example::new(vec![1.0, 1.0], vec![1.0]));
        let err = train_loop(&mut net, &set, None, &cfg).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { .. }));
        assert_eq!(net, before);
    }

    #[test]
    fn evaluate_counts_argmax_matches() {
        let net = seeded_network();
        let set = xor_set();
        let hits = set.iter()
            .filter(|e| net.feed_forward(&e.input).unwrap() == argmax(&e.expected))
            .count();
        assert_eq!(evaluate(&net, &set).unwrap(), hits as f64 / 4.0);
        assert_eq!(evaluate(&net, &[]).unwrap(), 0.0);
    }
}
