//! Epoch-level training: batching, evaluation, determinism, and output files.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sigmoid_nn::{train_loop, Example, NetError, Network, TrainConfig, WeightInit};
use tempfile::tempdir;

fn xor() -> Vec<Example> {
    vec![
        Example::classified(vec![0.0, 0.0], 0, 2).unwrap(),
        Example::classified(vec![0.0, 1.0], 1, 2).unwrap(),
        Example::classified(vec![1.0, 0.0], 1, 2).unwrap(),
        Example::classified(vec![1.0, 1.0], 0, 2).unwrap(),
    ]
}

fn seeded(seed: u64) -> Network {
    Network::with_rng(&[2, 3, 2], WeightInit::new(-1.0, 1.0).unwrap(), &mut StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn fixed_seeds_make_training_deterministic() {
    let config = TrainConfig::new(50, 3, 1.5).with_shuffle_seed(17);
    let mut a = seeded(8);
    let mut b = seeded(8);
    let stats_a = train_loop(&mut a, &xor(), Some(&xor()[..]), &config).unwrap();
    let stats_b = train_loop(&mut b, &xor(), Some(&xor()[..]), &config).unwrap();
    assert_eq!(a, b);
    let costs_a: Vec<f64> = stats_a.iter().map(|s| s.mean_cost).collect();
    let costs_b: Vec<f64> = stats_b.iter().map(|s| s.mean_cost).collect();
    assert_eq!(costs_a, costs_b);
}

#[test]
fn unshuffled_training_keeps_caller_order() {
    let mut looped = seeded(4);
    let mut manual = seeded(4);
    train_loop(&mut looped, &xor(), None, &TrainConfig::new(2, 3, 0.7)).unwrap();
    for _ in 0..2 {
        manual.train_mini_batch(&xor()[..3], 0.7).unwrap();
        manual.train_mini_batch(&xor()[3..], 0.7).unwrap();
    }
    assert_eq!(looped, manual);
}

#[test]
fn full_batch_training_lowers_cost() {
    let mut net = seeded(1);
    let stats = train_loop(&mut net, &xor(), None, &TrainConfig::new(2000, 4, 0.5)).unwrap();
    assert!(stats.last().unwrap().mean_cost < stats.first().unwrap().mean_cost);
}

#[test]
fn zero_batch_size_is_invalid() {
    let mut net = seeded(1);
    let err = net.train(&xor(), 1, 0, 1.0, None).unwrap_err();
    assert!(matches!(err, NetError::InvalidBatchSize(0)));
}

#[test]
fn train_writes_parameters_without_rate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trained.json");
    let mut net = seeded(2);
    net.train(&xor(), 3, 2, 1.0, Some(path.as_path())).unwrap();

    let saved = Network::load(&path).unwrap();
    assert_eq!(saved.network, net);
    assert_eq!(saved.success_rate, None);
}

#[test]
fn train_with_evaluation_records_final_rate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("evaluated.json");
    let mut net = seeded(2);
    let stats = net.train_with_evaluation(&xor(), 3, 2, 1.0, &xor(), Some(path.as_path())).unwrap();

    let last = stats.last().unwrap().success_rate.unwrap();
    assert!((0.0..=1.0).contains(&last));
    assert_eq!(Network::load(&path).unwrap().success_rate, Some(last));
}

#[test]
fn mismatched_test_set_is_rejected_before_training() {
    let mut net = seeded(2);
    let before = net.clone();
    let bad_test = vec![Example::new(vec![0.0, 0.0, 0.0], vec![1.0, 0.0])];
    let err = net.train_with_evaluation(&xor(), 3, 2, 1.0, &bad_test, None).unwrap_err();
    assert!(matches!(err, NetError::DimensionMismatch { .. }));
    assert_eq!(net, before);
}
