use sigmoid_nn::{train_loop, Example, Network, TrainConfig, WeightInit};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::WARN).init();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::with_rng(&[2, 3, 2], WeightInit::new(-1.0, 1.0)?, &mut rng)?;

    let examples = vec![
        Example::classified(vec![0.0, 0.0], 0, 2)?,
        Example::classified(vec![0.0, 1.0], 1, 2)?,
        Example::classified(vec![1.0, 0.0], 1, 2)?,
        Example::classified(vec![1.0, 1.0], 0, 2)?,
    ];

    let config = TrainConfig::new(5000, 4, 2.0).with_shuffle_seed(7);
    let history = train_loop(&mut network, &examples, Some(examples.as_slice()), &config)?;

    for stats in history.iter().filter(|s| s.epoch % 500 == 0) {
        println!(
            "Epoch {}: cost = {:.6}, success = {:.0}%",
            stats.epoch,
            stats.mean_cost,
            stats.success_rate.unwrap_or(0.0) * 100.0
        );
    }

    for example in &examples {
        println!(
            "Input: {:?} -> class {} (outputs {:.4?})",
            example.input,
            network.feed_forward(&example.input)?,
            network.output(&example.input)?
        );
    }
    Ok(())
}
