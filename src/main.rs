use std::error::Error;
use std::process::ExitCode;

use sigmoid_nn::{Network, RunConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  sigmoid-nn [train] <config.json>
  sigmoid-nn predict <params.json> <x1,x2,...>";

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Train(&'a str),
    Predict(&'a str, &'a str),
}

/// `train` is optional: a lone argument is taken as the config path.
fn parse_command(args: &[String]) -> Option<Command<'_>> {
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        &["train", config] => Some(Command::Train(config)),
        &["predict", params, values] => Some(Command::Predict(params, values)),
        &[config] if config != "train" && config != "predict" => Some(Command::Train(config)),
        _ => None,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match parse_command(&args) {
        Some(Command::Train(config)) => train(config),
        Some(Command::Predict(params, values)) => predict(params, values),
        None => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn train(config_path: &str) -> Result<(), Box<dyn Error>> {
    let config = RunConfig::load_json(config_path)?;
    let (_, history) = config.run()?;
    if let Some(last) = history.last() {
        println!("epoch {}/{}: mean cost {:.6}", last.epoch, last.total_epochs, last.mean_cost);
        if let Some(rate) = last.success_rate {
            println!("success rate {:.2}%", rate * 100.0);
        }
    }
    Ok(())
}

fn predict(params_path: &str, values: &str) -> Result<(), Box<dyn Error>> {
    let network = Network::from_file(params_path)?;
    let input = values.split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()?;
    println!("{}", network.feed_forward(&input)?);
    Ok(())
}
