use std::env;
use std::fs;

use perceptron::{f, Hyper, Network, NetworkConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Usage: cargo run --example from_config -- [network.json]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match env::args().nth(1) {
        Some(path) => NetworkConfig::from_json(&fs::read_to_string(path)?)?,
        None => NetworkConfig::default(),
    };
    info!(config = %config.to_json()?, "loaded");

    let mut nn = Network::from_config(&config)?;
    let (x, y) = match nn.input_dim() {
        2 => f::xor(),
        bits if bits < 32 => f::parity(bits as u32),
        bits => return Err(format!("no parity dataset for {} input bits", bits).into()),
    };

    let mut trainer = nn.get_trainer();
    trainer
        .override_hyper(Hyper {
            epochs: 20000,
            patience: 200,
            min_delta: 1e-5,
            early_stopping: true,
            ..Hyper::default()
        })
        .verbose()
        .train(&x, &y);

    let accuracy = f::binary_accuracy(&trainer.predict(&x), &y);
    info!(epochs = trainer.losses.len(), accuracy, "finished");

    Ok(())
}
