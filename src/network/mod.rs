mod config;
mod network;

pub use config::NetworkConfig;
pub use network::{Network, Trace, DEFAULT_LEARNING_RATE, DEFAULT_MOMENTUM};
