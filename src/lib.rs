pub mod activation;
pub mod f;
pub mod layers;
pub mod loss;
mod matrix;
pub mod network;
pub mod optimizers;

pub use activation::{ActivationFunction, Activations};
pub use loss::{LossFunction, Losses, CLAMP_EPSILON};
pub use matrix::Matrix;
pub use network as nn;
pub use network::{Network, NetworkConfig};
pub use optimizers::{Hyper, OnlineTrainer, Optimizer, Optimizers};

pub type Dataset = (Vec<Matrix>, Vec<Matrix>);

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
