use serde::{Deserialize, Serialize};

use crate::activation::Activations;
use crate::loss::Losses;
use crate::optimizers::Optimizers;
use crate::Result;

/// Everything `Network::from_config` needs, in serde form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub layer_sizes: Vec<usize>,
    pub activations: Vec<Activations>,
    pub loss: Losses,
    pub optimizer: Optimizers,
    pub learning_rate: f64,
    pub momentum: f64,
}

impl NetworkConfig {
    pub fn from_json(json: &str) -> Result<NetworkConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for NetworkConfig {
    fn default() -> NetworkConfig {
        NetworkConfig {
            layer_sizes: vec![2, 4, 1],
            activations: vec![Activations::Relu, Activations::Sigmoid],
            loss: Losses::CrossEntropy,
            optimizer: Optimizers::Momentum,
            learning_rate: 0.05,
            momentum: 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Network};

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = NetworkConfig::from_json(r#"{ "learning_rate": 0.2 }"#).unwrap();
        assert_eq!(config.learning_rate, 0.2);
        assert_eq!(config.layer_sizes, vec![2, 4, 1]);
        assert_eq!(config.optimizer, Optimizers::Momentum);
    }

    #[test]
    fn selectors_parse_by_name() {
        let config = NetworkConfig::from_json(
            r#"{
                "layer_sizes": [4, 16, 16, 1],
                "activations": ["Tanh", "Tanh", "Sigmoid"],
                "loss": "MeanSquaredError",
                "optimizer": "GradientDescent"
            }"#,
        )
        .unwrap();

        assert_eq!(config.activations[2], Activations::Sigmoid);
        assert_eq!(config.loss, Losses::MeanSquaredError);
        let nn = Network::from_config(&config).unwrap();
        assert_eq!(nn.layers().len(), 3);
    }

    #[test]
    fn json_round_trip_keeps_config() {
        let config = NetworkConfig::default();
        let back = NetworkConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = NetworkConfig::from_json(r#"{ "loss": "Hinge" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn inconsistent_config_is_rejected_at_build() {
        let config = NetworkConfig {
            activations: vec![Activations::Relu],
            ..NetworkConfig::default()
        };
        assert!(matches!(
            Network::from_config(&config),
            Err(Error::ConfigurationMismatch(_))
        ));
    }
}
