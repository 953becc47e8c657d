use tracing::{debug, trace};

use crate::activation::Activations;
use crate::layers::Dense;
use crate::loss::Losses;
use crate::matrix::Matrix;
use crate::optimizers::{OnlineTrainer, Optimizers};
use crate::{Error, Result};

use super::config::NetworkConfig;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_MOMENTUM: f64 = 0.9;

pub type LayerSchema = Vec<usize>;
pub type Web = Vec<Dense>;

/// Net inputs and outputs of every layer for one sample.
///
/// Produced by `Network::trace` and consumed by the backward sweep of the same
/// training step.
#[derive(Debug, Clone)]
pub struct Trace {
    pub net_inputs: Vec<Matrix>,
    pub outputs: Vec<Matrix>,
}

impl Trace {
    /// Output of the last layer.
    pub fn output(&self) -> Option<&Matrix> {
        self.outputs.last()
    }

    pub fn into_output(mut self) -> Option<Matrix> {
        self.outputs.pop()
    }
}

/// Feed-forward network trained one sample at a time.
#[derive(Debug, Clone)]
pub struct Network {
    layers: LayerSchema,
    web: Web,
    loss: Losses,
    optimizer: Optimizers,
}

fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= 0. {
        return Err(Error::ConfigurationMismatch(format!(
            "learning rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

fn check_momentum(momentum: f64) -> Result<()> {
    if !(0. ..1.).contains(&momentum) {
        return Err(Error::ConfigurationMismatch(format!(
            "momentum must lie in [0, 1), got {}",
            momentum
        )));
    }
    Ok(())
}

impl Network {
    /// Builds one dense layer per consecutive pair in `layer_sizes`, with
    /// weights and biases drawn uniformly from `[-1, 1]`.
    pub fn new(
        layer_sizes: &[usize],
        activations: &[Activations],
        loss: Losses,
        optimizer: Optimizers,
        learning_rate: f64,
        momentum: f64,
    ) -> Result<Network> {
        if layer_sizes.len() < 2 {
            return Err(Error::ConfigurationMismatch(format!(
                "need at least an input and an output size, got {} layer size(s)",
                layer_sizes.len()
            )));
        }
        if activations.len() != layer_sizes.len() - 1 {
            return Err(Error::ConfigurationMismatch(format!(
                "{} layer sizes need {} activations, got {}",
                layer_sizes.len(),
                layer_sizes.len() - 1,
                activations.len()
            )));
        }
        if let Some(i) = layer_sizes.iter().position(|size| *size == 0) {
            return Err(Error::ConfigurationMismatch(format!(
                "layer size at position {} is zero",
                i
            )));
        }
        check_learning_rate(learning_rate)?;
        if optimizer == Optimizers::Momentum {
            check_momentum(momentum)?;
        }

        let web = layer_sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(dims, activation)| {
                Dense::new(
                    dims[0],
                    dims[1],
                    *activation,
                    optimizer,
                    learning_rate,
                    momentum,
                )
            })
            .collect::<Web>();

        debug!(
            layers = ?layer_sizes,
            activations = ?activations,
            loss = ?loss,
            optimizer = ?optimizer,
            learning_rate,
            momentum,
            "network built"
        );

        Ok(Network {
            layers: layer_sizes.to_vec(),
            web,
            loss,
            optimizer,
        })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Network> {
        Network::new(
            &config.layer_sizes,
            &config.activations,
            config.loss,
            config.optimizer,
            config.learning_rate,
            config.momentum,
        )
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layers
    }

    pub fn input_dim(&self) -> usize {
        self.layers[0]
    }

    pub fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    pub fn layers(&self) -> &[Dense] {
        &self.web
    }

    /// Weights and biases can be edited in place; each layer's optimizers stay private.
    pub fn layers_mut(&mut self) -> &mut [Dense] {
        &mut self.web
    }

    pub fn loss(&self) -> Losses {
        self.loss
    }

    pub fn optimizer(&self) -> Optimizers {
        self.optimizer
    }

    /// Retunes every layer's optimizers. Accumulated velocity is kept.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        check_learning_rate(learning_rate)?;
        for layer in self.web.iter_mut() {
            layer.set_learning_rate(learning_rate);
        }
        Ok(())
    }

    /// No-op for plain gradient descent.
    pub fn set_momentum(&mut self, momentum: f64) -> Result<()> {
        if self.optimizer != Optimizers::Momentum {
            return Ok(());
        }
        check_momentum(momentum)?;
        for layer in self.web.iter_mut() {
            layer.set_momentum(momentum);
        }
        Ok(())
    }

    /// Forward pass keeping every layer's net input and output.
    ///
    /// Panics unless `x` is `1 x input_dim`.
    pub fn trace(&self, x: &Matrix) -> Trace {
        assert_eq!(
            x.shape(),
            (1, self.input_dim()),
            "Input must be a 1 x {} row vector.",
            self.input_dim()
        );

        let mut net_inputs = Vec::with_capacity(self.web.len());
        let mut outputs: Vec<Matrix> = Vec::with_capacity(self.web.len());

        for layer in self.web.iter() {
            let current = outputs.last().unwrap_or(x);
            let (z, a_z) = layer.forward(current);
            net_inputs.push(z);
            outputs.push(a_z);
        }

        Trace {
            net_inputs,
            outputs,
        }
    }

    /// `1 x input_dim` in, `1 x output_dim` out. Does not touch any state.
    pub fn forward(&self, x: &Matrix) -> Matrix {
        match self.trace(x).into_output() {
            Some(y) => y,
            // Construction guarantees at least one layer.
            None => unreachable!("network has no layers"),
        }
    }

    /// One forward, backward and update cycle. Returns the loss measured
    /// before the update.
    ///
    /// Panics unless `x` is `1 x input_dim` and `y` is `1 x output_dim`.
    pub fn train_sample(&mut self, x: &Matrix, y: &Matrix) -> f64 {
        assert_eq!(
            y.shape(),
            (1, self.output_dim()),
            "Target must be a 1 x {} row vector.",
            self.output_dim()
        );

        let Trace {
            net_inputs,
            outputs,
        } = self.trace(x);

        let loss_fn = self.loss.wake();
        let y_pred = &outputs[outputs.len() - 1];
        let loss = (loss_fn.forward)(y_pred, y);
        let mut grad_output = (loss_fn.derivative)(y_pred, y);

        for (i, layer) in self.web.iter_mut().enumerate().rev() {
            let layer_input = match i {
                0 => x,
                _ => &outputs[i - 1],
            };

            match layer.backward(layer_input, &net_inputs[i], grad_output, i > 0) {
                Some(grad_input) => grad_output = grad_input,
                None => break,
            }
        }

        trace!(loss, "sample trained");
        loss
    }

    pub fn get_trainer(&mut self) -> OnlineTrainer {
        OnlineTrainer::new(self)
    }
}
