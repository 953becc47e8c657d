use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyper {
    pub epochs: usize,
    /// Pushed into the network's optimizers when set; `None` keeps the construction value.
    pub learning_rate: Option<f64>,
    pub momentum: Option<f64>,
    pub log_interval: usize,
    pub shuffle: bool,
    pub patience: usize,
    pub min_delta: f64,
    pub early_stopping: bool,
}

impl Hyper {
    pub fn new() -> Hyper {
        Hyper {
            epochs: 5000,
            learning_rate: None,
            momentum: None,
            log_interval: 1000,
            shuffle: false,
            patience: 0,
            min_delta: 0.,
            early_stopping: false,
        }
    }
}

impl Default for Hyper {
    fn default() -> Hyper {
        Hyper::new()
    }
}

/// Which update rule each trainable tensor gets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimizers {
    GradientDescent,
    Momentum,
}

impl Optimizers {
    /// A fresh optimizer with no accumulated state.
    pub fn wake(&self, learning_rate: f64, momentum: f64) -> Optimizer {
        match self {
            Optimizers::GradientDescent => Optimizer::GradientDescent { learning_rate },
            Optimizers::Momentum => Optimizer::Momentum {
                learning_rate,
                momentum,
                velocity: Matrix::empty(),
            },
        }
    }
}

/// Update rule bound to exactly one parameter tensor.
///
/// `Momentum` carries a velocity shaped like that tensor, so an instance must
/// never be reused for a second parameter.
#[derive(Debug, Clone)]
pub enum Optimizer {
    GradientDescent {
        learning_rate: f64,
    },
    Momentum {
        learning_rate: f64,
        momentum: f64,
        velocity: Matrix,
    },
}

impl Optimizer {
    /// Applies one step to `param` in place. Panics if `grad` is shaped differently.
    pub fn update(&mut self, param: &mut Matrix, grad: &Matrix) {
        assert_eq!(
            param.shape(),
            grad.shape(),
            "Parameter and gradient must have the same shape."
        );

        match self {
            Optimizer::GradientDescent { learning_rate } => {
                let lr = *learning_rate;
                let step = grad.map(|g| -lr * g);
                *param = Matrix::add(param, &step);
            }
            Optimizer::Momentum {
                learning_rate,
                momentum,
                velocity,
            } => {
                if velocity.is_empty() {
                    *velocity = Matrix::new(param.rows(), param.cols());
                }

                let (lr, mu) = (*learning_rate, *momentum);
                let decayed = velocity.map(|v| mu * v);
                let step = grad.map(|g| -lr * g);

                *velocity = Matrix::add(&decayed, &step);
                *param = Matrix::add(param, velocity);
            }
        }
    }

    pub fn learning_rate(&self) -> f64 {
        match self {
            Optimizer::GradientDescent { learning_rate } => *learning_rate,
            Optimizer::Momentum { learning_rate, .. } => *learning_rate,
        }
    }

    pub fn set_learning_rate(&mut self, rate: f64) {
        match self {
            Optimizer::GradientDescent { learning_rate } => *learning_rate = rate,
            Optimizer::Momentum { learning_rate, .. } => *learning_rate = rate,
        }
    }

    /// `None` for plain gradient descent.
    pub fn momentum(&self) -> Option<f64> {
        match self {
            Optimizer::GradientDescent { .. } => None,
            Optimizer::Momentum { momentum, .. } => Some(*momentum),
        }
    }

    /// Ignored by plain gradient descent.
    pub fn set_momentum(&mut self, value: f64) {
        if let Optimizer::Momentum { momentum, .. } = self {
            *momentum = value;
        }
    }

    /// Current velocity, `None` for plain gradient descent.
    pub fn velocity(&self) -> Option<&Matrix> {
        match self {
            Optimizer::GradientDescent { .. } => None,
            Optimizer::Momentum { velocity, .. } => Some(velocity),
        }
    }
}
