use serde::{Deserialize, Serialize};

/// Scalar activation with its derivative.
///
/// `derivative` takes the layer's net input, not its output.
#[derive(Debug, Clone, Copy)]
pub struct ActivationFunction {
    pub forward: fn(f64) -> f64,
    pub derivative: fn(f64) -> f64,
}

pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + (-x).exp())
}

pub fn sigmoid_derivative(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1. - s)
}

pub fn relu(x: f64) -> f64 {
    if x > 0. {
        return x;
    }
    0.
}

/// Zero at exactly zero.
pub fn relu_derivative(x: f64) -> f64 {
    if x > 0. {
        return 1.;
    }
    0.
}

pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

pub fn tanh_derivative(x: f64) -> f64 {
    let t = x.tanh();
    1. - t * t
}

static SIGMOID: ActivationFunction = ActivationFunction {
    forward: sigmoid,
    derivative: sigmoid_derivative,
};

static RELU: ActivationFunction = ActivationFunction {
    forward: relu,
    derivative: relu_derivative,
};

static TANH: ActivationFunction = ActivationFunction {
    forward: tanh,
    derivative: tanh_derivative,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activations {
    Sigmoid,
    Relu,
    Tanh,
}

impl Activations {
    pub fn wake(&self) -> &'static ActivationFunction {
        match self {
            Activations::Sigmoid => &SIGMOID,
            Activations::Relu => &RELU,
            Activations::Tanh => &TANH,
        }
    }
}
