use ndarray::Zip;
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;

/// Lower/upper guard applied to predictions before cross-entropy takes logs or divides.
pub const CLAMP_EPSILON: f64 = 1e-12;

/// Loss over a prediction/target pair, with its gradient w.r.t. the prediction.
///
/// Both are normalised by the number of rows.
#[derive(Debug, Clone, Copy)]
pub struct LossFunction {
    pub forward: fn(&Matrix, &Matrix) -> f64,
    pub derivative: fn(&Matrix, &Matrix) -> Matrix,
}

fn check_shapes(pred: &Matrix, target: &Matrix) {
    assert_eq!(
        pred.shape(),
        target.shape(),
        "Predictions and targets must have the same shape."
    );
}

fn clamp(p: f64) -> f64 {
    p.clamp(CLAMP_EPSILON, 1. - CLAMP_EPSILON)
}

fn zip_sum(pred: &Matrix, target: &Matrix, f: impl Fn(f64, f64) -> f64) -> f64 {
    Zip::from(pred.view())
        .and(target.view())
        .fold(0., |acc, p, t| acc + f(*p, *t))
}

fn zip_map(pred: &Matrix, target: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix {
    Matrix::from(Zip::from(pred.view()).and(target.view()).map_collect(|p, t| f(*p, *t)))
}

pub fn mse(pred: &Matrix, target: &Matrix) -> f64 {
    check_shapes(pred, target);
    let rows = pred.rows() as f64;
    zip_sum(pred, target, |p, t| 0.5 * (p - t).powi(2)) / rows
}

pub fn mse_derivative(pred: &Matrix, target: &Matrix) -> Matrix {
    check_shapes(pred, target);
    let rows = pred.rows() as f64;
    zip_map(pred, target, |p, t| (p - t) / rows)
}

pub fn cross_entropy(pred: &Matrix, target: &Matrix) -> f64 {
    check_shapes(pred, target);
    let rows = pred.rows() as f64;
    zip_sum(pred, target, |p, t| {
        let p = clamp(p);
        -(t * p.ln() + (1. - t) * (1. - p).ln())
    }) / rows
}

pub fn cross_entropy_derivative(pred: &Matrix, target: &Matrix) -> Matrix {
    check_shapes(pred, target);
    let rows = pred.rows() as f64;
    zip_map(pred, target, |p, t| {
        let p = clamp(p);
        (p - t) / (p * (1. - p)) / rows
    })
}

static MSE: LossFunction = LossFunction {
    forward: mse,
    derivative: mse_derivative,
};

static CROSS_ENTROPY: LossFunction = LossFunction {
    forward: cross_entropy,
    derivative: cross_entropy_derivative,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Losses {
    MeanSquaredError,
    CrossEntropy,
}

impl Losses {
    pub fn wake(&self) -> &'static LossFunction {
        match self {
            Losses::MeanSquaredError => &MSE,
            Losses::CrossEntropy => &CROSS_ENTROPY,
        }
    }
}
