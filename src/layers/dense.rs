use crate::activation::Activations;
use crate::matrix::Matrix;
use crate::optimizers::{Optimizer, Optimizers};

/// Fully-connected layer: `out = activation(x * w + b)`.
///
/// Owns one optimizer for `w` and another for `b`; neither is ever handed out
/// mutably, so their state stays tied to this layer's tensors.
#[derive(Debug, Clone)]
pub struct Layer {
    pub w: Matrix,
    pub b: Matrix,
    pub activation: Activations,
    optimizer_w: Optimizer,
    optimizer_b: Optimizer,
}

impl Layer {
    pub fn new(
        d_in: usize,
        d_out: usize,
        activation: Activations,
        optimizer: Optimizers,
        learning_rate: f64,
        momentum: f64,
    ) -> Layer {
        Layer {
            w: Matrix::random(d_in, d_out),
            b: Matrix::random(1, d_out),
            activation,
            optimizer_w: optimizer.wake(learning_rate, momentum),
            optimizer_b: optimizer.wake(learning_rate, momentum),
        }
    }

    pub fn d_in(&self) -> usize {
        self.w.rows()
    }

    pub fn d_out(&self) -> usize {
        self.w.cols()
    }

    /// Returns `(net input, output)`.
    pub fn forward(&self, x: &Matrix) -> (Matrix, Matrix) {
        let z = Matrix::add(&Matrix::multiply(x, &self.w), &self.b);
        let a_z = z.map(self.activation.wake().forward);
        (z, a_z)
    }

    /// Turns the gradient w.r.t. this layer's output into a parameter update.
    ///
    /// `x` and `z` are the input and net input recorded on the forward pass.
    /// When `propagate` is set, returns the gradient w.r.t. `x`, computed with
    /// the freshly updated weights.
    pub fn backward(
        &mut self,
        x: &Matrix,
        z: &Matrix,
        mut grad_output: Matrix,
        propagate: bool,
    ) -> Option<Matrix> {
        let d_z = z.map(self.activation.wake().derivative);
        grad_output.hadamard_assign(&d_z);

        let grad_w = Matrix::multiply(&Matrix::transpose(x), &grad_output);

        self.optimizer_w.update(&mut self.w, &grad_w);
        self.optimizer_b.update(&mut self.b, &grad_output);

        if !propagate {
            return None;
        }

        Some(Matrix::multiply(&grad_output, &Matrix::transpose(&self.w)))
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.optimizer_w.set_learning_rate(learning_rate);
        self.optimizer_b.set_learning_rate(learning_rate);
    }

    pub fn set_momentum(&mut self, momentum: f64) {
        self.optimizer_w.set_momentum(momentum);
        self.optimizer_b.set_momentum(momentum);
    }

    pub fn optimizers(&self) -> (&Optimizer, &Optimizer) {
        (&self.optimizer_w, &self.optimizer_b)
    }
}
