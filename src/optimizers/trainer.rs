use rand::{seq::SliceRandom, thread_rng};
use tracing::{debug, info, warn};

use super::Hyper;
use crate::matrix::Matrix;
use crate::network::Network;

/// Epoch loop over single-sample updates.
pub struct OnlineTrainer<'a> {
    network: &'a mut Network,
    hyper: Hyper,
    early_terminate: Option<Box<dyn Fn(&Vec<f64>) -> bool>>,
    verbose: bool,
    pub losses: Vec<f64>,
}

impl OnlineTrainer<'_> {
    pub fn new(network: &mut Network) -> OnlineTrainer {
        OnlineTrainer {
            network,
            hyper: Hyper::new(),
            early_terminate: None,
            losses: vec![],
            verbose: false,
        }
    }

    pub fn override_hyper(&mut self, hyper: Hyper) -> &mut Self {
        self.hyper = hyper;
        self
    }

    /// Log epoch losses at `info` rather than `debug`.
    pub fn verbose(&mut self) -> &mut Self {
        self.verbose = true;
        self
    }

    pub fn set_learning_rate(&mut self, rate: f64) -> &mut Self {
        self.hyper.learning_rate = Some(rate);
        self
    }

    pub fn set_momentum(&mut self, momentum: f64) -> &mut Self {
        self.hyper.momentum = Some(momentum);
        self
    }

    pub fn set_epochs(&mut self, epochs: usize) -> &mut Self {
        self.hyper.epochs = epochs;
        self
    }

    pub fn set_log_interval(&mut self, log_interval: usize) -> &mut Self {
        self.hyper.log_interval = log_interval;
        self
    }

    pub fn set_shuffle(&mut self, shuffle: bool) -> &mut Self {
        self.hyper.shuffle = shuffle;
        self
    }

    pub fn set_patience(&mut self, patience: usize) -> &mut Self {
        self.hyper.patience = patience;
        self
    }

    pub fn set_min_delta(&mut self, min_delta: f64) -> &mut Self {
        self.hyper.min_delta = min_delta;
        self
    }

    /// Stop once the mean improvement over the last `patience` epochs drops
    /// below `min_delta`. Both are read when `train` runs.
    pub fn until(&mut self) -> &mut Self {
        self.hyper.early_stopping = true;
        self.early_terminate = None;
        self
    }

    /// Replaces the plateau rule with a custom predicate over the epoch losses.
    pub fn until_some(
        &mut self,
        early_terminate: impl Fn(&Vec<f64>) -> bool + 'static,
    ) -> &mut Self {
        self.early_terminate = Some(Box::new(early_terminate));
        self
    }

    fn should_stop(&self) -> bool {
        match &self.early_terminate {
            Some(early_terminate) => early_terminate(&self.losses),
            None => {
                self.hyper.early_stopping
                    && plateaued(&self.losses, self.hyper.patience, self.hyper.min_delta)
            }
        }
    }

    /// Runs `train_sample` once per pair per epoch. Each recorded epoch loss is
    /// the sum of that epoch's sample losses.
    ///
    /// Panics if `x` and `y` differ in length, or if `Hyper` carries a learning
    /// rate or momentum the network rejects.
    pub fn train(&mut self, x: &[Matrix], y: &[Matrix]) -> &mut Self {
        assert_eq!(x.len(), y.len(), "Inputs and targets must pair up.");

        if let Some(rate) = self.hyper.learning_rate {
            if let Err(e) = self.network.set_learning_rate(rate) {
                panic!("{}", e);
            }
        }
        if let Some(momentum) = self.hyper.momentum {
            if let Err(e) = self.network.set_momentum(momentum) {
                panic!("{}", e);
            }
        }

        let mut order = (0..x.len()).collect::<Vec<usize>>();
        let mut rng = thread_rng();

        for epoch in 1..=self.hyper.epochs {
            if self.hyper.shuffle {
                order.shuffle(&mut rng);
            }

            let mut total_loss = 0.;
            for &i in order.iter() {
                total_loss += self.network.train_sample(&x[i], &y[i]);
            }
            self.losses.push(total_loss);

            if !total_loss.is_finite() {
                warn!(epoch, loss = total_loss, "epoch loss is not finite");
            }

            let interval = self.hyper.log_interval;
            if interval > 0 && epoch % interval == 0 {
                if self.verbose {
                    info!(epoch, epochs = self.hyper.epochs, loss = total_loss, "epoch");
                } else {
                    debug!(epoch, epochs = self.hyper.epochs, loss = total_loss, "epoch");
                }
            }

            if self.should_stop() {
                info!(epoch, loss = total_loss, "early termination condition met");
                break;
            }
        }

        self
    }

    pub fn predict(&self, x: &[Matrix]) -> Vec<Matrix> {
        x.iter().map(|input| self.network.forward(input)).collect()
    }

    pub fn hyper(&self) -> &Hyper {
        &self.hyper
    }
}

fn plateaued(losses: &[f64], patience: usize, min_delta: f64) -> bool {
    let len = losses.len();

    if patience == 0 || patience + 2 > len {
        return false;
    }

    let improvement = losses[len - patience - 1..]
        .windows(2)
        .map(|w| w[0] - w[1])
        .sum::<f64>();

    improvement / (patience as f64) < min_delta
}
