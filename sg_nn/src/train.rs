//! Full-batch training loop for a scalar-output MLP.

use log::{debug, info};

use crate::config::TrainConfig;
use crate::error::{NnError, Result};
use crate::layers::Mlp;
use crate::loss::sum_squared_error;
use crate::module::Module;
use crate::optim::Sgd;

/// What happened during [`fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Loss before each update, one entry per step.
    pub losses: Vec<f64>,
    /// Network outputs for every example after the final update.
    pub predictions: Vec<f64>,
}

impl TrainReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// Train `model` on `(xs, ys)` with sum-of-squared-errors loss.
///
/// Each step runs the forward pass over every example, zeroes the parameter
/// gradients, back-propagates the loss and applies one SGD update.
pub fn fit(model: &Mlp, xs: &[Vec<f64>], ys: &[f64], config: &TrainConfig) -> Result<TrainReport> {
    config.validate()?;
    if xs.len() != ys.len() {
        return Err(NnError::LengthMismatch {
            preds: xs.len(),
            targets: ys.len(),
        });
    }

    let params = model.parameters();
    let mut opt = Sgd::with_momentum(config.learning_rate, config.momentum);
    let mut losses = Vec::with_capacity(config.steps);

    debug!(
        "fit: {} examples, {} parameters, {:?}",
        xs.len(),
        params.len(),
        config
    );

    for step in 1..=config.steps {
        let preds = predict(model, xs)?;
        let loss = sum_squared_error(&preds, ys)?;

        opt.zero_grad(&params);
        loss.backward();
        opt.step(&params);

        losses.push(loss.data());

        if config.log_every > 0 && step % config.log_every == 0 {
            info!("step {:>6}: loss = {:.6}", step, loss.data());
        } else {
            debug!("step {:>6}: loss = {:.6}", step, loss.data());
        }
    }

    let predictions = predict(model, xs)?.iter().map(|v| v.data()).collect();
    Ok(TrainReport { losses, predictions })
}

fn predict(model: &Mlp, xs: &[Vec<f64>]) -> Result<Vec<sg_core::Value>> {
    xs.iter().map(|x| model.call(x)).collect()
}
