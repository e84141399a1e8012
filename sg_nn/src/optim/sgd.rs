//! Stochastic Gradient Descent optimizer.

use std::collections::HashMap;

use log::trace;
use sg_core::{NodeId, Value};

/// SGD optimizer with optional momentum.
///
/// Parameters are updated in place through [`Value::set_data`], so the nodes held
/// by a module stay the same across steps.
#[derive(Debug, Clone)]
pub struct Sgd {
    /// Learning rate.
    pub lr: f64,
    /// Momentum coefficient. Values <= 0.0 disable momentum; [`TrainConfig`]
    /// rejects them before they reach the optimizer.
    ///
    /// [`TrainConfig`]: crate::config::TrainConfig
    pub momentum: f64,
    /// Velocity buffers for momentum (keyed by parameter NodeId).
    velocities: HashMap<NodeId, f64>,
}

impl Sgd {
    /// Create a new SGD optimizer.
    pub fn new(lr: f64) -> Self {
        Sgd {
            lr,
            momentum: 0.0,
            velocities: HashMap::new(),
        }
    }

    /// Create an SGD optimizer with momentum.
    pub fn with_momentum(lr: f64, momentum: f64) -> Self {
        Sgd {
            lr,
            momentum,
            velocities: HashMap::new(),
        }
    }

    /// Zero the gradients of `params` before the next backward pass.
    pub fn zero_grad(&self, params: &[Value]) {
        for p in params {
            p.zero_grad();
        }
    }

    /// Apply one update to every parameter from its current gradient.
    pub fn step(&mut self, params: &[Value]) {
        for p in params {
            let grad = p.grad();

            let update = if self.momentum > 0.0 {
                // v = momentum * v + grad; param = param - lr * v
                let velocity = self.velocities.entry(p.id()).or_insert(0.0);
                *velocity = self.momentum * *velocity + grad;
                *velocity
            } else {
                grad
            };

            p.set_data(p.data() - self.lr * update);
        }
        trace!("Sgd::step: updated {} parameters (lr = {})", params.len(), self.lr);
    }
}
