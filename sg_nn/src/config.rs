//! Training configuration.

use std::str::FromStr;

use crate::error::{NnError, Result};

pub const ENV_STEPS: &str = "SCALARGRAD_STEPS";
pub const ENV_LR: &str = "SCALARGRAD_LR";
pub const ENV_MOMENTUM: &str = "SCALARGRAD_MOMENTUM";
pub const ENV_SEED: &str = "SCALARGRAD_SEED";
pub const ENV_LOG_EVERY: &str = "SCALARGRAD_LOG_EVERY";

/// Hyperparameters of the training loop in [`crate::train::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Number of full-batch gradient steps.
    pub steps: usize,
    pub learning_rate: f64,
    /// 0.0 means plain gradient descent.
    pub momentum: f64,
    /// Seed for parameter initialization.
    pub seed: u64,
    /// Log the loss every `log_every` steps at info level (0 disables).
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            steps: 10_000,
            learning_rate: 0.1,
            momentum: 0.0,
            seed: 42,
            log_every: 1_000,
        }
    }
}

impl TrainConfig {
    /// Defaults overridden by any `SCALARGRAD_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `SCALARGRAD_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TrainConfig::default();
        let config = TrainConfig {
            steps: parse_or(&lookup, ENV_STEPS, defaults.steps)?,
            learning_rate: parse_or(&lookup, ENV_LR, defaults.learning_rate)?,
            momentum: parse_or(&lookup, ENV_MOMENTUM, defaults.momentum)?,
            seed: parse_or(&lookup, ENV_SEED, defaults.seed)?,
            log_every: parse_or(&lookup, ENV_LOG_EVERY, defaults.log_every)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject hyperparameters SGD cannot use: the learning rate must be a
    /// positive finite number and the momentum must lie in [0, 1).
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NnError::InvalidConfig {
                key: ENV_LR.to_string(),
                value: self.learning_rate.to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(NnError::InvalidConfig {
                key: ENV_MOMENTUM.to_string(),
                value: self.momentum.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| NnError::InvalidConfig {
            key: key.to_string(),
            value: raw,
        }),
    }
}
