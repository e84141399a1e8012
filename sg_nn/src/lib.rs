//! # sg_nn - Neural Network Modules for sg_core
//!
//! This crate composes the scalar autodiff engine into trainable building blocks:
//!
//! - **Modules**: [`Neuron`], [`Layer`], [`Mlp`], all implementing [`Module`]
//! - **Losses**: sum of squared errors, MSE
//! - **Optimizers**: SGD (with momentum)
//! - **Training**: a full-batch loop configured by [`TrainConfig`]
//!
//! ## Example: Training a Small MLP
//!
//! ```
//! use sg_nn::{mse_loss, Mlp, Module, Sgd};
//!
//! let mlp = Mlp::seeded(3, &[4, 4, 1], 42)?;
//! let xs = [[2.0, 3.0, -1.0], [3.0, -1.0, 0.5]];
//! let ys = [1.0, -1.0];
//!
//! let params = mlp.parameters();
//! let mut opt = Sgd::new(0.05);
//!
//! for _ in 0..20 {
//!     let preds = xs.iter().map(|x| mlp.call(x)).collect::<Result<Vec<_>, _>>()?;
//!     let loss = mse_loss(&preds, &ys)?;
//!
//!     opt.zero_grad(&params);
//!     loss.backward();
//!     opt.step(&params);
//! }
//! # Ok::<(), sg_nn::NnError>(())
//! ```

pub mod config;
pub mod error;
pub mod layers;
pub mod loss;
pub mod module;
pub mod optim;
pub mod train;

// Re-exports for convenience
pub use config::TrainConfig;
pub use error::{NnError, Result};
pub use layers::{Layer, Mlp, Neuron};
pub use loss::{mse_loss, sum_squared_error};
pub use module::Module;
pub use optim::Sgd;
pub use train::{fit, TrainReport};
