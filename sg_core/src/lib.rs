//! # sg_core - Reverse-mode Automatic Differentiation over Scalars
//!
//! This crate builds a dynamic computation graph of scalar [`Value`]s during the
//! forward pass and fills in every node's gradient via reverse accumulation
//! (backpropagation) when [`Value::backward`] is called on a root.
//!
//! ## Quick Start
//!
//! ```
//! use sg_core::value;
//!
//! let a = value(3.0);
//! let b = value(2.0);
//! let c = &a * &b;
//! assert_eq!(c.data(), 6.0);
//!
//! c.backward();
//! assert_eq!(a.grad(), 2.0);
//! assert_eq!(b.grad(), 3.0);
//! ```
//!
//! ## Supported Operations
//!
//! | Category | Operations |
//! |----------|------------|
//! | Arithmetic | `+`, `-`, `*`, `/`, unary `-` (also with a bare `f64` on either side) |
//! | Power | [`Value::powf`] (x^k for constant k) |
//! | Transcendental | [`Value::tanh`], [`Value::exp`] |
//!
//! The same operators are available as free functions in [`ops`].
//!
//! ## Gradient accumulation
//!
//! Gradients live on the nodes and are summed over every path, so a value used
//! in several places receives the total derivative. They are never reset by
//! `backward` itself: zero them (for example with [`Value::zero_grad_graph`])
//! before running a new pass over shared nodes.
//!
//! ```
//! use sg_core::value;
//!
//! // f(x, y) = x^2 * y + y^3
//! let x = value(2.0);
//! let y = value(3.0);
//! let f = x.powf(2.0) * &y + y.powf(3.0);
//!
//! f.backward();
//! // df/dx = 2xy = 12, df/dy = x^2 + 3y^2 = 31
//! assert!((x.grad() - 12.0).abs() < 1e-10);
//! assert!((y.grad() - 31.0).abs() < 1e-10);
//! ```
//!
//! Non-finite values are never trapped: dividing by a zero-valued node yields an
//! infinite value that propagates through `data` and `grad`.

mod backward;
mod finite_diff;
mod node;
pub mod ops;

pub use finite_diff::{check_gradients, finite_diff_grad, max_grad_error, GradCheck};
pub use node::{NodeId, Op, Value};

/// Create a new leaf node holding `data`.
///
/// Each call creates a node with a unique identity, even for equal `data`.
pub fn value(data: f64) -> Value {
    Value::new(data)
}
