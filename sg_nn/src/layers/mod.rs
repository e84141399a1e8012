//! Parametric modules: a tanh neuron, a fully connected layer of neurons, and a
//! multi-layer perceptron chaining layers together.

mod layer;
mod mlp;
mod neuron;

pub use layer::Layer;
pub use mlp::Mlp;
pub use neuron::Neuron;
