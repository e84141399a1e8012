//! Multi-layer perceptron.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sg_core::Value;

use crate::error::{NnError, Result};
use crate::layers::Layer;
use crate::module::Module;

/// A chain of layers where each layer's outputs feed the next layer's inputs.
#[derive(Debug, Clone)]
pub struct Mlp {
    pub layers: Vec<Layer>,
}

impl Mlp {
    /// Create an MLP with `n_in` inputs and one layer per entry of `layer_sizes`.
    ///
    /// For example `Mlp::new(3, &[4, 4, 1], rng)` builds 3 -> 4 -> 4 -> 1.
    pub fn new<R: Rng>(n_in: usize, layer_sizes: &[usize], rng: &mut R) -> Result<Self> {
        if layer_sizes.is_empty() {
            return Err(NnError::EmptyArchitecture);
        }
        if let Some(index) = layer_sizes.iter().position(|&n| n == 0) {
            return Err(NnError::ZeroWidthLayer { index });
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = n_in;
        for &n_out in layer_sizes {
            layers.push(Layer::new(fan_in, n_out, rng));
            fan_in = n_out;
        }

        let mlp = Mlp { layers };
        debug!(
            "Mlp::new: {} -> {:?} ({} parameters)",
            n_in,
            layer_sizes,
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    /// Create an MLP whose initial weights are fully determined by `seed`.
    pub fn seeded(n_in: usize, layer_sizes: &[usize], seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Mlp::new(n_in, layer_sizes, &mut rng)
    }

    /// Get the number of inputs.
    pub fn n_in(&self) -> usize {
        self.layers.first().map_or(0, Layer::n_in)
    }

    /// Get the number of outputs.
    pub fn n_out(&self) -> usize {
        self.layers.last().map_or(0, Layer::n_out)
    }

    /// Forward pass over existing nodes.
    pub fn forward_values(&self, inputs: &[Value]) -> Result<Vec<Value>> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations)?;
        }
        Ok(activations)
    }

    /// Forward pass over raw inputs, each wrapped as a fresh leaf.
    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<Value>> {
        let leaves: Vec<Value> = inputs.iter().map(|&x| Value::new(x)).collect();
        self.forward_values(&leaves)
    }

    /// Forward pass for a network whose last layer has a single neuron.
    pub fn call(&self, inputs: &[f64]) -> Result<Value> {
        let width = self.n_out();
        if width != 1 {
            return Err(NnError::NotScalarOutput { width });
        }

        let mut outputs = self.forward(inputs)?;
        outputs.pop().ok_or(NnError::NotScalarOutput { width: 0 })
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Value> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }
}
