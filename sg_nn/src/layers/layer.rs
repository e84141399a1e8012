//! Fully connected layer of independent neurons.

use rand::Rng;
use sg_core::Value;

use crate::error::Result;
use crate::layers::Neuron;
use crate::module::Module;

/// `n_out` neurons reading the same `n_in` inputs.
#[derive(Debug, Clone)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    /// Create a layer with random initialization.
    pub fn new<R: Rng>(n_in: usize, n_out: usize, rng: &mut R) -> Self {
        let neurons = (0..n_out).map(|_| Neuron::new(n_in, rng)).collect();
        Layer { neurons }
    }

    /// Create a layer from existing neurons. All neurons must share the same input width.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        debug_assert!(neurons.windows(2).all(|w| w[0].n_in() == w[1].n_in()));
        Layer { neurons }
    }

    /// Get the number of inputs.
    pub fn n_in(&self) -> usize {
        self.neurons.first().map_or(0, Neuron::n_in)
    }

    /// Get the number of outputs.
    pub fn n_out(&self) -> usize {
        self.neurons.len()
    }

    /// Forward pass: one output per neuron, in neuron order.
    pub fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>> {
        self.neurons.iter().map(|n| n.forward(inputs)).collect()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Value> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NnError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sg_core::value;

    #[test]
    fn test_layer_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(3, 4, &mut rng);

        assert_eq!(layer.n_in(), 3);
        assert_eq!(layer.n_out(), 4);
        assert_eq!(layer.num_parameters(), 4 * (3 + 1));

        let out = layer
            .forward(&[value(1.0), value(-2.0), value(0.5)])
            .unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|v| v.data().abs() < 1.0));
    }

    #[test]
    fn test_layer_parameters_in_neuron_order() {
        let mut rng = StdRng::seed_from_u64(2);
        let layer = Layer::new(2, 3, &mut rng);
        let params = layer.parameters();

        for (i, neuron) in layer.neurons.iter().enumerate() {
            assert_eq!(&params[i * 3..(i + 1) * 3], neuron.parameters().as_slice());
        }
    }

    #[test]
    fn test_layer_arity_mismatch() {
        let mut rng = StdRng::seed_from_u64(3);
        let layer = Layer::new(2, 2, &mut rng);

        assert_eq!(
            layer.forward(&[value(1.0)]).unwrap_err(),
            NnError::InputArity { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_layer_shared_inputs_accumulate() {
        // Both neurons read x, so x.grad sums both contributions
        let layer = Layer::from_neurons(vec![
            Neuron::from_values(vec![value(0.3)], value(0.0)),
            Neuron::from_values(vec![value(-0.7)], value(0.1)),
        ]);
        let x = value(0.5);
        let out = layer.forward(&[x.clone()]).unwrap();
        (&out[0] + &out[1]).backward();

        let d0 = 0.3 * (1.0 - out[0].data().powi(2));
        let d1 = -0.7 * (1.0 - out[1].data().powi(2));
        assert!((x.grad() - (d0 + d1)).abs() < 1e-12);
    }
}
