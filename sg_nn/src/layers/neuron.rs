//! A single tanh neuron.

use rand::Rng;
use sg_core::Value;

use crate::error::{NnError, Result};
use crate::module::Module;

/// A neuron computing `tanh(b + Σ wᵢ·xᵢ)`.
#[derive(Debug, Clone)]
pub struct Neuron {
    /// One weight per input.
    pub weights: Vec<Value>,
    pub bias: Value,
}

impl Neuron {
    /// Create a neuron with `n_in` weights and a bias drawn uniformly from [-1, 1).
    pub fn new<R: Rng>(n_in: usize, rng: &mut R) -> Self {
        let weights = (0..n_in)
            .map(|_| Value::labeled("weight", rng.gen_range(-1.0..1.0)))
            .collect();
        let bias = Value::labeled("bias", rng.gen_range(-1.0..1.0));

        Neuron { weights, bias }
    }

    /// Create a neuron from existing parameter values.
    pub fn from_values(weights: Vec<Value>, bias: Value) -> Self {
        Neuron { weights, bias }
    }

    /// Get the number of inputs.
    pub fn n_in(&self) -> usize {
        self.weights.len()
    }

    /// Forward pass. The returned value keeps the whole expression graph, so a
    /// later `backward` reaches the weights and bias.
    pub fn forward(&self, inputs: &[Value]) -> Result<Value> {
        if inputs.len() != self.weights.len() {
            return Err(NnError::InputArity {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }

        let act = self
            .weights
            .iter()
            .zip(inputs)
            .fold(self.bias.clone(), |acc, (w, x)| acc + w * x);

        Ok(act.tanh())
    }
}

impl Module for Neuron {
    /// Weights in input order, then the bias.
    fn parameters(&self) -> Vec<Value> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sg_core::value;

    fn fixed_neuron() -> Neuron {
        Neuron::from_values(vec![value(0.5), value(-1.0)], value(0.25))
    }

    #[test]
    fn test_neuron_init_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let neuron = Neuron::new(16, &mut rng);

        assert_eq!(neuron.n_in(), 16);
        for p in neuron.parameters() {
            assert!((-1.0..1.0).contains(&p.data()));
            assert!(p.is_leaf());
            assert_eq!(p.grad(), 0.0);
        }
    }

    #[test]
    fn test_neuron_forward() {
        let neuron = fixed_neuron();
        let out = neuron.forward(&[value(2.0), value(3.0)]).unwrap();

        assert_relative_eq!(out.data(), (0.25_f64 + 1.0 - 3.0).tanh());
    }

    #[test]
    fn test_neuron_arity_mismatch() {
        let neuron = fixed_neuron();
        let err = neuron.forward(&[value(1.0)]).unwrap_err();
        assert_eq!(err, NnError::InputArity { expected: 2, actual: 1 });
    }

    #[test]
    fn test_neuron_parameters_order() {
        let neuron = fixed_neuron();
        let params = neuron.parameters();

        assert_eq!(params.len(), 3);
        assert_eq!(params[0], neuron.weights[0]);
        assert_eq!(params[1], neuron.weights[1]);
        assert_eq!(params[2], neuron.bias);
    }

    #[test]
    fn test_neuron_backward() {
        let neuron = fixed_neuron();
        let x = [value(2.0), value(3.0)];
        let out = neuron.forward(&x).unwrap();
        out.backward();

        // d tanh(s) = (1 - t^2) ds, with s = b + w0*x0 + w1*x1
        let t = out.data();
        let ds = 1.0 - t * t;
        assert_relative_eq!(neuron.weights[0].grad(), ds * 2.0, epsilon = 1e-12);
        assert_relative_eq!(neuron.weights[1].grad(), ds * 3.0, epsilon = 1e-12);
        assert_relative_eq!(neuron.bias.grad(), ds, epsilon = 1e-12);
        assert_relative_eq!(x[0].grad(), ds * 0.5, epsilon = 1e-12);
        assert_relative_eq!(x[1].grad(), ds * -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_neuron_zero_grad() {
        let neuron = fixed_neuron();
        neuron.forward(&[value(2.0), value(3.0)]).unwrap().backward();
        assert_ne!(neuron.bias.grad(), 0.0);

        neuron.zero_grad();
        assert!(neuron.parameters().iter().all(|p| p.grad() == 0.0));
    }
}
