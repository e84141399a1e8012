//! Finite difference utilities for gradient verification.
//!
//! Provides numerical gradient computation for testing autodiff correctness.

use crate::node::Value;

/// Compute gradients using central finite differences.
///
/// # Arguments
/// * `f` - Function that takes a slice of variable values and returns a scalar
/// * `point` - The point at which to compute gradients
/// * `eps` - Step size for finite differences (typically 1e-7 to 1e-5)
///
/// # Returns
/// Vector of partial derivatives [df/dx_0, df/dx_1, ...] at the given point
///
/// # Example
/// ```
/// use sg_core::finite_diff_grad;
///
/// // f(x, y) = x^2 + y^2
/// let f = |v: &[f64]| v[0] * v[0] + v[1] * v[1];
/// let grads = finite_diff_grad(f, &[3.0, 4.0], 1e-7);
///
/// assert!((grads[0] - 6.0).abs() < 1e-5);
/// assert!((grads[1] - 8.0).abs() < 1e-5);
/// ```
pub fn finite_diff_grad<F>(f: F, point: &[f64], eps: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut shifted = point.to_vec();
    (0..point.len())
        .map(|i| {
            let slope = central_difference(
                |x| {
                    shifted[i] = x;
                    f(&shifted)
                },
                point[i],
                eps,
            );
            shifted[i] = point[i];
            slope
        })
        .collect()
}

/// Largest absolute componentwise difference between two gradients.
///
/// Panics if the two slices differ in length.
pub fn max_grad_error(autodiff: &[f64], numeric: &[f64]) -> f64 {
    assert_eq!(
        autodiff.len(),
        numeric.len(),
        "gradients have different lengths"
    );
    autodiff
        .iter()
        .zip(numeric)
        .fold(0.0, |worst, (a, n)| worst.max((a - n).abs()))
}

/// (g(x + eps) - g(x - eps)) / 2eps
fn central_difference<G>(mut g: G, x: f64, eps: f64) -> f64
where
    G: FnMut(f64) -> f64,
{
    let ahead = g(x + eps);
    let behind = g(x - eps);
    (ahead - behind) / (2.0 * eps)
}

/// Autodiff and finite-difference gradients of the same expression, side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct GradCheck {
    /// Gradients read from the leaves after `backward`.
    pub autodiff: Vec<f64>,
    /// Central-difference estimates at the same point.
    pub numeric: Vec<f64>,
}

impl GradCheck {
    pub fn max_error(&self) -> f64 {
        max_grad_error(&self.autodiff, &self.numeric)
    }
}

/// Check the gradients of an expression built by `build` at `point`.
///
/// `build` receives one fresh leaf per coordinate of `point` and returns the
/// root. It is called once for the backward pass and twice per coordinate for
/// the numeric estimate, so it must be a pure function of the leaves.
///
/// ```
/// use sg_core::check_gradients;
///
/// let check = check_gradients(|v| (&v[0] * &v[1]).tanh(), &[0.3, -0.7], 1e-6);
/// assert!(check.max_error() < 1e-6);
/// ```
pub fn check_gradients<F>(build: F, point: &[f64], eps: f64) -> GradCheck
where
    F: Fn(&[Value]) -> Value,
{
    let leaves = leaves_at(point);
    build(&leaves).backward();
    let autodiff = leaves.iter().map(Value::grad).collect();

    // Each evaluation moves one coordinate of a fresh set of leaves, since
    // set_data does not recompute nodes already built on top of a leaf.
    let numeric = (0..point.len())
        .map(|i| {
            central_difference(
                |x| {
                    let leaves = leaves_at(point);
                    leaves[i].set_data(x);
                    build(&leaves).data()
                },
                point[i],
                eps,
            )
        })
        .collect();

    GradCheck { autodiff, numeric }
}

fn leaves_at(point: &[f64]) -> Vec<Value> {
    point.iter().map(|&x| Value::new(x)).collect()
}
