//! Property tests for the forward values and gradients of the operator set.

use approx::assert_relative_eq;
use proptest::prelude::*;
use sg_core::{check_gradients, value, Value};

proptest! {
    #[test]
    fn add_and_mul_forward_match_f64(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let (x, y) = (value(a), value(b));
        prop_assert_eq!((&x + &y).data(), a + b);
        prop_assert_eq!((&x * &y).data(), a * b);
    }

    #[test]
    fn fan_out_sums_both_branches(x0 in -10.0f64..10.0, a0 in -10.0f64..10.0, b0 in -10.0f64..10.0) {
        let x = value(x0);
        let a = value(a0);
        let b = value(b0);
        let root = &x * &a + &x * &b;

        root.backward();
        prop_assert!((x.grad() - (a0 + b0)).abs() < 1e-12);
        prop_assert_eq!(a.grad(), x0);
        prop_assert_eq!(b.grad(), x0);
    }

    #[test]
    fn composed_expression_matches_finite_differences(
        x0 in -1.5f64..1.5,
        y0 in 0.5f64..2.0,
        z0 in -1.0f64..1.0,
    ) {
        // f = tanh(x*y + z) * exp(z) - x / y + y^2.5
        let check = check_gradients(
            |v| {
                let h = (&v[0] * &v[1] + &v[2]).tanh();
                h * v[2].exp() - &v[0] / &v[1] + v[1].powf(2.5)
            },
            &[x0, y0, z0],
            1e-6,
        );
        prop_assert!(
            check.max_error() < 1e-6,
            "autodiff={:?} fd={:?}",
            check.autodiff,
            check.numeric
        );
    }

    #[test]
    fn operators_never_alias_outputs(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let (x, y) = (value(a), value(b));
        let first = &x + &y;
        let second = &x + &y;
        prop_assert_eq!(first.data(), second.data());
        prop_assert_ne!(first.id(), second.id());
    }
}

#[test]
fn shared_operands_accumulate_across_roots_until_zeroed() {
    let x = value(0.5);
    let w = value(-1.25);
    let r1 = (&x * &w).tanh();
    let r2 = x.exp() + &w;

    r1.backward();
    let (dx1, dw1) = (x.grad(), w.grad());
    r2.backward();
    let (dx_sum, dw_sum) = (x.grad(), w.grad());

    // After zeroing, a pass yields the root's own gradients only
    r2.zero_grad_graph();
    r2.backward();
    let (dx2, dw2) = (x.grad(), w.grad());

    assert_relative_eq!(dx_sum, dx1 + dx2, epsilon = 1e-12);
    assert_relative_eq!(dw_sum, dw1 + dw2, epsilon = 1e-12);
    assert_relative_eq!(dx2, 0.5_f64.exp(), epsilon = 1e-12);
    assert_relative_eq!(dw2, 1.0);
}

#[test]
fn tanh_gradient_scenario() {
    let x = value(2.0);
    let y = x.tanh();
    y.backward();
    assert_relative_eq!(x.grad(), 1.0 - 2.0_f64.tanh().powi(2), epsilon = 1e-12);
}

#[test]
fn neuron_shaped_expression_matches_finite_differences() {
    // tanh(b + w1*x1 + w2*x2), differentiated with respect to every input
    let check = check_gradients(
        |v: &[Value]| (&v[4] + &v[0] * &v[2] + &v[1] * &v[3]).tanh(),
        &[0.3, -0.8, 2.0, -1.0, 0.1],
        1e-6,
    );
    assert!(check.max_error() < 1e-8);
}
