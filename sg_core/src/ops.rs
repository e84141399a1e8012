//! The operator set.
//!
//! Each operator computes its forward value eagerly and records its operands plus
//! the `Op` tag that selects the local-gradient rule applied by [`local_backward`].
//! `neg`, `sub` and `div` are composed from `mul`, `add` and `powf`, so only five
//! derivative rules exist.

use crate::node::{Op, Value};

/// a + b
pub fn add(a: &Value, b: &Value) -> Value {
    Value::from_op(a.data() + b.data(), Op::Add, vec![a.clone(), b.clone()])
}

/// a * b
pub fn mul(a: &Value, b: &Value) -> Value {
    Value::from_op(a.data() * b.data(), Op::Mul, vec![a.clone(), b.clone()])
}

/// -a, built as a * (-1).
pub fn neg(a: &Value) -> Value {
    mul(a, &Value::new(-1.0))
}

/// a - b, built as a + (-b).
pub fn sub(a: &Value, b: &Value) -> Value {
    add(a, &neg(b))
}

/// a^k for a constant real exponent `k`.
///
/// Non-integer exponents of a negative base produce NaN; the caller owns the domain.
pub fn powf(a: &Value, exponent: f64) -> Value {
    Value::from_op(a.data().powf(exponent), Op::Pow { exponent }, vec![a.clone()])
}

/// a / b, built as a * b^(-1). Dividing by zero yields an infinite value.
pub fn div(a: &Value, b: &Value) -> Value {
    mul(a, &powf(b, -1.0))
}

/// tanh(a) = (e^{2x} - 1) / (e^{2x} + 1)
pub fn tanh(a: &Value) -> Value {
    Value::from_op(a.data().tanh(), Op::Tanh, vec![a.clone()])
}

/// e^a
pub fn exp(a: &Value) -> Value {
    Value::from_op(a.data().exp(), Op::Exp, vec![a.clone()])
}

/// Propagate `out.grad` into the operands of `out` using its local-gradient rule.
///
/// Contributions are added to the operands' gradients, so a node reached along
/// several paths ends up with the sum over all of them. Leaves are a no-op.
pub fn local_backward(out: &Value) {
    let out_grad = out.grad();
    let operands = out.operands();

    match out.op() {
        Op::Leaf => {}

        Op::Add => {
            // d(a+b)/da = 1, d(a+b)/db = 1
            operands[0].accumulate_grad(out_grad);
            operands[1].accumulate_grad(out_grad);
        }

        Op::Mul => {
            // d(ab)/da = b, d(ab)/db = a
            let (a, b) = (&operands[0], &operands[1]);
            let (a_val, b_val) = (a.data(), b.data());
            a.accumulate_grad(b_val * out_grad);
            b.accumulate_grad(a_val * out_grad);
        }

        Op::Pow { exponent } => {
            // d(a^k)/da = k * a^(k-1)
            let a = &operands[0];
            a.accumulate_grad(exponent * a.data().powf(exponent - 1.0) * out_grad);
        }

        Op::Tanh => {
            // d(tanh a)/da = 1 - tanh(a)^2
            let t = out.data();
            operands[0].accumulate_grad((1.0 - t * t) * out_grad);
        }

        Op::Exp => {
            // d(e^a)/da = e^a
            operands[0].accumulate_grad(out.data() * out_grad);
        }
    }
}
