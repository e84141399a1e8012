//! Core data structures for the computation graph.
//!
//! The computation graph is built from `Value` handles, which are reference-counted
//! pointers to internal `Node` structures. Cloning a `Value` shares the node, so a
//! leaf used by many downstream operations is the same storage everywhere it appears.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ops;

/// Global counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a new unique node ID.
fn next_node_id() -> u64 {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Unique identifier for a node in the computation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

/// The local-gradient rule attached to a node.
///
/// Negation, subtraction and division have no tag of their own: they are built
/// from `Mul`, `Add` and `Pow` nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// An input, constant or parameter. Has no operands.
    Leaf,
    /// operands[0] + operands[1]
    Add,
    /// operands[0] * operands[1]
    Mul,
    /// operands[0]^exponent, with a constant exponent.
    Pow { exponent: f64 },
    /// tanh(operands[0])
    Tanh,
    /// exp(operands[0])
    Exp,
}

impl Op {
    /// Short operator name, used for debug output.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Leaf => "Leaf",
            Op::Add => "Add",
            Op::Mul => "Mul",
            Op::Pow { .. } => "Pow",
            Op::Tanh => "Tanh",
            Op::Exp => "Exp",
        }
    }

    /// Number of operands a node carrying this rule must have.
    pub fn arity(&self) -> usize {
        match self {
            Op::Leaf => 0,
            Op::Pow { .. } | Op::Tanh | Op::Exp => 1,
            Op::Add | Op::Mul => 2,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Pow { exponent } => write!(f, "Pow({})", exponent),
            other => f.write_str(other.name()),
        }
    }
}

/// Internal node structure. Only `grad` (and `data`, for optimizer updates on
/// parameters) change after construction.
pub(crate) struct Node {
    pub(crate) id: NodeId,
    pub(crate) data: Cell<f64>,
    pub(crate) grad: Cell<f64>,
    pub(crate) op: Op,
    pub(crate) operands: Vec<Value>,
    pub(crate) label: RefCell<Option<String>>,
}

impl Drop for Node {
    /// Free the operand graph iteratively. Nodes this one holds the last
    /// reference to hand their operands to the work list before being freed,
    /// so dropping a long chain does not recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.operands);
        while let Some(value) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(value.0) {
                pending.append(&mut node.operands);
            }
        }
    }
}

/// A scalar value in the computation graph.
///
/// `Value` is a reference-counted handle to a node. Equality and hashing are by
/// node identity: two distinct nodes holding the same `data` are different values.
///
/// Operands can only be values that already exist when an operation is applied,
/// so the graph reachable from any `Value` is acyclic.
#[derive(Clone)]
pub struct Value(pub(crate) Rc<Node>);

impl Value {
    /// Create a new leaf holding `data` with a zero gradient.
    ///
    /// Every call produces a distinct identity, even for equal `data`.
    pub fn new(data: f64) -> Self {
        Value::from_op(data, Op::Leaf, Vec::new())
    }

    /// Create a new leaf with a debug label attached.
    pub fn labeled(label: &str, data: f64) -> Self {
        let value = Value::new(data);
        value.set_label(label);
        value
    }

    /// Create a derived node. `data` must already be the forward result of `op`
    /// applied to `operands`.
    pub(crate) fn from_op(data: f64, op: Op, operands: Vec<Value>) -> Self {
        debug_assert_eq!(operands.len(), op.arity());
        Value(Rc::new(Node {
            id: NodeId(next_node_id()),
            data: Cell::new(data),
            grad: Cell::new(0.0),
            op,
            operands,
            label: RefCell::new(None),
        }))
    }

    /// Get the unique ID of this value's node.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The scalar held by this node.
    pub fn data(&self) -> f64 {
        self.0.data.get()
    }

    /// Overwrite the scalar held by this node.
    ///
    /// Intended for optimizer updates on parameter leaves. Nodes already derived
    /// from this one keep the value they were computed with.
    pub fn set_data(&self, data: f64) {
        self.0.data.set(data);
    }

    /// The accumulated gradient of the last backward root with respect to this node.
    pub fn grad(&self) -> f64 {
        self.0.grad.get()
    }

    pub fn set_grad(&self, grad: f64) {
        self.0.grad.set(grad);
    }

    /// Add `delta` into this node's gradient.
    pub(crate) fn accumulate_grad(&self, delta: f64) {
        self.0.grad.set(self.0.grad.get() + delta);
    }

    /// Reset this node's gradient to zero.
    pub fn zero_grad(&self) {
        self.0.grad.set(0.0);
    }

    /// The local-gradient rule of this node.
    pub fn op(&self) -> Op {
        self.0.op
    }

    /// The nodes this one was computed from, in evaluation order.
    pub fn operands(&self) -> &[Value] {
        &self.0.operands
    }

    /// Check if this node has no operands.
    pub fn is_leaf(&self) -> bool {
        self.0.operands.is_empty()
    }

    pub fn label(&self) -> Option<String> {
        self.0.label.borrow().clone()
    }

    pub fn set_label(&self, label: &str) {
        *self.0.label.borrow_mut() = Some(label.to_string());
    }

    // === Unary operations ===

    /// Raise to a constant power: self^exponent
    pub fn powf(&self, exponent: f64) -> Value {
        ops::powf(self, exponent)
    }

    /// Hyperbolic tangent: tanh(self)
    pub fn tanh(&self) -> Value {
        ops::tanh(self)
    }

    /// Exponential: exp(self)
    pub fn exp(&self) -> Value {
        ops::exp(self)
    }

    /// Run the backward pass with this node as the root.
    ///
    /// Seeds `self.grad` with 1.0 and accumulates into every reachable node.
    /// Gradients are added, not overwritten: zero them first (see
    /// [`Value::zero_grad_graph`]) when reusing nodes from a previous pass.
    pub fn backward(&self) {
        crate::backward::backward(self)
    }

    /// Zero the gradient of every node reachable from this one, itself included.
    pub fn zero_grad_graph(&self) {
        crate::backward::zero_grad_graph(self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("id", &self.id().0)
            .field("data", &self.data())
            .field("grad", &self.grad())
            .field("op", &self.op())
            .field(
                "operands",
                &self.operands().iter().map(|v| v.id().0).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value(data={:.6}, grad={:.6}, op={}",
            self.data(),
            self.grad(),
            self.op()
        )?;
        if let Some(label) = self.0.label.borrow().as_deref() {
            write!(f, ", label={}", label)?;
        }
        f.write_str(")")
    }
}

// === Operator overloads ===

impl std::ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        ops::neg(self)
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        ops::neg(&self)
    }
}

/// Implements a binary operator for every owned/borrowed combination, and with a
/// bare `f64` on either side (wrapped as a fresh constant leaf).
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $func:path) => {
        impl std::ops::$trait<&Value> for &Value {
            type Output = Value;

            fn $method(self, rhs: &Value) -> Value {
                $func(self, rhs)
            }
        }

        impl std::ops::$trait<Value> for &Value {
            type Output = Value;

            fn $method(self, rhs: Value) -> Value {
                $func(self, &rhs)
            }
        }

        impl std::ops::$trait<&Value> for Value {
            type Output = Value;

            fn $method(self, rhs: &Value) -> Value {
                $func(&self, rhs)
            }
        }

        impl std::ops::$trait<Value> for Value {
            type Output = Value;

            fn $method(self, rhs: Value) -> Value {
                $func(&self, &rhs)
            }
        }

        impl std::ops::$trait<f64> for &Value {
            type Output = Value;

            fn $method(self, rhs: f64) -> Value {
                $func(self, &Value::new(rhs))
            }
        }

        impl std::ops::$trait<f64> for Value {
            type Output = Value;

            fn $method(self, rhs: f64) -> Value {
                $func(&self, &Value::new(rhs))
            }
        }

        impl std::ops::$trait<&Value> for f64 {
            type Output = Value;

            fn $method(self, rhs: &Value) -> Value {
                $func(&Value::new(self), rhs)
            }
        }

        impl std::ops::$trait<Value> for f64 {
            type Output = Value;

            fn $method(self, rhs: Value) -> Value {
                $func(&Value::new(self), &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, ops::add);
impl_binary_op!(Sub, sub, ops::sub);
impl_binary_op!(Mul, mul, ops::mul);
impl_binary_op!(Div, div, ops::div);
