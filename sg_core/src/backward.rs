//! Reverse-mode automatic differentiation.
//!
//! The backward pass computes gradients by:
//! 1. Building a topological ordering of nodes reachable from the root
//! 2. Seeding the root's gradient with 1.0
//! 3. Traversing in reverse order, letting each node push its gradient into its operands

use std::collections::HashSet;

use log::debug;

use crate::node::{NodeId, Value};
use crate::ops::local_backward;

/// Accumulate d(root)/d(node) into the gradient of every node reachable from `root`.
pub(crate) fn backward(root: &Value) {
    let topo_order = topological_sort(root);
    debug!(
        "backward: {} nodes reachable from node {:?}",
        topo_order.len(),
        root.id()
    );

    root.set_grad(1.0);

    // Root first, leaves last: a node is processed only after every consumer
    // has added its contribution.
    for value in topo_order.iter().rev() {
        local_backward(value);
    }
}

/// Zero the gradient of every node reachable from `root`.
pub(crate) fn zero_grad_graph(root: &Value) {
    for value in topological_sort(root) {
        value.zero_grad();
    }
}

/// Build a topological ordering of all nodes reachable from the root.
///
/// Uses DFS postorder traversal: operands come before the nodes that consume them.
/// Nodes are deduplicated by identity, never by value.
///
/// The traversal keeps its own work stack, so graph depth is bounded by memory
/// rather than by the thread's call stack.
pub(crate) fn topological_sort(root: &Value) -> Vec<Value> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();
    // (node, operands already pushed)
    let mut stack = vec![(root.clone(), false)];

    while let Some((value, expanded)) = stack.pop() {
        if expanded {
            order.push(value);
            continue;
        }
        if !visited.insert(value.id()) {
            continue;
        }

        stack.push((value.clone(), true));
        // Reversed so operands[0] is finished first, as a recursive walk would.
        for operand in value.operands().iter().rev() {
            if !visited.contains(&operand.id()) {
                stack.push((operand.clone(), false));
            }
        }
    }

    order
}
