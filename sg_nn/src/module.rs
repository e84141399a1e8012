//! The trait shared by every parametric module.

use sg_core::Value;

/// A building block that owns trainable parameters.
///
/// `forward` is not part of the trait because its signature differs per module
/// (a neuron returns one value, a layer returns one per neuron).
pub trait Module {
    /// All trainable parameters, in a fixed order.
    ///
    /// The order is identical on every call, so position `i` always names the same
    /// parameter. Optimizers rely on this.
    fn parameters(&self) -> Vec<Value>;

    /// Reset the gradient of every parameter to zero.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }
}
