use thiserror::Error;

/// Errors raised while building or running networks.
///
/// The autodiff engine itself never fails; these cover shape mistakes made by
/// callers of the modules, losses and training loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NnError {
    #[error("Input arity mismatch: expected {expected} inputs, got {actual}")]
    InputArity { expected: usize, actual: usize },

    #[error("An MLP needs at least one layer")]
    EmptyArchitecture,

    #[error("Layer {index} has zero width")]
    ZeroWidthLayer { index: usize },

    #[error("Expected a single output, but the network produces {width}")]
    NotScalarOutput { width: usize },

    #[error("Length mismatch: {preds} predictions for {targets} targets")]
    LengthMismatch { preds: usize, targets: usize },

    #[error("Cannot compute a loss over an empty batch")]
    EmptyBatch,

    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, NnError>;
