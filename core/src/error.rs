use thiserror::Error;

/// Errors raised by graph construction.
///
/// The solver and path reconstruction never fail: unreached nodes and
/// missing paths are ordinary values in their output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Edge weight is negative or NaN. Nothing was inserted.
    #[error("invalid weight {weight} on edge {from} -> {to}: edge weights must be non-negative")]
    InvalidWeight {
        from: String,
        to: String,
        weight: String,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
