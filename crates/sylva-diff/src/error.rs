//! Error types for the diff crate.

use sylva_types::{NodeShape, TypeError};

/// Errors that can occur during diff operations.
///
/// A diff either produces a complete patch or one of these; partial patches
/// are never returned.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the input trees does not satisfy the node model.
    #[error("invalid node: {0}")]
    InvalidNode(#[from] TypeError),

    /// Two nodes share a type but not a shape (e.g. text on the left,
    /// parent on the right).
    #[error("node of type `{kind}` changed shape from {left} to {right}")]
    ShapeMismatch {
        kind: String,
        left: NodeShape,
        right: NodeShape,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
