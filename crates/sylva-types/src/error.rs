use thiserror::Error;

/// Errors produced when a node does not satisfy the tree model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("node has an empty type")]
    MissingType,

    #[error("node of type `{kind}` carries reserved property `{key}`")]
    ReservedProperty { kind: String, key: String },
}
