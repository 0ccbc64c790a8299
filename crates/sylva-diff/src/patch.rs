//! Patches: sparse maps from left-tree preorder index to operations.
//!
//! Index 0 is the left root. Every index in a [`Patch`] addresses a node of
//! the *left* tree, whatever reordering happened on the right. Inserts have
//! no left node of their own and are filed under their parent's index (or 0
//! for a root insertion).

use std::collections::BTreeMap;
use std::fmt;

use sylva_types::NodeRef;

use crate::props::PropsDiff;

/// A child that changed position inside its parent.
///
/// In [`Moves::removes`] `index` is the slot the node vacates; in
/// [`Moves::inserts`] it is the slot the node lands in.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    pub node: NodeRef,
    pub index: usize,
}

impl Move {
    pub fn new(node: &NodeRef, index: usize) -> Self {
        Self {
            node: NodeRef::clone(node),
            index,
        }
    }
}

/// The reordering of one parent's children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Moves {
    pub removes: Vec<Move>,
    pub inserts: Vec<Move>,
}

impl Moves {
    /// Returns `true` if nothing moved.
    pub fn is_empty(&self) -> bool {
        self.removes.is_empty() && self.inserts.is_empty()
    }
}

/// Discriminant of an [`Operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Remove,
    Insert,
    Replace,
    Text,
    Props,
    Order,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Remove => "remove",
            OperationKind::Insert => "insert",
            OperationKind::Replace => "replace",
            OperationKind::Text => "text",
            OperationKind::Props => "props",
            OperationKind::Order => "order",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change between two trees.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// A node present on the left is absent on the right.
    Remove { left: NodeRef },
    /// A node present on the right has no left counterpart.
    Insert { right: NodeRef },
    /// Same position, different type.
    Replace { left: NodeRef, right: NodeRef },
    /// Same type, both text, different value.
    Text { left: NodeRef, right: NodeRef },
    /// Same type, different non-structural properties.
    Props { left: NodeRef, diff: PropsDiff },
    /// The children of `left` changed order.
    Order { left: NodeRef, moves: Moves },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Remove { .. } => OperationKind::Remove,
            Operation::Insert { .. } => OperationKind::Insert,
            Operation::Replace { .. } => OperationKind::Replace,
            Operation::Text { .. } => OperationKind::Text,
            Operation::Props { .. } => OperationKind::Props,
            Operation::Order { .. } => OperationKind::Order,
        }
    }

    /// The left node the operation applies to, if any.
    pub fn left(&self) -> Option<&NodeRef> {
        match self {
            Operation::Insert { .. } => None,
            Operation::Remove { left }
            | Operation::Replace { left, .. }
            | Operation::Text { left, .. }
            | Operation::Props { left, .. }
            | Operation::Order { left, .. } => Some(left),
        }
    }

    /// The right node of the operation, for the variants that carry one.
    pub fn right(&self) -> Option<&NodeRef> {
        match self {
            Operation::Insert { right }
            | Operation::Replace { right, .. }
            | Operation::Text { right, .. } => Some(right),
            Operation::Remove { .. } | Operation::Props { .. } | Operation::Order { .. } => None,
        }
    }
}

/// The operations filed under one index: a single one, or a sequence once a
/// second operation arrives.
#[derive(Clone, Debug, PartialEq)]
pub enum Apply {
    One(Operation),
    Many(Vec<Operation>),
}

impl Apply {
    /// Append an operation, keeping insertion order.
    pub fn push(&mut self, op: Operation) {
        let previous = std::mem::replace(self, Apply::Many(Vec::new()));
        *self = match previous {
            Apply::One(first) => Apply::Many(vec![first, op]),
            Apply::Many(mut ops) => {
                ops.push(op);
                Apply::Many(ops)
            }
        };
    }

    pub fn as_slice(&self) -> &[Operation] {
        match self {
            Apply::One(op) => std::slice::from_ref(op),
            Apply::Many(ops) => ops,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// The result of diffing two trees.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    /// The left root the indices refer to (`None` if the left tree was absent).
    pub left: Option<NodeRef>,
    entries: BTreeMap<usize, Apply>,
}

impl Patch {
    /// Create an empty patch against `left`.
    pub fn new(left: Option<NodeRef>) -> Self {
        Self {
            left,
            entries: BTreeMap::new(),
        }
    }

    /// File an operation under `index`.
    pub fn push(&mut self, index: usize, op: Operation) {
        match self.entries.get_mut(&index) {
            Some(apply) => apply.push(op),
            None => {
                self.entries.insert(index, Apply::One(op));
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Apply> {
        self.entries.get(&index)
    }

    /// The operations under `index`; empty if there are none.
    pub fn operations(&self, index: usize) -> &[Operation] {
        self.entries
            .get(&index)
            .map(Apply::as_slice)
            .unwrap_or_default()
    }

    /// Indices that carry at least one operation, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Apply)> {
        self.entries.iter().map(|(index, apply)| (*index, apply))
    }

    /// Number of indices carrying operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the trees were equal.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of operations across all indices.
    pub fn operation_count(&self) -> usize {
        self.entries.values().map(Apply::len).sum()
    }
}
