//! The walker: recursive comparison of a left/right node pair.
//!
//! Operations are filed under the preorder index of the left node they
//! concern. Child indices are derived from the sizes of the original left
//! subtrees, so right-side insertions and reorderings never shift them.

use std::sync::Arc;

use sylva_types::{Content, NodeRef};
use tracing::{debug, trace};

use crate::children::reconcile;
use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::patch::{Operation, Patch};
use crate::props::diff_props;

/// Computes patches with a fixed configuration.
///
/// Holds no per-call state, so one `Differ` may be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff two optional trees.
    ///
    /// Both trees are validated up front; a malformed node or a node that
    /// keeps its type but changes shape fails the whole call.
    pub fn diff(&self, left: Option<&NodeRef>, right: Option<&NodeRef>) -> DiffResult<Patch> {
        for tree in [left, right].into_iter().flatten() {
            tree.validate()?;
        }

        let mut patch = Patch::new(left.cloned());
        self.walk(left, right, &mut patch, 0)?;

        debug!(
            slots = patch.len(),
            operations = patch.operation_count(),
            "computed tree diff"
        );
        Ok(patch)
    }

    fn walk(
        &self,
        left: Option<&NodeRef>,
        right: Option<&NodeRef>,
        patch: &mut Patch,
        index: usize,
    ) -> DiffResult<()> {
        match (left, right) {
            (None, None) => {}
            (Some(left), Some(right)) if Arc::ptr_eq(left, right) => {}
            (Some(left), None) => patch.push(
                index,
                Operation::Remove {
                    left: Arc::clone(left),
                },
            ),
            (None, Some(right)) => patch.push(
                index,
                Operation::Insert {
                    right: Arc::clone(right),
                },
            ),
            (Some(left), Some(right)) if left.kind != right.kind => patch.push(
                index,
                Operation::Replace {
                    left: Arc::clone(left),
                    right: Arc::clone(right),
                },
            ),
            (Some(left), Some(right)) => self.walk_same_kind(left, right, patch, index)?,
        }
        Ok(())
    }

    fn walk_same_kind(
        &self,
        left: &NodeRef,
        right: &NodeRef,
        patch: &mut Patch,
        index: usize,
    ) -> DiffResult<()> {
        if left.shape() != right.shape() {
            return Err(DiffError::ShapeMismatch {
                kind: left.kind.clone(),
                left: left.shape(),
                right: right.shape(),
            });
        }

        if let Some(diff) = diff_props(&left.props, &right.props, self.config.nested_props) {
            patch.push(
                index,
                Operation::Props {
                    left: Arc::clone(left),
                    diff,
                },
            );
        }

        match (&left.content, &right.content) {
            (Content::Text(_), Content::Text(_)) => {
                if let Some(op) = diff_text(left, right) {
                    patch.push(index, op);
                }
            }
            (Content::Parent(left_children), Content::Parent(right_children)) => {
                self.diff_children(left, left_children, right_children, patch, index)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn diff_children(
        &self,
        parent: &NodeRef,
        left: &[NodeRef],
        right: &[NodeRef],
        patch: &mut Patch,
        index: usize,
    ) -> DiffResult<()> {
        let reconciled = reconcile(left, right, self.config.detect_moves);
        let mut offset = index;

        for (position, counterpart) in reconciled.aligned.iter().enumerate() {
            match left.get(position) {
                Some(left_child) => {
                    self.walk(Some(left_child), counterpart.as_ref(), patch, offset + 1)?;
                    offset += left_child.size();
                }
                // Past the left children: right-only nodes, filed under the parent.
                None => {
                    if let Some(right_child) = counterpart {
                        patch.push(
                            index,
                            Operation::Insert {
                                right: Arc::clone(right_child),
                            },
                        );
                    }
                }
            }
        }

        if let Some(moves) = reconciled.moves {
            trace!(
                index,
                removes = moves.removes.len(),
                inserts = moves.inserts.len(),
                "children reordered"
            );
            patch.push(
                index,
                Operation::Order {
                    left: Arc::clone(parent),
                    moves,
                },
            );
        }
        Ok(())
    }
}

/// Compare the values of two text nodes.
pub fn diff_text(left: &NodeRef, right: &NodeRef) -> Option<Operation> {
    (left.value() != right.value()).then(|| Operation::Text {
        left: Arc::clone(left),
        right: Arc::clone(right),
    })
}

/// Diff two optional trees with the default configuration.
///
/// `None` on one side yields a single root `insert` or `remove`. Equal
/// trees yield an empty patch whose `left` is still set.
pub fn diff(left: Option<&NodeRef>, right: Option<&NodeRef>) -> DiffResult<Patch> {
    Differ::default().diff(left, right)
}

/// Diff two optional trees with an explicit configuration.
pub fn diff_with_config(
    left: Option<&NodeRef>,
    right: Option<&NodeRef>,
    config: &DiffConfig,
) -> DiffResult<Patch> {
    Differ::new(config.clone()).diff(left, right)
}
