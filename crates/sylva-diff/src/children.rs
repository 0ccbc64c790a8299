//! Child list reconciliation.
//!
//! Aligns two sibling lists by synthetic key and detects reordering. Move
//! detection is a greedy left-to-right two-pointer pass: it reports a valid
//! reordering but not necessarily one with the fewest moves.

use std::collections::HashSet;

use sylva_types::NodeRef;

use crate::keys::KeyIndex;
use crate::patch::{Move, Moves};

/// The aligned working sequence for one child list, plus any moves.
#[derive(Debug)]
pub(crate) struct Reconciled {
    /// One slot per left child holding its right counterpart (or a gap when
    /// it was removed), followed by the right children that have no left
    /// counterpart.
    pub(crate) aligned: Vec<Option<NodeRef>>,
    pub(crate) moves: Option<Moves>,
}

pub(crate) fn reconcile(left: &[NodeRef], right: &[NodeRef], detect_moves: bool) -> Reconciled {
    let left_index = KeyIndex::build(left.iter().map(Some));
    let right_index = KeyIndex::build(right.iter().map(Some));

    let mut aligned: Vec<Option<NodeRef>> = Vec::with_capacity(left.len() + right.len());

    for position in 0..left.len() {
        let counterpart = left_index
            .key_at(position)
            .and_then(|key| right_index.position_of(key))
            .map(|found| NodeRef::clone(&right[found]));
        aligned.push(counterpart);
    }

    for (position, child) in right.iter().enumerate() {
        let matched = right_index
            .key_at(position)
            .is_some_and(|key| left_index.contains(key));
        if !matched {
            aligned.push(Some(NodeRef::clone(child)));
        }
    }

    let moves = if detect_moves {
        detect(&aligned, right)
    } else {
        None
    };

    Reconciled { aligned, moves }
}

/// Walk the aligned sequence and the right list with two cursors.
///
/// The aligned sequence holds exactly the right children (plus gaps), so
/// every key on one side resolves on the other.
fn detect(aligned: &[Option<NodeRef>], right: &[NodeRef]) -> Option<Moves> {
    let left_index = KeyIndex::build(aligned.iter().map(Option::as_ref));
    let right_index = KeyIndex::build(right.iter().map(Some));

    let mut left_moved: HashSet<usize> = HashSet::new();
    let mut right_moved: HashSet<usize> = HashSet::new();
    let mut moves = Moves::default();
    let mut left_offset = 0;
    let mut right_offset = 0;

    while left_offset < aligned.len() || right_offset < right.len() {
        let left_key = left_index.key_at(left_offset);
        let right_key = right_index.key_at(right_offset);

        if left_moved.contains(&left_offset) {
            // Moved forward earlier: vacate the old slot.
            if let Some(node) = &aligned[left_offset] {
                moves.removes.push(Move::new(node, left_offset));
            }
            left_offset += 1;
        } else if right_moved.contains(&right_offset) {
            if let Some(from) = right_key.and_then(|key| left_index.position_of(key)) {
                moves.removes.push(Move::new(&right[right_offset], from));
            }
            right_offset += 1;
        } else {
            match (left_key, right_key) {
                (_, None) => left_offset += 1,
                (None, Some(_)) => right_offset += 1,
                (Some(left_key), Some(right_key)) if left_key == right_key => {
                    left_offset += 1;
                    right_offset += 1;
                }
                (Some(left_key), Some(right_key)) => {
                    let (Some(target), Some(source)) = (
                        left_index.position_of(right_key),
                        right_index.position_of(left_key),
                    ) else {
                        left_offset += 1;
                        right_offset += 1;
                        continue;
                    };

                    // Distance the right node travels back versus the
                    // distance the left node travels forward; ties move
                    // the right node.
                    if target + right_offset >= source + left_offset {
                        moves.inserts.push(Move::new(&right[right_offset], right_offset));
                        left_moved.insert(target);
                        right_offset += 1;
                    } else {
                        if let Some(node) = &aligned[left_offset] {
                            moves.inserts.push(Move::new(node, source));
                        }
                        right_moved.insert(source);
                        left_offset += 1;
                    }
                }
            }
        }
    }

    (!moves.is_empty()).then_some(moves)
}
