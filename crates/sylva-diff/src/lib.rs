//! Structural diff engine for Sylva trees.
//!
//! Compares two rooted, ordered trees and produces a [`Patch`]: a sparse map
//! from preorder index in the *left* tree to the operations that turn it
//! into the right tree. Nodes are compared by type, then by properties,
//! text value and children; sibling lists are aligned by a synthetic key
//! and reorderings are reported as a single `order` operation per parent.
//!
//! Move detection is a greedy left-to-right heuristic. It always describes
//! a valid reordering, but the move count is not guaranteed to be minimal.
//!
//! # Key Types
//!
//! - [`diff`] / [`diff_with_config`] / [`Differ`] -- Entry points
//! - [`Patch`] / [`Apply`] / [`Operation`] -- Indexed operations
//! - [`PropsDiff`] / [`PropChange`] -- Deep property changes
//! - [`Moves`] / [`Move`] -- Child reordering
//! - [`KeyIndex`] -- Synthetic sibling keys
//! - [`DiffConfig`] -- Differ configuration

mod children;
pub mod config;
pub mod error;
pub mod keys;
pub mod patch;
pub mod props;
pub mod walk;

pub use config::DiffConfig;
pub use error::{DiffError, DiffResult};
pub use keys::{base_key, KeyIndex};
pub use patch::{Apply, Move, Moves, Operation, OperationKind, Patch};
pub use props::{diff_props, PropChange, PropsDiff};
pub use walk::{diff, diff_text, diff_with_config, Differ};
