//! Foundation types for Sylva.
//!
//! This crate provides the tree model diffed by `sylva-diff`: typed nodes
//! with a closed void/text/parent shape, their extra properties, and the
//! small helpers the differ relies on.
//!
//! # Key Types
//!
//! - [`Node`] / [`NodeRef`] — A tree node and its shared, identity-carrying handle
//! - [`Content`] / [`NodeShape`] — The void/text/parent payload of a node
//! - [`Props`] — Non-structural properties (sorted JSON map)
//! - [`Shape`] — Shape predicates for property values
//! - [`TypeError`] — Malformed-node errors

pub mod error;
pub mod node;
pub mod shape;

pub use error::TypeError;
pub use node::{size, Content, Node, NodeRef, NodeShape, Props, RESERVED_KEYS};
pub use shape::{as_record, is_record, is_sequence, Shape};
