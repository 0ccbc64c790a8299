//! Tree nodes.
//!
//! A [`Node`] has a type tag, a [`Content`] that is exactly one of void, text
//! or parent, and a map of extra properties. Nodes are shared through
//! [`NodeRef`] so that a subtree reused on both sides of a diff can be
//! recognised by pointer identity.
//!
//! # Invariants
//!
//! - `kind` is non-empty.
//! - `props` never holds the structural names `type`, `children` or `value`.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::TypeError;

/// Shared handle to a node. Identity is `Arc::ptr_eq`.
pub type NodeRef = Arc<Node>;

/// Non-structural properties of a node.
pub type Props = Map<String, Value>;

/// Property names that are part of the node structure itself.
pub const RESERVED_KEYS: [&str; 3] = ["type", "children", "value"];

/// The shape of a node, decided once from its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Void,
    Text,
    Parent,
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeShape::Void => "void",
            NodeShape::Text => "text",
            NodeShape::Parent => "parent",
        };
        f.write_str(name)
    }
}

/// What a node carries besides its type and properties.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// Neither a value nor children.
    Void,
    /// A scalar text payload.
    Text(String),
    /// Ordered children.
    Parent(Vec<NodeRef>),
}

impl Content {
    pub fn shape(&self) -> NodeShape {
        match self {
            Content::Void => NodeShape::Void,
            Content::Text(_) => NodeShape::Text,
            Content::Parent(_) => NodeShape::Parent,
        }
    }
}

/// A single tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// The type tag (`type` in the document model).
    pub kind: String,
    /// Void, text or parent payload.
    pub content: Content,
    /// Every other property of the node.
    pub props: Props,
}

impl Node {
    /// A node with no value and no children.
    pub fn void(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: Content::Void,
            props: Props::new(),
        }
    }

    /// A text node.
    pub fn text(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: Content::Text(value.into()),
            props: Props::new(),
        }
    }

    /// A parent node. An empty child list still makes a parent.
    pub fn parent(kind: impl Into<String>, children: impl IntoIterator<Item = NodeRef>) -> Self {
        Self {
            kind: kind.into(),
            content: Content::Parent(children.into_iter().collect()),
            props: Props::new(),
        }
    }

    /// Set a property, replacing any previous value under `key`.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Wrap the node in a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    pub fn shape(&self) -> NodeShape {
        self.content.shape()
    }

    /// The text payload, if this is a text node.
    pub fn value(&self) -> Option<&str> {
        match &self.content {
            Content::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The children, if this is a parent node.
    pub fn children(&self) -> Option<&[NodeRef]> {
        match &self.content {
            Content::Parent(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.shape() == NodeShape::Text
    }

    pub fn is_parent(&self) -> bool {
        self.shape() == NodeShape::Parent
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn size(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(|child| child.size()).sum())
    }

    /// Check this subtree against the tree model.
    ///
    /// Stops at the first offending node.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.kind.is_empty() {
            return Err(TypeError::MissingType);
        }

        if let Some(key) = self
            .props
            .keys()
            .find(|key| RESERVED_KEYS.contains(&key.as_str()))
        {
            return Err(TypeError::ReservedProperty {
                kind: self.kind.clone(),
                key: key.clone(),
            });
        }

        for child in self.children().unwrap_or_default() {
            child.validate()?;
        }
        Ok(())
    }

    /// Copy the whole subtree into fresh allocations.
    ///
    /// Unlike `clone`, which shares child handles, no node of the copy is
    /// pointer-identical to a node of `self`.
    pub fn deep_copy(&self) -> Node {
        let content = match &self.content {
            Content::Parent(children) => Content::Parent(
                children
                    .iter()
                    .map(|child| Arc::new(child.deep_copy()))
                    .collect(),
            ),
            other => other.clone(),
        };
        Node {
            kind: self.kind.clone(),
            content,
            props: self.props.clone(),
        }
    }
}

/// Subtree size of an optional node; an absent node counts as zero.
pub fn size(node: Option<&Node>) -> usize {
    node.map_or(0, Node::size)
}
