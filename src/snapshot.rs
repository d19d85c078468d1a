//! Node snapshots - a normalized, format-agnostic view of a parse result
//!
//! Formatters never walk `ParseNode`s or domain values directly. Anything that
//! can be printed implements [`ToSnapshot`], and every output format consumes
//! the resulting [`NodeSnapshot`] tree.

use crate::node::ParseNode;
use serde::{Deserialize, Serialize};

/// A snapshot of one node and its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// The type of node (e.g., "Sequence", "Char", "Abs")
    pub node_type: String,

    /// Short human-readable description of the node
    pub label: String,

    /// Child nodes in order
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Conversion into a [`NodeSnapshot`]
pub trait ToSnapshot {
    fn to_snapshot(&self) -> NodeSnapshot;
}

impl<T: ToSnapshot> ToSnapshot for ParseNode<T> {
    fn to_snapshot(&self) -> NodeSnapshot {
        match self {
            ParseNode::Literal(text) => NodeSnapshot::new("Literal", format!("{:?}", text)),
            ParseNode::Char(c) => NodeSnapshot::new("Char", format!("{:?}", c)),
            ParseNode::Sequence(children) | ParseNode::Repetition(children) => {
                let label = match self.matched_text() {
                    Some(text) => format!("{:?}", text),
                    None => format!("{} items", children.len()),
                };
                NodeSnapshot::new(self.kind(), label)
                    .with_children(children.iter().map(ToSnapshot::to_snapshot))
            }
            ParseNode::Value(value) => value.to_snapshot(),
        }
    }
}
