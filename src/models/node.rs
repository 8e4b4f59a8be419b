//! Node records of the changelist tree

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a tree node (the row's primary key)
pub type NodeId = u32;

/// One content item in the hierarchy, rendered as one table row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,

    /// Immediate parent, `None` for top-level rows
    pub parent: Option<NodeId>,

    /// Direct children in on-screen order
    pub children: Vec<NodeId>,

    /// All transitive children in document order (cached)
    #[serde(skip)]
    pub descendants: Vec<NodeId>,

    /// Nesting depth, 0 for roots
    pub level: u32,

    /// Whether the subtree is expanded in the UI
    pub open: bool,

    /// Rows marked as not editable cannot be dragged
    pub editable: bool,
}

impl Node {
    /// Create a detached root node
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            descendants: Vec::new(),
            level: 0,
            open: true,
            editable: true,
        }
    }

    /// A node with children shows the expand affordance
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
