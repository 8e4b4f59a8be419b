//! Error types for tree editing
//!
//! Engine failures (`TreeError`) are terminal for the current gesture: the
//! caller logs them and leaves the tree untouched. Wire and transport failures
//! live in [`crate::protocol::ProtocolError`].

use thiserror::Error;

use crate::models::NodeId;

/// Errors raised by the tree model and the mutator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id has no row in the current model
    #[error("node {0} is not part of the tree")]
    UnknownNode(NodeId),

    /// A node was dropped onto its own row
    #[error("cannot drop node {0} onto itself")]
    SelfDrop(NodeId),

    /// The drop target lives inside the dragged subtree
    #[error("cannot move node {dragged} below its own descendant {target}")]
    WouldCycle { dragged: NodeId, target: NodeId },

    /// Only leaves may be deleted from the changelist
    #[error("node {0} still has children")]
    HasChildren(NodeId),

    /// A press arrived while another gesture was still active
    #[error("a drag gesture is already in progress")]
    GestureInProgress,

    /// The row is rendered read-only (object level permissions)
    #[error("node {0} is not editable")]
    NotEditable(NodeId),

    /// Bootstrap data could not be interpreted
    #[error("malformed bootstrap data: {0}")]
    Bootstrap(String),
}
