//! Client side of the `delete_item` flow
//!
//! Only leaves may be deleted. The check runs before any dialog or request;
//! the model changes only after the server accepted the deletion.

use serde::{Deserialize, Serialize};

use crate::errors::TreeError;
use crate::models::{NodeId, TreeModel};

/// What the DOM adapter must do after a confirmed deletion
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub removed: NodeId,
    /// Parent whose `children` marker must be cleared
    pub emptied_parent: Option<NodeId>,
}

/// Refuse deletion of unknown nodes and nodes with children
pub fn check_delete(model: &TreeModel, id: NodeId) -> Result<(), TreeError> {
    if !model.contains(id) {
        return Err(TreeError::UnknownNode(id));
    }
    if model.has_children(id) {
        return Err(TreeError::HasChildren(id));
    }
    Ok(())
}

/// Apply an accepted deletion to the model
pub fn complete_delete(model: &mut TreeModel, id: NodeId) -> Result<DeleteOutcome, TreeError> {
    let emptied_parent = model.remove_leaf(id)?;
    log::debug!("node {} deleted", id);
    Ok(DeleteOutcome {
        removed: id,
        emptied_parent,
    })
}
