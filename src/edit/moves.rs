//! Structural moves of a subtree
//!
//! A move detaches the dragged row together with its contiguous run of
//! descendant rows and re-homes the block next to the target, shifting every
//! level in the block by the same delta. Row order keeps mirroring the
//! depth-first order of the children lists, which the nested-set serializer
//! depends on.

use serde::{Deserialize, Serialize};

use crate::errors::TreeError;
use crate::models::{NodeId, TreeModel};

/// Where the dragged node lands relative to the target
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MovePosition {
    /// Previous sibling of the target
    Before,
    /// Next sibling of the target
    After,
    /// Last child of the target
    LastChild,
}

impl MovePosition {
    /// Encoding understood by the `move_node` endpoint
    pub fn as_wire(self) -> &'static str {
        match self {
            MovePosition::Before => "left",
            MovePosition::After => "right",
            MovePosition::LastChild => "last-child",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "left" | "before" => Some(MovePosition::Before),
            "right" | "after" => Some(MovePosition::After),
            "last-child" => Some(MovePosition::LastChild),
            _ => None,
        }
    }
}

/// A resolved drop, ready to be applied and sent to the server
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    pub dragged: NodeId,
    pub target: NodeId,
    pub position: MovePosition,
}

/// What a successful move changed, for the DOM adapter
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The dragged row followed by its descendants, in document order
    pub block: Vec<NodeId>,
    /// Row the block now precedes; `None` when it ends the table
    pub insert_before: Option<NodeId>,
    pub level_delta: i64,
    pub old_parent: Option<NodeId>,
    pub new_parent: Option<NodeId>,
    /// Former parent that lost its last child
    pub emptied_parent: Option<NodeId>,
    /// Target that received its first child
    pub new_parent_row: Option<NodeId>,
}

/// Apply a structural move to the model
///
/// The model is left untouched when an error is returned.
pub fn apply_move(model: &mut TreeModel, intent: MoveIntent) -> Result<MoveOutcome, TreeError> {
    let MoveIntent {
        dragged,
        target,
        position,
    } = intent;

    if dragged == target {
        return Err(TreeError::SelfDrop(dragged));
    }
    let old_level = model.level_of(dragged).ok_or(TreeError::UnknownNode(dragged))?;
    let target_level = model.level_of(target).ok_or(TreeError::UnknownNode(target))?;
    if model.is_descendant(dragged, target) {
        return Err(TreeError::WouldCycle { dragged, target });
    }

    let new_level = match position {
        MovePosition::LastChild => target_level + 1,
        MovePosition::Before | MovePosition::After => target_level,
    };
    let level_delta = i64::from(new_level) - i64::from(old_level);

    let old_parent = model.parent_of(dragged);
    let new_parent = match position {
        MovePosition::LastChild => Some(target),
        MovePosition::Before | MovePosition::After => model.parent_of(target),
    };
    let target_had_children = model.has_children(target);

    // Detach the block from the row order
    let start = model.row_index(dragged).ok_or(TreeError::UnknownNode(dragged))?;
    let len = 1 + model.descendants_of(dragged).len();
    let block: Vec<NodeId> = model.row_order.drain(start..start + len).collect();

    // Unlink from the old sibling list
    siblings_mut(model, old_parent).retain(|&id| id != dragged);

    // Insertion point, computed on the order without the block. The target's
    // cached descendants still include the block when the target is an
    // ancestor of the dragged node.
    let target_ix = model
        .row_order
        .iter()
        .position(|&id| id == target)
        .ok_or(TreeError::UnknownNode(target))?;
    let insert_at = match position {
        MovePosition::Before => target_ix,
        MovePosition::After | MovePosition::LastChild => {
            let remaining = model
                .descendants_of(target)
                .iter()
                .filter(|id| !block.contains(id))
                .count();
            target_ix + 1 + remaining
        }
    };
    let insert_before = model.row_order.get(insert_at).copied();
    model
        .row_order
        .splice(insert_at..insert_at, block.iter().copied());

    // Link into the new sibling list
    {
        let siblings = siblings_mut(model, new_parent);
        match position {
            MovePosition::Before => {
                let ix = siblings.iter().position(|&id| id == target).unwrap_or(0);
                siblings.insert(ix, dragged);
            }
            MovePosition::After => {
                let ix = siblings
                    .iter()
                    .position(|&id| id == target)
                    .map_or(siblings.len(), |ix| ix + 1);
                siblings.insert(ix, dragged);
            }
            MovePosition::LastChild => siblings.push(dragged),
        }
    }
    if let Some(node) = model.nodes.get_mut(&dragged) {
        node.parent = new_parent;
    }

    if level_delta != 0 {
        for id in &block {
            if let Some(node) = model.nodes.get_mut(id) {
                node.level = shift_level(node.level, level_delta);
            }
        }
    }

    model.refresh_descendants();
    debug_assert_eq!(model.dfs_order(), model.row_order);

    let emptied_parent = old_parent
        .filter(|&parent| Some(parent) != new_parent && !model.has_children(parent));
    let new_parent_row = (position == MovePosition::LastChild && !target_had_children).then_some(target);

    log::debug!(
        "moved node {} {:?} node {} (level delta {}, {} rows)",
        dragged,
        position,
        target,
        level_delta,
        block.len()
    );

    Ok(MoveOutcome {
        block,
        insert_before,
        level_delta,
        old_parent,
        new_parent,
        emptied_parent,
        new_parent_row,
    })
}

fn siblings_mut(model: &mut TreeModel, parent: Option<NodeId>) -> &mut Vec<NodeId> {
    match parent {
        Some(parent) => match model.nodes.get_mut(&parent) {
            Some(node) => &mut node.children,
            None => &mut model.roots,
        },
        None => &mut model.roots,
    }
}

fn shift_level(level: u32, delta: i64) -> u32 {
    u32::try_from((i64::from(level) + delta).max(0)).unwrap_or(u32::MAX)
}
