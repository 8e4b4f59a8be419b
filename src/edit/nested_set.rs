//! Nested-set serialization of the displayed tree
//!
//! Rows are visited in document order. Each visited row takes the next
//! counter value as `left`; a leaf immediately takes the following value as
//! `right`, while a parent stays on an ancestor stack until a row shows up
//! whose parent is not the top of the stack. Every top-level row opens a new
//! tree (one tree per root) and restarts the counter at 0.
//!
//! The server stores the rows verbatim, so the encoding must reproduce order
//! and ancestry exactly. That holds because row order always mirrors the
//! depth-first order of the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{NodeId, TreeModel};

/// Wire form: `[tree_id, parent_id, left, right, level, node_id]`
pub type NestedSetTuple = (u32, Option<NodeId>, u32, u32, u32, NodeId);

/// One row of the nested-set table
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(from = "NestedSetTuple", into = "NestedSetTuple")]
pub struct NestedSetRow {
    pub tree_id: u32,
    pub parent_id: Option<NodeId>,
    pub left: u32,
    pub right: u32,
    pub level: u32,
    pub node_id: NodeId,
}

impl From<NestedSetTuple> for NestedSetRow {
    fn from((tree_id, parent_id, left, right, level, node_id): NestedSetTuple) -> Self {
        Self {
            tree_id,
            parent_id,
            left,
            right,
            level,
            node_id,
        }
    }
}

impl From<NestedSetRow> for NestedSetTuple {
    fn from(row: NestedSetRow) -> Self {
        (
            row.tree_id,
            row.parent_id,
            row.left,
            row.right,
            row.level,
            row.node_id,
        )
    }
}

/// Encode the model in document order
pub fn serialize_tree(model: &TreeModel) -> Vec<NestedSetRow> {
    let mut rows: Vec<NestedSetRow> = Vec::with_capacity(model.len());
    // (node id, index into rows) of ancestors whose `right` is still open
    let mut ancestors: Vec<(NodeId, usize)> = Vec::new();
    let mut counter = 0u32;
    let mut tree_id = 0u32;

    for &id in model.row_order() {
        let parent = model.parent_of(id);

        while let Some(&(open, ix)) = ancestors.last() {
            if Some(open) == parent {
                break;
            }
            rows[ix].right = counter;
            counter += 1;
            ancestors.pop();
        }

        if parent.is_none() {
            tree_id += 1;
            counter = 0;
        }

        let mut row = NestedSetRow {
            tree_id,
            parent_id: parent,
            left: counter,
            right: 0,
            level: ancestors.len() as u32,
            node_id: id,
        };
        counter += 1;

        if model.has_children(id) {
            ancestors.push((id, rows.len()));
        } else {
            row.right = counter;
            counter += 1;
        }
        rows.push(row);
    }

    while let Some((_, ix)) = ancestors.pop() {
        rows[ix].right = counter;
        counter += 1;
    }

    rows
}

/// JSON payload for the `save_tree` command
pub fn to_json(rows: &[NestedSetRow]) -> String {
    serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
}

/// Parent/child structure recovered from interval containment alone
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconstructedTree {
    pub roots: Vec<NodeId>,
    pub children: BTreeMap<NodeId, Vec<NodeId>>,
}

/// Rebuild the adjacency from `(tree_id, left, right)` intervals
///
/// The `parent_id` and `level` columns are ignored on purpose, so comparing
/// the result with the model checks the intervals themselves.
pub fn reconstruct(rows: &[NestedSetRow]) -> ReconstructedTree {
    let mut sorted: Vec<&NestedSetRow> = rows.iter().collect();
    sorted.sort_by_key(|row| (row.tree_id, row.left));

    let mut tree = ReconstructedTree::default();
    let mut open: Vec<&NestedSetRow> = Vec::new();
    let mut current_tree = None;

    for row in sorted {
        if current_tree != Some(row.tree_id) {
            open.clear();
            current_tree = Some(row.tree_id);
        }
        while open.last().is_some_and(|top| top.right < row.left) {
            open.pop();
        }
        tree.children.entry(row.node_id).or_default();
        match open.last() {
            Some(parent) => tree
                .children
                .entry(parent.node_id)
                .or_default()
                .push(row.node_id),
            None => tree.roots.push(row.node_id),
        }
        open.push(row);
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeBootstrap;

    #[test]
    fn test_single_tree_numbers() {
        // 1 { 2 { 3 }, 4 }
        let bootstrap = TreeBootstrap::default()
            .with_children(None, &[1])
            .with_children(Some(1), &[2, 4])
            .with_children(Some(2), &[3]);
        let model = TreeModel::build(&bootstrap, &[1, 2, 3, 4]);
        let rows = serialize_tree(&model);

        let tuples: Vec<NestedSetTuple> = rows.iter().map(|&row| row.into()).collect();
        assert_eq!(
            tuples,
            vec![
                (1, None, 0, 7, 0, 1),
                (1, Some(1), 1, 4, 1, 2),
                (1, Some(2), 2, 3, 2, 3),
                (1, Some(1), 5, 6, 1, 4),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let row = NestedSetRow {
            tree_id: 2,
            parent_id: None,
            left: 0,
            right: 1,
            level: 0,
            node_id: 9,
        };
        assert_eq!(to_json(&[row]), "[[2,null,0,1,0,9]]");
        let parsed: Vec<NestedSetRow> = serde_json::from_str("[[2,null,0,1,0,9]]").unwrap();
        assert_eq!(parsed, vec![row]);
    }
}
