//! In-memory forest behind the changelist table
//!
//! The model is built once per page load from the server bootstrap data and
//! the ids of the rows that actually made it into the DOM. It is the single
//! source for parent/child/level queries; nothing is re-derived from markup
//! after construction.
//!
//! Invariants kept by every mutation:
//! - the nodes form a forest, no node is its own ancestor
//! - `row_order` is the document order of the rows and always equals a
//!   depth-first, left-to-right walk of `roots` and `children`
//! - `level(x) == level(parent(x)) + 1`, roots are level 0
//! - every referenced id exists in `nodes`

use std::collections::{HashMap, HashSet};

use crate::errors::TreeError;
use crate::models::bootstrap::TreeBootstrap;
use crate::models::collapsed::CollapsedSet;
use crate::models::node::{Node, NodeId};

/// The tree editor's node graph plus row order and collapsed state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeModel {
    pub(crate) nodes: HashMap<NodeId, Node>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) row_order: Vec<NodeId>,
    pub(crate) collapsed: CollapsedSet,
}

impl TreeModel {
    /// Build the model from bootstrap data and the rows present in the DOM
    ///
    /// `present_rows` lists row ids in document order. Ids referenced by the
    /// bootstrap data without a row are pruned: they vanish from children
    /// lists, and a parent pointer to them becomes `None`. This is expected
    /// for permission-filtered views and never reported as an error.
    pub fn build(bootstrap: &TreeBootstrap, present_rows: &[NodeId]) -> Self {
        let adjacency = bootstrap.adjacency();

        let mut model = TreeModel::default();
        let mut order: Vec<NodeId> = Vec::with_capacity(present_rows.len());
        for &id in present_rows {
            if model.nodes.contains_key(&id) {
                log::warn!("row for node {} appears twice, keeping the first", id);
                continue;
            }
            model.nodes.insert(id, Node::new(id));
            order.push(id);
        }

        let mut pruned = 0usize;
        for &parent_id in &order {
            let Some(children) = adjacency.children.get(&parent_id) else {
                continue;
            };
            for &child_id in children {
                if child_id == parent_id {
                    log::warn!("node {} lists itself as a child, ignoring", child_id);
                    continue;
                }
                let Some(child) = model.nodes.get_mut(&child_id) else {
                    pruned += 1;
                    continue;
                };
                if child.parent.is_some() {
                    log::warn!("node {} has more than one parent, keeping the first", child_id);
                    continue;
                }
                child.parent = Some(parent_id);
                if let Some(parent) = model.nodes.get_mut(&parent_id) {
                    parent.children.push(child_id);
                }
            }
        }
        if pruned > 0 {
            log::debug!("pruned {} child references without a row", pruned);
        }

        model.roots = order
            .iter()
            .copied()
            .filter(|id| model.nodes.get(id).is_some_and(Node::is_root))
            .collect();

        model.break_unreachable_cycles(&order);
        model.reindex();

        for (id, expected) in &adjacency.levels {
            if let Some(node) = model.nodes.get(id) {
                if node.level != *expected {
                    log::debug!(
                        "node {} rendered at level {} but sits at level {} after pruning",
                        id,
                        expected,
                        node.level
                    );
                }
            }
        }

        log::info!(
            "tree model built: {} nodes, {} roots",
            model.nodes.len(),
            model.roots.len()
        );
        model
    }

    /// Nodes caught in a parent cycle are unreachable from any root; detach
    /// them so the result is a forest again.
    fn break_unreachable_cycles(&mut self, order: &[NodeId]) {
        let mut reachable: HashSet<NodeId> = self.dfs_order().into_iter().collect();
        for &id in order {
            if reachable.contains(&id) {
                continue;
            }
            log::warn!("node {} is part of a parent cycle, promoting it to a root", id);
            if let Some(parent_id) = self.nodes.get_mut(&id).and_then(|node| node.parent.take()) {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|&child| child != id);
                }
            }
            self.roots.push(id);
            reachable.extend(self.subtree_dfs(id));
        }
    }

    /// Recompute row order, levels and descendant caches from the structure
    pub(crate) fn reindex(&mut self) {
        self.row_order = self.dfs_order();

        let mut levels: HashMap<NodeId, u32> = HashMap::with_capacity(self.nodes.len());
        for &id in &self.row_order {
            let level = self
                .nodes
                .get(&id)
                .and_then(|node| node.parent)
                .and_then(|parent| levels.get(&parent))
                .map_or(0, |level| level + 1);
            levels.insert(id, level);
        }
        for (id, level) in levels {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.level = level;
            }
        }

        self.refresh_descendants();
    }

    /// Recompute the cached descendant lists from `row_order`
    ///
    /// Relies on the row order invariant: a node's descendants are exactly the
    /// rows following it that are deeper than the node.
    pub(crate) fn refresh_descendants(&mut self) {
        let levels: Vec<u32> = self
            .row_order
            .iter()
            .map(|id| self.nodes.get(id).map_or(0, |node| node.level))
            .collect();

        for (ix, &id) in self.row_order.iter().enumerate() {
            let level = levels[ix];
            let mut end = ix + 1;
            while end < levels.len() && levels[end] > level {
                end += 1;
            }
            let descendants = self.row_order[ix + 1..end].to_vec();
            if let Some(node) = self.nodes.get_mut(&id) {
                node.descendants = descendants;
            }
        }
    }

    /// Depth-first, left-to-right walk of the forest
    pub fn dfs_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            out.extend(self.subtree_dfs(root));
        }
        out
    }

    fn subtree_dfs(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Document order of all rows, hidden ones included
    pub fn row_order(&self) -> &[NodeId] {
        &self.row_order
    }

    pub fn row_index(&self, id: NodeId) -> Option<usize> {
        self.row_order.iter().position(|&row| row == id)
    }

    /// The row physically following `id`, regardless of visibility
    pub fn next_row(&self, id: NodeId) -> Option<NodeId> {
        let ix = self.row_index(id)?;
        self.row_order.get(ix + 1).copied()
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |node| node.children.as_slice())
    }

    /// All transitive children, in document order
    pub fn descendants_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |node| node.descendants.as_slice())
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn level_of(&self, id: NodeId) -> Option<u32> {
        self.nodes.get(&id).map(|node| node.level)
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(Node::has_children)
    }

    pub fn is_descendant(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.descendants_of(ancestor).contains(&id)
    }

    /// Chain of ancestors, nearest first
    pub fn ancestors_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if out.contains(&parent) {
                break;
            }
            out.push(parent);
            current = self.parent_of(parent);
        }
        out
    }

    /// Drop a childless node from the structure and row order
    ///
    /// Returns the parent when it just lost its last child.
    pub fn remove_leaf(&mut self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        let node = self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))?;
        if node.has_children() {
            return Err(TreeError::HasChildren(id));
        }
        let parent = node.parent;

        self.nodes.remove(&id);
        self.row_order.retain(|&row| row != id);
        self.collapsed.remove(id);
        let emptied = match parent {
            Some(parent_id) => match self.nodes.get_mut(&parent_id) {
                Some(parent) => {
                    parent.children.retain(|&child| child != id);
                    !parent.has_children()
                }
                None => false,
            },
            None => {
                self.roots.retain(|&root| root != id);
                false
            }
        };
        self.refresh_descendants();

        Ok(parent.filter(|_| emptied))
    }

    pub fn set_editable(&mut self, id: NodeId, editable: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.editable = editable;
        }
    }

    pub fn is_editable(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.editable)
    }

    // ------------------------------------------------------------------------
    // Expand / collapse state
    // ------------------------------------------------------------------------

    /// True iff the node is not in the collapsed set
    pub fn is_expanded(&self, id: NodeId) -> bool {
        !self.collapsed.contains(id)
    }

    /// Returns `true` when the state changed
    pub fn mark_open(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.open = true;
        self.collapsed.remove(id)
    }

    /// Returns `true` when the state changed
    pub fn mark_closed(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.open = false;
        self.collapsed.insert(id)
    }

    pub fn collapsed(&self) -> &CollapsedSet {
        &self.collapsed
    }

    /// Forget every collapsed node
    pub(crate) fn open_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.open = true;
        }
        self.collapsed.clear();
    }

    /// A row is visible when every ancestor is expanded
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.contains(id)
            && self
                .ancestors_of(id)
                .into_iter()
                .all(|ancestor| self.is_expanded(ancestor))
    }

    /// Visible rows in document order
    pub fn visible_rows(&self) -> Vec<NodeId> {
        let mut visible: HashSet<NodeId> = HashSet::with_capacity(self.row_order.len());
        let mut out = Vec::with_capacity(self.row_order.len());
        for &id in &self.row_order {
            let shown = match self.parent_of(id) {
                None => true,
                Some(parent) => visible.contains(&parent) && self.is_expanded(parent),
            };
            if shown {
                visible.insert(id);
                out.push(id);
            }
        }
        out
    }
}
