//! Expand/collapse of subtrees
//!
//! Only the `open` flags change here, never the structure. Showing a node
//! reveals its children and, transitively, the children of children that are
//! themselves open; hiding a node hides every descendant regardless of its
//! own flag. Both fall out of diffing the visible row set before and after
//! the flag change.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{CollapsedSet, NodeId, TreeModel};

/// Rows and markers to update after an expand/collapse
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityChange {
    pub show: Vec<NodeId>,
    pub hide: Vec<NodeId>,
    /// Markers that lose the `closed` class
    pub opened: Vec<NodeId>,
    /// Markers that gain the `closed` class
    pub closed: Vec<NodeId>,
}

impl VisibilityChange {
    pub fn is_empty(&self) -> bool {
        self.show.is_empty() && self.hide.is_empty() && self.opened.is_empty() && self.closed.is_empty()
    }
}

/// Stripe class of a visible row
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowStripe {
    Row1,
    Row2,
}

impl RowStripe {
    pub fn class_name(self) -> &'static str {
        match self {
            RowStripe::Row1 => "row1",
            RowStripe::Row2 => "row2",
        }
    }

    pub fn other(self) -> RowStripe {
        match self {
            RowStripe::Row1 => RowStripe::Row2,
            RowStripe::Row2 => RowStripe::Row1,
        }
    }
}

/// Flip the open state of `id`
///
/// Returns `None` for leaves, which have no expand affordance.
pub fn toggle(model: &mut TreeModel, id: NodeId) -> Option<VisibilityChange> {
    if !model.has_children(id) {
        return None;
    }
    let change = diff_visible(model, |model| {
        if model.is_expanded(id) {
            model.mark_closed(id);
        } else {
            model.mark_open(id);
        }
    });
    Some(change)
}

/// "Collapse entire tree": close every node that has children
pub fn collapse_all(model: &mut TreeModel) -> VisibilityChange {
    diff_visible(model, |model| {
        let parents: Vec<NodeId> = model
            .row_order()
            .iter()
            .copied()
            .filter(|&id| model.has_children(id))
            .collect();
        for id in parents {
            model.mark_closed(id);
        }
    })
}

/// "Open entire tree": open everything and forget the collapsed set
pub fn expand_all(model: &mut TreeModel) -> VisibilityChange {
    diff_visible(model, TreeModel::open_all)
}

/// Re-apply the collapsed set stored by a previous page load
///
/// Without stored state the whole tree starts collapsed. Stored ids without a
/// row, or without children, are ignored.
pub fn restore_collapsed(model: &mut TreeModel, stored: Option<&CollapsedSet>) -> VisibilityChange {
    match stored {
        None => collapse_all(model),
        Some(stored) => diff_visible(model, |model| {
            for &id in stored.ids() {
                if model.has_children(id) {
                    model.mark_closed(id);
                }
            }
        }),
    }
}

/// Alternating stripes for the visible rows, first row gets `row1`
pub fn stripes(visible: &[NodeId]) -> Vec<(NodeId, RowStripe)> {
    let mut stripe = RowStripe::Row1;
    visible
        .iter()
        .map(|&id| {
            let current = stripe;
            stripe = stripe.other();
            (id, current)
        })
        .collect()
}

fn diff_visible(model: &mut TreeModel, mutate: impl FnOnce(&mut TreeModel)) -> VisibilityChange {
    let before = model.visible_rows();
    let was_collapsed: HashSet<NodeId> = model.collapsed().ids().iter().copied().collect();

    mutate(model);

    let after = model.visible_rows();
    let before_set: HashSet<NodeId> = before.iter().copied().collect();
    let after_set: HashSet<NodeId> = after.iter().copied().collect();
    let now_collapsed: HashSet<NodeId> = model.collapsed().ids().iter().copied().collect();

    VisibilityChange {
        show: after.iter().copied().filter(|id| !before_set.contains(id)).collect(),
        hide: before.iter().copied().filter(|id| !after_set.contains(id)).collect(),
        opened: model
            .row_order()
            .iter()
            .copied()
            .filter(|id| was_collapsed.contains(id) && !now_collapsed.contains(id))
            .collect(),
        closed: model
            .row_order()
            .iter()
            .copied()
            .filter(|id| !was_collapsed.contains(id) && now_collapsed.contains(id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeBootstrap;

    fn model() -> TreeModel {
        // 1 { 2 { 3 }, 4 }, 5
        let bootstrap = TreeBootstrap::default()
            .with_children(None, &[1, 5])
            .with_children(Some(1), &[2, 4])
            .with_children(Some(2), &[3]);
        TreeModel::build(&bootstrap, &[1, 2, 3, 4, 5])
    }

    #[test]
    fn test_hide_hides_all_descendants() {
        let mut model = model();
        let change = toggle(&mut model, 1).unwrap();
        assert_eq!(change.hide, vec![2, 3, 4]);
        assert_eq!(change.closed, vec![1]);
        assert!(change.show.is_empty());
    }

    #[test]
    fn test_show_keeps_closed_children_closed() {
        let mut model = model();
        toggle(&mut model, 2);
        toggle(&mut model, 1);
        let change = toggle(&mut model, 1).unwrap();
        assert_eq!(change.show, vec![2, 4]);
        assert_eq!(change.opened, vec![1]);
    }

    #[test]
    fn test_leaf_has_no_toggle() {
        let mut model = model();
        assert!(toggle(&mut model, 3).is_none());
    }

    #[test]
    fn test_restore_without_cookie_collapses_everything() {
        let mut model = model();
        let change = restore_collapsed(&mut model, None);
        assert_eq!(model.visible_rows(), vec![1, 5]);
        assert_eq!(change.closed, vec![1, 2]);
    }

    #[test]
    fn test_restore_ignores_unknown_and_leaf_ids() {
        let mut model = model();
        let stored = CollapsedSet::from_cookie_value(Some("[2, 3, 99]")).unwrap();
        restore_collapsed(&mut model, Some(&stored));
        assert_eq!(model.collapsed().ids(), &[2]);
        assert_eq!(model.visible_rows(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_expand_all_clears_collapsed_set() {
        let mut model = model();
        collapse_all(&mut model);
        let change = expand_all(&mut model);
        assert!(model.collapsed().is_empty());
        assert_eq!(change.show, vec![2, 3, 4]);
    }

    #[test]
    fn test_stripes_alternate() {
        let classes: Vec<&str> = stripes(&[1, 2, 5])
            .into_iter()
            .map(|(_, stripe)| stripe.class_name())
            .collect();
        assert_eq!(classes, vec!["row1", "row2", "row1"]);
    }
}
