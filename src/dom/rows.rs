//! Changelist rows and their markers
//!
//! The registry maps node ids to the row and marker elements found when the
//! editor starts. Row ids come from the marker's DOM id (`page_marker-<id>`).

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node};

use crate::drag::RowBox;
use crate::edit::RowStripe;
use crate::models::NodeId;
use crate::options::TreeEditorOptions;

pub const CHILDREN_CLASS: &str = "children";
pub const CLOSED_CLASS: &str = "closed";
pub const ROOT_CLASS: &str = "tree-root";

/// Numeric id after the first `-` of a DOM id
///
/// `page_marker-327` gives `327`. Trailing garbage after the digits is
/// ignored; no digits at all gives `None`.
pub fn extract_item_id(dom_id: &str) -> Option<NodeId> {
    let (_, rest) = dom_id.split_once('-')?;
    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    digits.parse().ok()
}

/// A row as found in the DOM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedRow {
    pub id: NodeId,
    pub editable: bool,
}

struct RowHandle {
    row: HtmlElement,
    marker: HtmlElement,
}

pub struct RowRegistry {
    rows: HashMap<NodeId, RowHandle>,
    /// Parent of the rows, usually the `tbody`
    container: Option<Node>,
}

impl RowRegistry {
    /// Collect the rows of the changelist table in document order
    ///
    /// Rows without a parsable marker are skipped. Drag handles inside
    /// read-only rows lose their handle class so they cannot start a drag.
    pub fn scan(
        document: &Document,
        options: &TreeEditorOptions,
    ) -> Result<(Self, Vec<ScannedRow>), JsValue> {
        let table = document
            .query_selector(&options.table_selector)?
            .ok_or_else(|| JsValue::from_str(&format!("no element matches {}", options.table_selector)))?;
        let list = table.query_selector_all(&options.row_selector)?;

        let mut registry = RowRegistry {
            rows: HashMap::new(),
            container: None,
        };
        let mut scanned = Vec::with_capacity(list.length() as usize);

        for ix in 0..list.length() {
            let Some(row) = list.get(ix).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            let Some(marker) = row
                .query_selector(&options.marker_selector)?
                .and_then(|marker| marker.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let Some(id) = extract_item_id(&marker.id()) else {
                crate::wasm_warn!("row marker '{}' carries no node id", marker.id());
                continue;
            };

            let editable = row.query_selector(&options.not_editable_selector)?.is_none();
            if !editable {
                let handles = row.query_selector_all(&format!(".{}", options.drag_handle_class))?;
                for handle_ix in 0..handles.length() {
                    if let Some(handle) = handles.get(handle_ix).and_then(|node| node.dyn_into::<Element>().ok()) {
                        handle.class_list().remove_1(&options.drag_handle_class)?;
                    }
                }
            }

            if registry.container.is_none() {
                registry.container = row.parent_node();
            }
            registry.rows.insert(id, RowHandle { row, marker });
            scanned.push(ScannedRow { id, editable });
        }

        Ok((registry, scanned))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: NodeId) -> Option<&HtmlElement> {
        self.rows.get(&id).map(|handle| &handle.row)
    }

    pub fn set_displayed(&self, id: NodeId, displayed: bool) -> Result<(), JsValue> {
        let Some(handle) = self.rows.get(&id) else {
            return Ok(());
        };
        let style = handle.row.style();
        if displayed {
            style.remove_property("display")?;
        } else {
            style.set_property("display", "none")?;
        }
        Ok(())
    }

    /// Expand affordance and open state of the marker
    pub fn set_marker(&self, id: NodeId, has_children: bool, open: bool) -> Result<(), JsValue> {
        let Some(handle) = self.rows.get(&id) else {
            return Ok(());
        };
        let classes = handle.marker.class_list();
        classes.toggle_with_force(CHILDREN_CLASS, has_children)?;
        classes.toggle_with_force(CLOSED_CLASS, has_children && !open)?;
        Ok(())
    }

    /// Indentation and root flag after a level change
    pub fn set_level(&self, id: NodeId, level: u32, width: f64) -> Result<(), JsValue> {
        let Some(handle) = self.rows.get(&id) else {
            return Ok(());
        };
        handle.marker.style().set_property("width", &format!("{}px", width))?;
        handle.marker.class_list().toggle_with_force(ROOT_CLASS, level == 0)?;
        Ok(())
    }

    /// Page-coordinate box of a row
    pub fn row_box(&self, id: NodeId, scroll_x: f64, scroll_y: f64) -> Option<RowBox> {
        let handle = self.rows.get(&id)?;
        let rect = handle.row.get_bounding_client_rect();
        Some(RowBox::new(
            id,
            rect.left() + scroll_x,
            rect.top() + scroll_y,
            rect.width(),
            rect.height(),
        ))
    }

    /// Move the rows of `block` in front of `before`, or to the end
    pub fn move_block(&self, block: &[NodeId], before: Option<NodeId>) -> Result<(), JsValue> {
        let Some(container) = self.container.as_ref() else {
            return Ok(());
        };
        let anchor: Option<&Node> = before.and_then(|id| self.row(id)).map(|row| row.as_ref());
        for id in block {
            if let Some(row) = self.row(*id) {
                container.insert_before(row, anchor)?;
            }
        }
        Ok(())
    }

    /// Re-append every row in `order`, which becomes the document order
    pub fn reorder_all(&self, order: &[NodeId]) -> Result<(), JsValue> {
        let Some(container) = self.container.as_ref() else {
            return Ok(());
        };
        for id in order {
            if let Some(row) = self.row(*id) {
                container.append_child(row)?;
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, id: NodeId) {
        if let Some(handle) = self.rows.remove(&id) {
            handle.row.remove();
        }
    }

    pub fn apply_stripes(&self, stripes: &[(NodeId, RowStripe)]) -> Result<(), JsValue> {
        for (id, stripe) in stripes {
            if let Some(row) = self.row(*id) {
                let classes = row.class_list();
                classes.remove_1(stripe.other().class_name())?;
                classes.add_1(stripe.class_name())?;
            }
        }
        Ok(())
    }

    /// Roving tabindex: only `id` is reachable with Tab
    pub fn focus(&self, id: NodeId) -> Result<(), JsValue> {
        for handle in self.rows.values() {
            handle.row.set_tab_index(-1);
        }
        if let Some(row) = self.row(id) {
            row.set_tab_index(0);
            row.focus()?;
        }
        Ok(())
    }
}
