//! Per-instance editor options
//!
//! Every field has a default matching the stock changelist markup, so the page
//! glue usually passes `undefined` or only the fields it overrides:
//!
//! ```js
//! new TreeEditor(feincms.tree_bootstrap, { endpoint: "./", geometry: { childPad: 24 } });
//! ```

use serde::{Deserialize, Serialize};

use crate::drag::DragGeometry;

/// Options for one [`crate::api::TreeEditor`] instance
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeEditorOptions {
    /// Table holding the changelist rows
    pub table_selector: String,
    /// Rows inside the table
    pub row_selector: String,
    /// Expand/collapse marker inside each row; its DOM id carries the node id
    pub marker_selector: String,
    /// Class of the handle that starts a drag
    pub drag_handle_class: String,
    /// Rows containing this selector are read-only
    pub not_editable_selector: String,
    /// URL receiving the `__cmd` POSTs
    pub endpoint: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub collapsed_cookie: String,
    pub collapsed_cookie_days: u32,
    /// Marker width of a root row, in pixels
    pub marker_base_width: f64,
    /// Extra marker width per nesting level
    pub marker_level_width: f64,
    pub geometry: DragGeometry,
    pub messages: Messages,
}

impl Default for TreeEditorOptions {
    fn default() -> Self {
        Self {
            table_selector: "#result_list".to_string(),
            row_selector: "tbody tr".to_string(),
            marker_selector: ".page_marker".to_string(),
            drag_handle_class: "drag_handle".to_string(),
            not_editable_selector: ".tree-item-not-editable".to_string(),
            endpoint: ".".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            collapsed_cookie: "feincms_collapsed_nodes".to_string(),
            collapsed_cookie_days: 7,
            marker_base_width: 14.0,
            marker_level_width: 18.0,
            geometry: DragGeometry::default(),
            messages: Messages::default(),
        }
    }
}

impl TreeEditorOptions {
    /// Cookie lifetime in seconds (`max-age`)
    pub fn collapsed_cookie_max_age(&self) -> u64 {
        u64::from(self.collapsed_cookie_days) * 24 * 60 * 60
    }

    /// Width of the marker span, which doubles as the row's indentation
    pub fn marker_width(&self, level: u32) -> f64 {
        self.marker_base_width + f64::from(level) * self.marker_level_width
    }
}

/// User-facing dialog texts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub delete_has_children: String,
    pub delete_confirm: String,
    pub delete_success: String,
    pub tree_saved: String,
    pub toggle_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            delete_has_children: "Cannot delete item, because it is parent of at least one other item."
                .to_string(),
            delete_confirm: "Really delete item?".to_string(),
            delete_success: "Item deleted successfully.".to_string(),
            tree_saved: "Tree saved successfully.".to_string(),
            toggle_failed: "Unable to toggle".to_string(),
        }
    }
}
