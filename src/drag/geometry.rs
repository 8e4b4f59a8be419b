//! Page geometry used while dragging
//!
//! All coordinates are document (page) pixels: the DOM adapter adds the scroll
//! offset to client rects before handing them over.

use serde::{Deserialize, Serialize};

use crate::models::NodeId;

/// Tunable constants of the drag gesture
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DragGeometry {
    /// Horizontal indentation per nesting level of the drop line
    pub child_pad: f64,
    /// Fixed left padding of the drop line (handle and marker columns)
    pub line_base_padding: f64,
    /// The ghost is drawn this far left of the pointer
    pub ghost_offset_x: f64,
    pub ghost_width: f64,
    pub ghost_opacity: f64,
    /// Scroll down when the pointer is closer than this to the viewport bottom
    pub scroll_margin_bottom: f64,
    /// Scroll up when the pointer is closer than this to the viewport top
    pub scroll_margin_top: f64,
    pub scroll_step: f64,
    pub scroll_duration_ms: u32,
}

impl Default for DragGeometry {
    fn default() -> Self {
        Self {
            child_pad: 20.0,
            line_base_padding: 37.0,
            ghost_offset_x: 30.0,
            ghost_width: 600.0,
            ghost_opacity: 0.8,
            scroll_margin_bottom: 100.0,
            scroll_margin_top: 50.0,
            scroll_step: 250.0,
            scroll_duration_ms: 500,
        }
    }
}

/// Pointer position in page coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of one visible row
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RowBox {
    pub id: NodeId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RowBox {
    pub fn new(id: NodeId, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            left,
            top,
            width,
            height,
        }
    }

    /// Vertical containment, top edge inclusive
    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Visible part of the document
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

/// Where the floating row clone is drawn
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GhostPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub opacity: f64,
}

/// Animated scroll of the document to `scroll_top`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub scroll_top: f64,
    pub duration_ms: u32,
}

/// The horizontal drop line
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Indicator {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

impl DragGeometry {
    pub fn ghost_at(&self, pointer: Point) -> GhostPlacement {
        GhostPlacement {
            left: pointer.x - self.ghost_offset_x,
            top: pointer.y,
            width: self.ghost_width,
            opacity: self.ghost_opacity,
        }
    }

    /// Auto-scroll when the pointer nears the bottom or top edge
    pub fn autoscroll(&self, pointer: Point, viewport: Viewport) -> Option<ScrollRequest> {
        let bottom = viewport.scroll_top + viewport.height;
        let scroll_top = if pointer.y + self.scroll_margin_bottom > bottom {
            viewport.scroll_top + self.scroll_step
        } else if pointer.y - self.scroll_margin_top < viewport.scroll_top {
            (viewport.scroll_top - self.scroll_step).max(0.0)
        } else {
            return None;
        };
        if scroll_top == viewport.scroll_top {
            return None;
        }
        Some(ScrollRequest {
            scroll_top,
            duration_ms: self.scroll_duration_ms,
        })
    }
}
