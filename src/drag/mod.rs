//! Pointer hit-testing and the drag gesture

pub mod controller;
pub mod geometry;

pub use controller::{DragController, DragFrame, DragState, DropOutcome};
pub use geometry::{DragGeometry, GhostPlacement, Indicator, Point, RowBox, ScrollRequest, Viewport};
pub use hit_test::{hit_test, next_row_is_deeper, Candidate, DropPosition};
