//! Structural edits, serialization and expand/collapse

pub mod delete;
pub mod keyboard;
pub mod moves;
pub mod nested_set;
pub mod visibility;

pub use delete::{check_delete, complete_delete, DeleteOutcome};
pub use keyboard::{key_action, KeyAction};
pub use moves::{apply_move, MoveIntent, MoveOutcome, MovePosition};
pub use nested_set::{reconstruct, serialize_tree, to_json, NestedSetRow, NestedSetTuple, ReconstructedTree};
pub use visibility::{collapse_all, expand_all, restore_collapsed, stripes, toggle, RowStripe, VisibilityChange};
