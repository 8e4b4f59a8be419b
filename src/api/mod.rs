//! Tree editor WASM API
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serde conversions and error mapping
//! - `editor`: the `TreeEditor` class (drag, expand/collapse, keyboard, delete, save)
//! - `toggle`: the `toggleBoolean` function for in-place boolean cells

pub mod helpers;
pub mod editor;
pub mod toggle;

pub use editor::TreeEditor;
pub use toggle::toggle_boolean;
