//! Tree Editor WASM Module
//!
//! Drag-and-drop reordering, expand/collapse and nested-set serialization for
//! the hierarchical changelist of the CMS admin. The engine (`models`, `drag`,
//! `edit`, `protocol`) is plain Rust; `dom` and `api` bind it to the page.

pub mod errors;
pub mod options;
pub mod models;
pub mod drag;
pub mod edit;
pub mod protocol;
pub mod dom;
pub mod api;

// Re-export commonly used types
pub use errors::TreeError;
pub use models::{CollapsedSet, Node, NodeId, TreeBootstrap, TreeModel};
pub use options::TreeEditorOptions;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Tree editor WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"[WASM] logger already initialized".into());
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
