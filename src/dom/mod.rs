//! Browser bindings for the tree editor
//!
//! Everything here talks to `web-sys`; the engine modules never do.

pub mod cookies;
pub mod http;
pub mod overlay;
pub mod rows;
pub mod window;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlTemplateElement};

pub use rows::{extract_item_id, RowRegistry, ScannedRow};

/// Replace the element whose id matches the snippet's root element
///
/// Returns `false` when the snippet has no id or nothing on the page carries
/// it.
pub fn replace_by_id(document: &Document, html: &str) -> Result<bool, JsValue> {
    let template: HtmlTemplateElement = document.create_element("template")?.dyn_into()?;
    template.set_inner_html(html.trim());
    let Some(fresh) = template.content().first_element_child() else {
        return Ok(false);
    };
    let id = fresh.id();
    if id.is_empty() {
        return Ok(false);
    }
    match document.get_element_by_id(&id) {
        Some(existing) => {
            existing.replace_with_with_node_1(&fresh)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
