//! Dialogs and navigation

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub fn alert(message: &str) {
    if let Ok(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// `false` when the dialog could not be shown
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|window| window.confirm_with_message(message))
        .unwrap_or(false)
}

pub fn reload() -> Result<(), JsValue> {
    window()?.location().reload()
}

pub fn navigate(url: &str) -> Result<(), JsValue> {
    window()?.location().set_href(url)
}

pub fn pathname() -> Result<String, JsValue> {
    window()?.location().pathname()
}
