//! `document.cookie` access

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

/// Raw (still URI-encoded) value of cookie `name` in a `document.cookie`
/// string
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// `Set-Cookie` style assignment for `document.cookie`
pub fn cookie_assignment(name: &str, encoded_value: &str, max_age: u64) -> String {
    format!(
        "{}={}; max-age={}; path=/; samesite=strict",
        name, encoded_value, max_age
    )
}

pub fn read(document: &Document, name: &str) -> Option<String> {
    let cookies = document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
    let raw = find_cookie(&cookies, name)?;
    js_sys::decode_uri_component(raw)
        .ok()
        .map(String::from)
}

pub fn write(document: &Document, name: &str, value: &str, max_age: u64) -> Result<(), JsValue> {
    let html = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| JsValue::from_str("cookies need an HTML document"))?;
    let encoded = String::from(js_sys::encode_uri_component(value));
    html.set_cookie(&cookie_assignment(name, &encoded, max_age))
}
