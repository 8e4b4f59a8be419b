//! Ghost row, drop line and auto-scroll while dragging

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::drag::{DragFrame, Viewport};

const GHOST_ID: &str = "ghost";
const DRAG_LINE_ID: &str = "drag_line";
const DRAGGING_CLASS: &str = "dragging";

pub fn viewport(window: &Window) -> Result<Viewport, JsValue> {
    Ok(Viewport {
        scroll_top: window.scroll_y()?,
        height: window.inner_height()?.as_f64().unwrap_or(0.0),
    })
}

/// Horizontal and vertical scroll offsets
pub fn scroll_offsets(window: &Window) -> Result<(f64, f64), JsValue> {
    Ok((window.scroll_x()?, window.scroll_y()?))
}

/// Show a floating copy of `row` and flag the body as dragging
pub fn start(document: &Document, row: &HtmlElement) -> Result<(), JsValue> {
    let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.class_list().add_1(DRAGGING_CLASS)?;

    let ghost = document.create_element("div")?;
    ghost.set_id(GHOST_ID);
    ghost.set_inner_html(&format!("<table><tbody><tr>{}</tr></tbody></table>", row.inner_html()));
    let ghost: HtmlElement = ghost.dyn_into()?;
    let style = ghost.style();
    style.set_property("position", "absolute")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("z-index", "1000")?;
    body.append_child(&ghost)?;
    Ok(())
}

/// Apply one frame computed by the drag controller
pub fn render(document: &Document, window: &Window, frame: &DragFrame) -> Result<(), JsValue> {
    if let Some(ghost) = element(document, GHOST_ID) {
        let style = ghost.style();
        style.set_property("left", &px(frame.ghost.left))?;
        style.set_property("top", &px(frame.ghost.top))?;
        style.set_property("width", &px(frame.ghost.width))?;
        style.set_property("opacity", &frame.ghost.opacity.to_string())?;
    }

    if let Some(indicator) = frame.indicator {
        let line = match element(document, DRAG_LINE_ID) {
            Some(line) => line,
            None => create_drag_line(document)?,
        };
        let style = line.style();
        style.set_property("left", &px(indicator.left))?;
        style.set_property("top", &px(indicator.top))?;
        style.set_property("width", &px(indicator.width))?;
    }

    if let Some(scroll) = frame.scroll {
        let options = ScrollToOptions::new();
        options.set_top(scroll.scroll_top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
    Ok(())
}

/// Remove ghost and drop line
pub fn clear(document: &Document) {
    for id in [GHOST_ID, DRAG_LINE_ID] {
        if let Some(node) = document.get_element_by_id(id) {
            node.remove();
        }
    }
    if let Some(body) = document.body() {
        let _ = body.class_list().remove_1(DRAGGING_CLASS);
    }
}

fn create_drag_line(document: &Document) -> Result<HtmlElement, JsValue> {
    let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
    let line = document.create_element("div")?;
    line.set_id(DRAG_LINE_ID);
    line.set_inner_html("<div></div>");
    let line: HtmlElement = line.dyn_into()?;
    line.style().set_property("position", "absolute")?;
    body.append_child(&line)?;
    Ok(line)
}

fn element(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
}

fn px(value: f64) -> String {
    format!("{}px", value)
}
