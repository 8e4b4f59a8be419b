//! `TreeEditor`: the object the changelist page glue talks to
//!
//! The glue owns the event listeners and forwards drag handle presses,
//! pointer moves, releases, key presses and button clicks. All state lives in
//! the instance; network round trips run as spawned futures holding a clone
//! of the shared state.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::helpers::{deserialize, deserialize_or_default, error_to_js, serialize_with_nulls};
use crate::dom::http::{self, Csrf};
use crate::dom::{cookies, overlay, window, RowRegistry};
use crate::drag::{DragController, DropOutcome, Point};
use crate::edit::{
    apply_move, check_delete, collapse_all, complete_delete, expand_all, key_action, restore_collapsed,
    serialize_tree, stripes, toggle, DeleteOutcome, KeyAction, MoveIntent, MoveOutcome, VisibilityChange,
};
use crate::errors::TreeError;
use crate::models::{CollapsedSet, NodeId, TreeBootstrap, TreeModel};
use crate::options::TreeEditorOptions;
use crate::protocol::{parse_reply, ProtocolError, ServerCommand};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

struct EditorState {
    model: TreeModel,
    registry: RowRegistry,
    controller: DragController,
    options: TreeEditorOptions,
}

impl EditorState {
    /// Show/hide rows and update markers after an expand/collapse
    fn apply_visibility(&self, change: &VisibilityChange) -> Result<(), JsValue> {
        for &id in &change.show {
            self.registry.set_displayed(id, true)?;
        }
        for &id in &change.hide {
            self.registry.set_displayed(id, false)?;
        }
        for &id in change.opened.iter().chain(&change.closed) {
            self.registry
                .set_marker(id, self.model.has_children(id), self.model.is_expanded(id))?;
        }
        self.restripe()
    }

    /// Bring every row in line with the model
    fn sync_all(&self) -> Result<(), JsValue> {
        let visible = self.model.visible_rows();
        for &id in self.model.row_order() {
            self.registry
                .set_displayed(id, self.model.is_visible(id))?;
            self.registry
                .set_marker(id, self.model.has_children(id), self.model.is_expanded(id))?;
        }
        self.registry.apply_stripes(&stripes(&visible))
    }

    fn restripe(&self) -> Result<(), JsValue> {
        self.registry.apply_stripes(&stripes(&self.model.visible_rows()))
    }

    fn apply_move_to_dom(&self, outcome: &MoveOutcome) -> Result<(), JsValue> {
        self.registry.move_block(&outcome.block, outcome.insert_before)?;
        for &id in &outcome.block {
            if let Some(level) = self.model.level_of(id) {
                self.registry
                    .set_level(id, level, self.options.marker_width(level))?;
            }
        }
        self.sync_all()
    }

    /// Apply an accepted drop to the model, the rows and the cookie
    ///
    /// DOM failures are only logged: the model is already changed and the
    /// reload after the round trip repairs the rows.
    fn commit_move(&mut self, intent: MoveIntent) -> Result<MoveOutcome, TreeError> {
        let outcome = apply_move(&mut self.model, intent)?;
        if let Err(err) = self.apply_move_to_dom(&outcome) {
            wasm_error!("could not reorder rows: {:?}", err);
        }
        if let Err(err) = self.persist_collapsed() {
            wasm_warn!("could not store collapsed nodes: {:?}", err);
        }
        Ok(outcome)
    }

    /// Drop a deleted leaf from the model, the table and the cookie
    fn commit_delete(&mut self, id: NodeId) -> Result<DeleteOutcome, TreeError> {
        let outcome = complete_delete(&mut self.model, id)?;
        self.registry.remove(outcome.removed);
        if let Some(parent) = outcome.emptied_parent {
            if let Err(err) = self.registry.set_marker(parent, false, true) {
                wasm_warn!("could not update marker of {}: {:?}", parent, err);
            }
        }
        if let Err(err) = self.restripe() {
            wasm_warn!("could not restripe rows: {:?}", err);
        }
        if let Err(err) = self.persist_collapsed() {
            wasm_warn!("could not store collapsed nodes: {:?}", err);
        }
        Ok(outcome)
    }

    fn persist_collapsed(&self) -> Result<(), JsValue> {
        let document = window::document()?;
        cookies::write(
            &document,
            &self.options.collapsed_cookie,
            &self.model.collapsed().to_cookie_value(),
            self.options.collapsed_cookie_max_age(),
        )
    }

    fn csrf(&self) -> Option<Csrf> {
        let document = window::document().ok()?;
        let token = cookies::read(&document, &self.options.csrf_cookie)?;
        Some(Csrf {
            header: self.options.csrf_header.clone(),
            token,
        })
    }
}

#[wasm_bindgen]
pub struct TreeEditor {
    state: Rc<RefCell<EditorState>>,
}

#[wasm_bindgen]
impl TreeEditor {
    /// Build the editor from the bootstrap data the server injected
    ///
    /// `bootstrap` is either the object `{tree_structure, node_levels}` or its
    /// JSON text. `options` may be `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(bootstrap: JsValue, options: JsValue) -> Result<TreeEditor, JsValue> {
        let bootstrap: TreeBootstrap = match bootstrap.as_string() {
            Some(json) => TreeBootstrap::from_json(&json).map_err(|e| error_to_js("Invalid tree bootstrap", e))?,
            None => deserialize(bootstrap, "Invalid tree bootstrap")?,
        };
        let options: TreeEditorOptions = deserialize_or_default(options, "Invalid tree editor options")?;

        let document = window::document()?;
        let (registry, scanned) = RowRegistry::scan(&document, &options)?;
        let present: Vec<NodeId> = scanned.iter().map(|row| row.id).collect();

        let mut model = TreeModel::build(&bootstrap, &present);
        for row in &scanned {
            model.set_editable(row.id, row.editable);
        }
        // Promoted orphans follow their former cousins
        if model.row_order() != present.as_slice() {
            wasm_log!("rows out of tree order after pruning, reordering the table");
            registry.reorder_all(model.row_order())?;
        }

        let stored = CollapsedSet::from_cookie_value(cookies::read(&document, &options.collapsed_cookie).as_deref());
        if stored.is_none() {
            wasm_log!("no stored collapsed state, collapsing the entire tree");
        }
        restore_collapsed(&mut model, stored.as_ref());

        let state = EditorState {
            model,
            registry,
            controller: DragController::new(),
            options,
        };
        state.sync_all()?;
        state.persist_collapsed()?;
        if let Some(&first) = state.model.visible_rows().first() {
            state.registry.focus(first)?;
        }

        wasm_info!(
            "tree editor ready: {} rows, {} collapsed",
            state.model.len(),
            state.model.collapsed().ids().len()
        );
        Ok(TreeEditor {
            state: Rc::new(RefCell::new(state)),
        })
    }

    // ------------------------------------------------------------------------
    // Drag gesture
    // ------------------------------------------------------------------------

    /// Press on the drag handle of row `id`; returns whether a drag started
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, id: NodeId) -> Result<bool, JsValue> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        if let Err(err) = state.controller.press(&state.model, id) {
            wasm_log!("press ignored: {}", err);
            return Ok(false);
        }
        let document = window::document()?;
        if let Some(row) = state.registry.row(id) {
            overlay::start(&document, row)?;
        }
        Ok(true)
    }

    /// Pointer moved to page coordinates (`pageX`, `pageY`)
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, page_x: f64, page_y: f64) -> Result<(), JsValue> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        if state.controller.is_idle() {
            return Ok(());
        }
        let window = window::window()?;
        let document = window::document()?;
        let viewport = overlay::viewport(&window)?;
        let (scroll_x, scroll_y) = overlay::scroll_offsets(&window)?;
        let rows: Vec<_> = state
            .model
            .visible_rows()
            .into_iter()
            .filter_map(|id| state.registry.row_box(id, scroll_x, scroll_y))
            .collect();

        if let Some(frame) = state.controller.pointer_move(
            &state.model,
            &state.options.geometry,
            &rows,
            Point::new(page_x, page_y),
            viewport,
        ) {
            overlay::render(&document, &window, &frame)?;
        }
        Ok(())
    }

    /// Pointer released: resolve the drop and submit it
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) -> Result<(), JsValue> {
        let document = window::document()?;
        overlay::clear(&document);

        let intent = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let DropOutcome::Move(intent) = state.controller.release(&state.model) else {
                return Ok(());
            };
            if let Err(err) = state.commit_move(intent) {
                wasm_log!("drop rejected: {}", err);
                state.controller.finish();
                return Ok(());
            }
            intent
        };

        self.submit_move(intent);
        Ok(())
    }

    /// Escape: abort any gesture and clean up the overlay
    pub fn escape(&self) -> Result<(), JsValue> {
        if self.state.borrow_mut().controller.escape() {
            wasm_log!("drag cancelled");
        }
        overlay::clear(&window::document()?);
        Ok(())
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        !self.state.borrow().controller.is_idle()
    }

    // ------------------------------------------------------------------------
    // Expand / collapse and keyboard
    // ------------------------------------------------------------------------

    /// Flip the open state of `id`; returns `false` for leaves
    pub fn toggle(&self, id: NodeId) -> Result<bool, JsValue> {
        let mut state = self.state.borrow_mut();
        let Some(change) = toggle(&mut state.model, id) else {
            return Ok(false);
        };
        state.apply_visibility(&change)?;
        state.persist_collapsed()?;
        Ok(true)
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&self) -> Result<(), JsValue> {
        let mut state = self.state.borrow_mut();
        let change = collapse_all(&mut state.model);
        state.apply_visibility(&change)?;
        state.persist_collapsed()
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&self) -> Result<(), JsValue> {
        let mut state = self.state.borrow_mut();
        let change = expand_all(&mut state.model);
        state.apply_visibility(&change)?;
        state.persist_collapsed()
    }

    /// Key pressed while row `id` has focus; returns whether it was handled
    #[wasm_bindgen(js_name = rowKeyDown)]
    pub fn row_key_down(&self, id: NodeId, key: &str) -> Result<bool, JsValue> {
        let path = window::pathname()?;
        let action = key_action(&self.state.borrow().model, id, key, &path);
        match action {
            KeyAction::Focus { id } => self.state.borrow().registry.focus(id)?,
            KeyAction::Toggle { id } => {
                self.toggle(id)?;
            }
            KeyAction::Navigate { url } => window::navigate(&url)?,
            KeyAction::None => return Ok(false),
        }
        Ok(true)
    }

    #[wasm_bindgen(js_name = visibleRows)]
    pub fn visible_rows(&self) -> Vec<NodeId> {
        self.state.borrow().model.visible_rows()
    }

    // ------------------------------------------------------------------------
    // Server round trips
    // ------------------------------------------------------------------------

    /// Delete leaf `id` after confirmation
    #[wasm_bindgen(js_name = deleteItem)]
    pub fn delete_item(&self, id: NodeId) -> Result<(), JsValue> {
        let (messages, endpoint, csrf) = {
            let state = self.state.borrow();
            match check_delete(&state.model, id) {
                Ok(()) => {}
                Err(TreeError::HasChildren(_)) => {
                    window::alert(&state.options.messages.delete_has_children);
                    return Ok(());
                }
                Err(err) => return Err(error_to_js("deleteItem", err)),
            }
            (state.options.messages.clone(), state.options.endpoint.clone(), state.csrf())
        };
        if !window::confirm(&messages.delete_confirm) {
            return Ok(());
        }

        let shared = Rc::clone(&self.state);
        spawn_local(async move {
            let reply = http::post(&endpoint, &ServerCommand::DeleteItem(id), csrf.as_ref()).await;
            match reply.and_then(|body| parse_reply(&body)) {
                Ok(()) => {
                    let result = shared.borrow_mut().commit_delete(id);
                    match result {
                        Ok(_) => window::alert(&messages.delete_success),
                        Err(err) => wasm_error!("deleted node missing from the tree: {}", err),
                    }
                }
                Err(err) => report_failure(&err),
            }
        });
        Ok(())
    }

    /// Post the nested-set serialization of the whole tree
    #[wasm_bindgen(js_name = saveTree)]
    pub fn save_tree(&self) -> Result<(), JsValue> {
        let (command, endpoint, csrf, saved) = {
            let state = self.state.borrow();
            (
                ServerCommand::SaveTree(serialize_tree(&state.model)),
                state.options.endpoint.clone(),
                state.csrf(),
                state.options.messages.tree_saved.clone(),
            )
        };
        spawn_local(async move {
            let reply = http::post(&endpoint, &command, csrf.as_ref()).await;
            match reply.and_then(|body| parse_reply(&body)) {
                Ok(()) => window::alert(&saved),
                Err(err) => report_failure(&err),
            }
        });
        Ok(())
    }

    /// Nested-set rows `[tree_id, parent_id, left, right, level, node_id]`
    #[wasm_bindgen(js_name = serializeTree)]
    pub fn serialize_tree(&self) -> Result<JsValue, JsValue> {
        serialize_with_nulls(&serialize_tree(&self.state.borrow().model), "Failed to serialize tree")
    }
}

impl TreeEditor {
    fn submit_move(&self, intent: MoveIntent) {
        let (endpoint, csrf) = {
            let state = self.state.borrow();
            (state.options.endpoint.clone(), state.csrf())
        };
        let shared = Rc::clone(&self.state);
        spawn_local(async move {
            let reply = http::post(&endpoint, &ServerCommand::MoveNode(intent), csrf.as_ref()).await;
            shared.borrow_mut().controller.finish();
            match reply.and_then(|body| parse_reply(&body)) {
                Ok(()) => {
                    wasm_log!("move of node {} accepted, reloading", intent.dragged);
                    if let Err(err) = window::reload() {
                        wasm_error!("reload failed: {:?}", err);
                    }
                }
                Err(err) => report_failure(&err),
            }
        });
    }
}

/// Server messages are shown verbatim, transport problems are only logged
/// and summarized
fn report_failure(err: &ProtocolError) {
    match err {
        ProtocolError::Rejected(text) => {
            wasm_warn!("server rejected the request: {}", text);
            window::alert(text);
        }
        other => {
            wasm_error!("{}", other);
            window::alert(&other.to_string());
        }
    }
}
