//! In-place boolean toggles in changelist cells

use wasm_bindgen::prelude::*;

use crate::api::helpers::deserialize_or_default;
use crate::dom::http::{self, Csrf};
use crate::dom::{cookies, replace_by_id, window};
use crate::models::NodeId;
use crate::options::TreeEditorOptions;
use crate::protocol::{parse_toggle_reply, toggle_failure_message, ServerCommand};
use crate::{wasm_log, wasm_warn};

/// Flip boolean `attr` of item `itemId` and swap in the re-rendered cells
///
/// Resolves once the page is updated; failures are reported with an alert
/// and resolve as well.
#[wasm_bindgen(js_name = toggleBoolean)]
pub async fn toggle_boolean(item_id: NodeId, attr: String, options: JsValue) -> Result<(), JsValue> {
    let options: TreeEditorOptions = deserialize_or_default(options, "Invalid tree editor options")?;
    let document = window::document()?;
    let csrf = cookies::read(&document, &options.csrf_cookie).map(|token| Csrf {
        header: options.csrf_header.clone(),
        token,
    });

    let command = ServerCommand::ToggleBoolean {
        item_id,
        attr: attr.clone(),
    };
    let replacements = http::post(&options.endpoint, &command, csrf.as_ref())
        .await
        .and_then(|body| parse_toggle_reply(&body));

    match replacements {
        Ok(replacements) => {
            for replacement in &replacements {
                if !replace_by_id(&document, replacement.html())? {
                    wasm_warn!("toggle snippet for {} matched no element", attr);
                }
            }
            wasm_log!("toggled {} of item {}", attr, item_id);
        }
        Err(err) => {
            let detail = match &err {
                crate::protocol::ProtocolError::Rejected(text) => text.clone(),
                other => other.to_string(),
            };
            window::alert(&toggle_failure_message(&options.messages.toggle_failed, &attr, &detail));
        }
    }
    Ok(())
}
