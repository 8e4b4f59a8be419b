//! POSTs to the changelist endpoint

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response, UrlSearchParams};

use crate::protocol::{ProtocolError, ServerCommand};

/// Header the admin view checks before dispatching `__cmd`
const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// CSRF header name and token
pub struct Csrf {
    pub header: String,
    pub token: String,
}

/// Submit `command` and return the response body
///
/// Non-2xx responses are `Rejected` with their body, so callers can show the
/// server's message either way.
pub async fn post(endpoint: &str, command: &ServerCommand, csrf: Option<&Csrf>) -> Result<String, ProtocolError> {
    let window = web_sys::window().ok_or_else(|| ProtocolError::Transport("no window".to_string()))?;

    let body = UrlSearchParams::new().map_err(transport)?;
    for (key, value) in command.params() {
        body.append(&key, &value);
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_body(&body);

    let request = Request::new_with_str_and_init(endpoint, &init).map_err(transport)?;
    let headers = request.headers();
    headers.set(AJAX_HEADER.0, AJAX_HEADER.1).map_err(transport)?;
    if let Some(csrf) = csrf {
        headers.set(&csrf.header, &csrf.token).map_err(transport)?;
    }

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();

    if response.ok() {
        Ok(text)
    } else {
        Err(ProtocolError::Rejected(text))
    }
}

fn transport(err: JsValue) -> ProtocolError {
    ProtocolError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
