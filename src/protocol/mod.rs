//! Wire format of the changelist endpoints
//!
//! Every command is a form-encoded POST carrying `__cmd` plus its own fields.
//! The plain-text endpoints answer `"OK"` or an error message meant for the
//! user; `toggle_boolean` answers a JSON array of HTML snippets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edit::moves::MoveIntent;
use crate::edit::nested_set::{to_json, NestedSetRow};
use crate::models::NodeId;

pub const REPLY_OK: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The server answered with something other than `OK`
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response body
    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A request to the changelist endpoint
#[derive(Clone, Debug, PartialEq)]
pub enum ServerCommand {
    MoveNode(MoveIntent),
    SaveTree(Vec<NestedSetRow>),
    DeleteItem(NodeId),
    ToggleBoolean { item_id: NodeId, attr: String },
}

impl ServerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ServerCommand::MoveNode(_) => "move_node",
            ServerCommand::SaveTree(_) => "save_tree",
            ServerCommand::DeleteItem(_) => "delete_item",
            ServerCommand::ToggleBoolean { .. } => "toggle_boolean",
        }
    }

    /// Form fields in submission order, `__cmd` first
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("__cmd".to_string(), self.name().to_string())];
        match self {
            ServerCommand::MoveNode(intent) => {
                params.push(("position".to_string(), intent.position.as_wire().to_string()));
                params.push(("cut_item".to_string(), intent.dragged.to_string()));
                params.push(("pasted_on".to_string(), intent.target.to_string()));
            }
            ServerCommand::SaveTree(rows) => {
                params.push(("tree".to_string(), to_json(rows)));
            }
            ServerCommand::DeleteItem(id) => {
                params.push(("item_id".to_string(), id.to_string()));
            }
            ServerCommand::ToggleBoolean { item_id, attr } => {
                params.push(("item_id".to_string(), item_id.to_string()));
                params.push(("attr".to_string(), attr.clone()));
            }
        }
        params
    }
}

/// Interpret a plain-text reply
pub fn parse_reply(body: &str) -> Result<(), ProtocolError> {
    if body.trim() == REPLY_OK {
        Ok(())
    } else {
        Err(ProtocolError::Rejected(body.to_string()))
    }
}

/// One entry of a `toggle_boolean` reply
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum ToggleReplacement {
    /// `[id, html]`, as sent by older servers
    Pair(NodeId, String),
    Snippet(String),
}

impl ToggleReplacement {
    pub fn html(&self) -> &str {
        match self {
            ToggleReplacement::Pair(_, html) | ToggleReplacement::Snippet(html) => html,
        }
    }
}

pub fn parse_toggle_reply(body: &str) -> Result<Vec<ToggleReplacement>, ProtocolError> {
    serde_json::from_str(body).map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
}

/// Alert text for a failed toggle
pub fn toggle_failure_message(prefix: &str, attr: &str, detail: &str) -> String {
    format!("{} {}: {}", prefix, attr, detail)
}
