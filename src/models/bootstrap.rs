//! Server-supplied tree bootstrap data
//!
//! The changelist page injects the adjacency of the visible queryset at render
//! time:
//!
//! ```json
//! { "tree_structure": { "0": [6, 9], "6": [7, 8], "7": [], "8": [] },
//!   "node_levels":    { "6": 0, "7": 1, "8": 1, "9": 0 } }
//! ```
//!
//! Keys are strings because they come from a JSON object; key `"0"` holds the
//! top-level rows. `node_levels` is optional.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::TreeError;
use crate::models::NodeId;

/// Key under which the server lists top-level rows
pub const ROOT_KEY: &str = "0";

/// Raw bootstrap object as injected into the page
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TreeBootstrap {
    pub tree_structure: BTreeMap<String, Vec<NodeId>>,
    pub node_levels: BTreeMap<String, u32>,
}

/// Bootstrap data with keys resolved to node ids
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency {
    pub roots: Vec<NodeId>,
    pub children: HashMap<NodeId, Vec<NodeId>>,
    pub levels: HashMap<NodeId, u32>,
}

impl TreeBootstrap {
    /// Parse the bootstrap object from its JSON text
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        serde_json::from_str(json).map_err(|e| TreeError::Bootstrap(e.to_string()))
    }

    /// Builder used by tests and by callers that already hold an adjacency
    pub fn with_children(mut self, parent: Option<NodeId>, children: &[NodeId]) -> Self {
        let key = parent.map_or_else(|| ROOT_KEY.to_string(), |id| id.to_string());
        self.tree_structure.insert(key, children.to_vec());
        self
    }

    pub fn with_level(mut self, id: NodeId, level: u32) -> Self {
        self.node_levels.insert(id.to_string(), level);
        self
    }

    /// Resolve string keys into node ids
    ///
    /// Keys that are not numbers are skipped with a warning; the server never
    /// produces them, and one bad key should not take the whole tree down.
    pub fn adjacency(&self) -> Adjacency {
        let mut adjacency = Adjacency::default();

        for (key, children) in &self.tree_structure {
            if key == ROOT_KEY {
                adjacency.roots.extend(children.iter().copied());
                continue;
            }
            match key.parse::<NodeId>() {
                Ok(id) => {
                    adjacency.children.insert(id, children.clone());
                }
                Err(_) => log::warn!("ignoring malformed tree_structure key {:?}", key),
            }
        }

        for (key, level) in &self.node_levels {
            match key.parse::<NodeId>() {
                Ok(id) => {
                    adjacency.levels.insert(id, *level);
                }
                Err(_) => log::warn!("ignoring malformed node_levels key {:?}", key),
            }
        }

        adjacency
    }
}
