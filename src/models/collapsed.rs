//! Collapsed-node set persisted across page loads
//!
//! The set is stored in a cookie as a JSON array of node ids. It only restores
//! expand/collapse UI state; it never describes tree structure.

use serde::{Deserialize, Serialize};

use crate::models::NodeId;

/// Ids whose subtrees are hidden, in the order they were collapsed
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CollapsedSet {
    ids: Vec<NodeId>,
}

impl CollapsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `true` when the id was not collapsed before
    pub fn insert(&mut self, id: NodeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns `true` when the id was collapsed before
    pub fn remove(&mut self, id: NodeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&other| other != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Encode as the cookie payload (`[3,17,42]`)
    pub fn to_cookie_value(&self) -> String {
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode a cookie payload
    ///
    /// A missing or unreadable cookie yields `None`, which callers treat as
    /// "no state stored yet".
    pub fn from_cookie_value(value: Option<&str>) -> Option<Self> {
        let value = value?.trim();
        if value.is_empty() {
            return None;
        }
        match serde_json::from_str::<Vec<NodeId>>(value) {
            Ok(ids) => {
                let mut set = Self::new();
                for id in ids {
                    set.insert(id);
                }
                Some(set)
            }
            Err(e) => {
                log::debug!("discarding unreadable collapsed-nodes cookie: {}", e);
                None
            }
        }
    }
}
