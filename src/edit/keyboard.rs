//! Keyboard navigation between rows
//!
//! Focus moves over visible rows only. Left and right arrows both toggle,
//! matching the row's expand marker.

use serde::{Deserialize, Serialize};

use crate::models::{NodeId, TreeModel};

/// Effect of a key press on a focused row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum KeyAction {
    Focus { id: NodeId },
    Toggle { id: NodeId },
    Navigate { url: String },
    None,
}

/// Resolve `key` (a `KeyboardEvent.key` value) pressed on row `id`
///
/// `path` is the current location's pathname; the change form of a node
/// lives at `<path><id>/`.
pub fn key_action(model: &TreeModel, id: NodeId, key: &str, path: &str) -> KeyAction {
    if !model.contains(id) {
        return KeyAction::None;
    }
    match key {
        "ArrowDown" | "Down" => neighbour(model, id, 1),
        "ArrowUp" | "Up" => neighbour(model, id, -1),
        "ArrowLeft" | "ArrowRight" | "Left" | "Right" => {
            if model.has_children(id) {
                KeyAction::Toggle { id }
            } else {
                KeyAction::None
            }
        }
        "Enter" => KeyAction::Navigate {
            url: format!("{}{}/", path, id),
        },
        _ => KeyAction::None,
    }
}

fn neighbour(model: &TreeModel, id: NodeId, step: isize) -> KeyAction {
    let visible = model.visible_rows();
    let Some(ix) = visible.iter().position(|&row| row == id) else {
        return KeyAction::None;
    };
    ix.checked_add_signed(step)
        .and_then(|next| visible.get(next))
        .map_or(KeyAction::None, |&next| KeyAction::Focus { id: next })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeBootstrap;

    fn model() -> TreeModel {
        // 1 { 2 { 3 } }, 4
        let bootstrap = TreeBootstrap::default()
            .with_children(None, &[1, 4])
            .with_children(Some(1), &[2])
            .with_children(Some(2), &[3]);
        TreeModel::build(&bootstrap, &[1, 2, 3, 4])
    }

    #[test]
    fn test_arrows_skip_hidden_rows() {
        let mut model = model();
        model.mark_closed(2);
        assert_eq!(
            key_action(&model, 2, "ArrowDown", "/admin/page/"),
            KeyAction::Focus { id: 4 }
        );
        assert_eq!(
            key_action(&model, 4, "ArrowUp", "/admin/page/"),
            KeyAction::Focus { id: 2 }
        );
        assert_eq!(key_action(&model, 1, "ArrowUp", "/"), KeyAction::None);
        assert_eq!(key_action(&model, 4, "ArrowDown", "/"), KeyAction::None);
    }

    #[test]
    fn test_enter_navigates_to_change_form() {
        let model = model();
        assert_eq!(
            key_action(&model, 3, "Enter", "/admin/page/page/"),
            KeyAction::Navigate {
                url: "/admin/page/page/3/".to_string()
            }
        );
    }

    #[test]
    fn test_side_arrows_toggle_parents_only() {
        let model = model();
        assert_eq!(key_action(&model, 1, "ArrowLeft", "/"), KeyAction::Toggle { id: 1 });
        assert_eq!(key_action(&model, 3, "ArrowRight", "/"), KeyAction::None);
    }
}
