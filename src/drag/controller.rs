//! Drag gesture state machine
//!
//! `Idle -> Dragging -> Resolving -> Idle`. Escape cancels a drag; a resolved
//! drop stays pending until `finish`. The controller never touches the DOM: each pointer move returns a
//! [`DragFrame`] describing the overlay, and release returns the resolved
//! [`DropOutcome`].

use serde::{Deserialize, Serialize};

use crate::drag::geometry::{DragGeometry, GhostPlacement, Indicator, Point, RowBox, ScrollRequest, Viewport};
use crate::drag::hit_test::{hit_test, next_row_is_deeper, Candidate, DropPosition};
use crate::edit::moves::{MoveIntent, MovePosition};
use crate::errors::TreeError;
use crate::models::{NodeId, TreeModel};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        dragged: NodeId,
        candidate: Option<Candidate>,
    },
    /// Drop accepted, waiting for the server round trip
    Resolving { intent: MoveIntent },
}

/// Overlay updates for one pointer move
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DragFrame {
    pub ghost: GhostPlacement,
    pub scroll: Option<ScrollRequest>,
    /// Drop line of the current candidate, if any
    pub indicator: Option<Indicator>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DropOutcome {
    Discard,
    Move(MoveIntent),
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    pub fn dragged(&self) -> Option<NodeId> {
        match self.state {
            DragState::Dragging { dragged, .. } => Some(dragged),
            DragState::Resolving { intent } => Some(intent.dragged),
            DragState::Idle => None,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match &self.state {
            DragState::Dragging { candidate, .. } => candidate.as_ref(),
            _ => None,
        }
    }

    /// Start a gesture on the drag handle of `id`
    pub fn press(&mut self, model: &TreeModel, id: NodeId) -> Result<(), TreeError> {
        if !self.is_idle() {
            return Err(TreeError::GestureInProgress);
        }
        if !model.contains(id) {
            return Err(TreeError::UnknownNode(id));
        }
        if !model.is_editable(id) {
            return Err(TreeError::NotEditable(id));
        }
        log::debug!("drag started on node {}", id);
        self.state = DragState::Dragging {
            dragged: id,
            candidate: None,
        };
        Ok(())
    }

    /// Track the pointer; `None` outside of a drag
    ///
    /// A frame without a hit keeps the previous candidate.
    pub fn pointer_move(
        &mut self,
        model: &TreeModel,
        geometry: &DragGeometry,
        rows: &[RowBox],
        pointer: Point,
        viewport: Viewport,
    ) -> Option<DragFrame> {
        let DragState::Dragging { candidate, .. } = &mut self.state else {
            return None;
        };
        if let Some(hit) = hit_test(model, geometry, rows, pointer.y) {
            *candidate = Some(hit);
        }
        Some(DragFrame {
            ghost: geometry.ghost_at(pointer),
            scroll: geometry.autoscroll(pointer, viewport),
            indicator: candidate.map(|candidate| candidate.indicator),
        })
    }

    /// End the pointer gesture and resolve the drop
    pub fn release(&mut self, model: &TreeModel) -> DropOutcome {
        let DragState::Dragging { dragged, candidate } = self.state.clone() else {
            return DropOutcome::Discard;
        };
        let Some(candidate) = candidate.filter(|candidate| candidate.target != dragged) else {
            log::debug!("drop of node {} discarded", dragged);
            self.state = DragState::Idle;
            return DropOutcome::Discard;
        };

        let position = match candidate.position {
            DropPosition::Child if !next_row_is_deeper(model, candidate.target) => MovePosition::LastChild,
            DropPosition::Before => MovePosition::Before,
            DropPosition::Child | DropPosition::After => MovePosition::After,
        };
        let intent = MoveIntent {
            dragged,
            target: candidate.target,
            position,
        };
        self.state = DragState::Resolving { intent };
        DropOutcome::Move(intent)
    }

    /// Abort a drag; returns whether one was cancelled
    ///
    /// A resolved drop is waiting for the server and only `finish` ends it.
    pub fn escape(&mut self) -> bool {
        if !matches!(self.state, DragState::Dragging { .. }) {
            return false;
        }
        self.state = DragState::Idle;
        true
    }

    /// The round trip for a resolved drop is over
    pub fn finish(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeBootstrap;

    fn model() -> TreeModel {
        let bootstrap = TreeBootstrap::default().with_children(None, &[1, 2]);
        TreeModel::build(&bootstrap, &[1, 2])
    }

    #[test]
    fn test_press_rejected_while_dragging() {
        let model = model();
        let mut controller = DragController::new();
        controller.press(&model, 1).unwrap();
        assert_eq!(controller.press(&model, 2), Err(TreeError::GestureInProgress));
    }

    #[test]
    fn test_press_on_locked_row() {
        let mut model = model();
        model.set_editable(2, false);
        let mut controller = DragController::new();
        assert_eq!(controller.press(&model, 2), Err(TreeError::NotEditable(2)));
        assert!(controller.is_idle());
    }

    #[test]
    fn test_release_without_candidate_discards() {
        let model = model();
        let mut controller = DragController::new();
        controller.press(&model, 1).unwrap();
        assert_eq!(controller.release(&model), DropOutcome::Discard);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_escape_resets() {
        let model = model();
        let mut controller = DragController::new();
        assert!(!controller.escape());
        controller.press(&model, 1).unwrap();
        assert!(controller.escape());
        assert!(controller.is_idle());
    }

    #[test]
    fn test_escape_keeps_pending_move() {
        let model = model();
        let intent = MoveIntent {
            dragged: 2,
            target: 1,
            position: MovePosition::Before,
        };
        let mut controller = DragController {
            state: DragState::Resolving { intent },
        };
        assert!(!controller.escape());
        assert_eq!(controller.state(), &DragState::Resolving { intent });
        assert_eq!(controller.press(&model, 1), Err(TreeError::GestureInProgress));

        controller.finish();
        assert!(controller.press(&model, 1).is_ok());
    }
}
