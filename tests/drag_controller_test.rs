// Test the drag gesture from press to resolved drop

use tree_editor_wasm::drag::{DragController, DragGeometry, DragState, DropOutcome, DropPosition, Point, RowBox, Viewport};
use tree_editor_wasm::edit::{MoveIntent, MovePosition};
use tree_editor_wasm::{TreeBootstrap, TreeModel};

const ROW_HEIGHT: f64 = 30.0;

fn model() -> TreeModel {
    // 1 { 2 }, 3, 4
    let bootstrap = TreeBootstrap::default()
        .with_children(None, &[1, 3, 4])
        .with_children(Some(1), &[2]);
    TreeModel::build(&bootstrap, &[1, 2, 3, 4])
}

fn rows(model: &TreeModel) -> Vec<RowBox> {
    model
        .visible_rows()
        .into_iter()
        .enumerate()
        .map(|(ix, id)| RowBox::new(id, 10.0, 100.0 + ix as f64 * ROW_HEIGHT, 900.0, ROW_HEIGHT))
        .collect()
}

fn viewport() -> Viewport {
    Viewport {
        scroll_top: 0.0,
        height: 1000.0,
    }
}

/// Page y inside the given third (0, 1, 2) of the row at `ix`
fn y_in(ix: usize, third: usize) -> f64 {
    100.0 + ix as f64 * ROW_HEIGHT + third as f64 * ROW_HEIGHT / 3.0 + 1.0
}

fn drag(model: &TreeModel, dragged: u32, path: &[f64]) -> (DragController, DropOutcome) {
    let geometry = DragGeometry::default();
    let boxes = rows(model);
    let mut controller = DragController::new();
    controller.press(model, dragged).expect("press should start a drag");
    for &y in path {
        controller.pointer_move(model, &geometry, &boxes, Point::new(200.0, y), viewport());
    }
    let outcome = controller.release(model);
    (controller, outcome)
}

#[test]
fn test_middle_third_of_leaf_makes_last_child() {
    let model = model();
    let (controller, outcome) = drag(&model, 4, &[y_in(2, 1)]);

    assert_eq!(
        outcome,
        DropOutcome::Move(MoveIntent {
            dragged: 4,
            target: 3,
            position: MovePosition::LastChild,
        })
    );
    assert!(matches!(controller.state(), DragState::Resolving { .. }));
}

#[test]
fn test_top_third_drops_before() {
    let model = model();
    let (_, outcome) = drag(&model, 4, &[y_in(0, 0)]);

    assert_eq!(
        outcome,
        DropOutcome::Move(MoveIntent {
            dragged: 4,
            target: 1,
            position: MovePosition::Before,
        })
    );
}

#[test]
fn test_guarded_frame_keeps_previous_candidate() {
    let model = model();
    // Bottom third of row 3, then the middle of row 1 whose child follows it
    let (_, outcome) = drag(&model, 4, &[y_in(2, 2), y_in(0, 1)]);

    assert_eq!(
        outcome,
        DropOutcome::Move(MoveIntent {
            dragged: 4,
            target: 3,
            position: MovePosition::After,
        })
    );
}

#[test]
fn test_drop_on_own_row_is_discarded() {
    let model = model();
    let (controller, outcome) = drag(&model, 3, &[y_in(2, 1)]);

    assert_eq!(outcome, DropOutcome::Discard);
    assert!(controller.is_idle());
}

#[test]
fn test_frame_carries_ghost_indicator_and_scroll() {
    let model = model();
    let geometry = DragGeometry::default();
    let boxes = rows(&model);
    let mut controller = DragController::new();
    controller.press(&model, 4).expect("press should start a drag");

    let frame = controller
        .pointer_move(
            &model,
            &geometry,
            &boxes,
            Point::new(300.0, y_in(1, 2)),
            Viewport {
                scroll_top: 0.0,
                height: 200.0,
            },
        )
        .expect("dragging produces frames");

    assert_eq!(frame.ghost.left, 270.0);
    assert_eq!(frame.ghost.top, y_in(1, 2));
    let indicator = frame.indicator.expect("row 2 accepts a drop after it");
    // Level 1 row, AFTER: 37 + 2 * 20
    assert_eq!(indicator.left, 10.0 + 77.0);
    assert_eq!(indicator.top, 100.0 + 2.0 * ROW_HEIGHT - 1.0);
    assert_eq!(frame.scroll.map(|scroll| scroll.scroll_top), Some(250.0));
    assert_eq!(controller.candidate().map(|c| c.position), Some(DropPosition::After));
}

#[test]
fn test_no_frames_outside_a_drag() {
    let model = model();
    let mut controller = DragController::new();
    let frame = controller.pointer_move(
        &model,
        &DragGeometry::default(),
        &rows(&model),
        Point::new(0.0, 110.0),
        viewport(),
    );
    assert!(frame.is_none());
    assert_eq!(controller.release(&model), DropOutcome::Discard);
}

#[test]
fn test_finish_returns_to_idle() {
    let model = model();
    let (mut controller, _) = drag(&model, 4, &[y_in(2, 1)]);
    assert_eq!(controller.dragged(), Some(4));
    controller.finish();
    assert!(controller.is_idle());
    controller.press(&model, 2).expect("a new gesture may start");
}

#[test]
fn test_escape_does_not_release_pending_move() {
    // A second drop must wait until the first move_node round trip is over
    let model = model();
    let (mut controller, outcome) = drag(&model, 3, &[y_in(0, 0)]);
    assert!(matches!(outcome, DropOutcome::Move(_)));

    assert!(!controller.escape());
    assert!(matches!(controller.state(), DragState::Resolving { .. }));
    assert!(controller.press(&model, 2).is_err());

    controller.finish();
    controller.press(&model, 2).expect("press after finish should succeed");
}
