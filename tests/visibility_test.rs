// Test expand/collapse, restoring the collapsed cookie and row striping

use tree_editor_wasm::edit::{collapse_all, expand_all, restore_collapsed, stripes, toggle, RowStripe};
use tree_editor_wasm::{CollapsedSet, TreeBootstrap, TreeModel};

fn model() -> TreeModel {
    // 1 { 2 { 3 }, 4 { 5 } }, 6
    let bootstrap = TreeBootstrap::default()
        .with_children(None, &[1, 6])
        .with_children(Some(1), &[2, 4])
        .with_children(Some(2), &[3])
        .with_children(Some(4), &[5]);
    TreeModel::build(&bootstrap, &[1, 2, 3, 4, 5, 6])
}

#[test]
fn test_toggle_twice_restores_visible_rows() {
    for id in [1, 2, 4] {
        let mut model = model();
        model.mark_closed(4);
        let before = model.visible_rows();

        let first = toggle(&mut model, id).expect("parents can be toggled");
        let second = toggle(&mut model, id).expect("parents can be toggled");

        assert_eq!(model.visible_rows(), before, "after toggling {} twice", id);
        assert_eq!(first.hide, second.show);
        assert_eq!(first.show, second.hide);
    }
}

#[test]
fn test_hidden_rows_keep_their_own_flag() {
    let mut model = model();
    toggle(&mut model, 4);
    toggle(&mut model, 1);

    assert_eq!(model.visible_rows(), vec![1, 6]);
    // 4 stays collapsed while hidden
    assert!(!model.is_expanded(4));

    let change = toggle(&mut model, 1).expect("1 has children");
    assert_eq!(change.show, vec![2, 3, 4]);
}

#[test]
fn test_collapsed_set_tracks_toggles_for_the_cookie() {
    let mut model = model();
    toggle(&mut model, 4);
    toggle(&mut model, 2);
    assert_eq!(model.collapsed().to_cookie_value(), "[4,2]");

    toggle(&mut model, 4);
    assert_eq!(model.collapsed().to_cookie_value(), "[2]");
}

#[test]
fn test_open_all_stores_empty_set() {
    let mut model = model();
    collapse_all(&mut model);
    assert_eq!(model.visible_rows(), vec![1, 6]);

    expand_all(&mut model);
    assert_eq!(model.collapsed().to_cookie_value(), "[]");
    assert_eq!(model.visible_rows(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_restore_from_cookie() {
    let mut model = model();
    let stored = CollapsedSet::from_cookie_value(Some("[4]"));

    let change = restore_collapsed(&mut model, stored.as_ref());

    assert_eq!(change.hide, vec![5]);
    assert_eq!(change.closed, vec![4]);
    assert_eq!(model.visible_rows(), vec![1, 2, 3, 4, 6]);
}

#[test]
fn test_empty_cookie_keeps_tree_open() {
    let mut model = model();
    let stored = CollapsedSet::from_cookie_value(Some("[]"));

    let change = restore_collapsed(&mut model, stored.as_ref());

    assert!(change.is_empty());
    assert_eq!(model.visible_rows().len(), 6);
}

#[test]
fn test_stripes_follow_visible_rows() {
    let mut model = model();
    toggle(&mut model, 2);

    let striped = stripes(&model.visible_rows());

    assert_eq!(
        striped,
        vec![
            (1, RowStripe::Row1),
            (2, RowStripe::Row2),
            (4, RowStripe::Row1),
            (5, RowStripe::Row2),
            (6, RowStripe::Row1),
        ]
    );
}
