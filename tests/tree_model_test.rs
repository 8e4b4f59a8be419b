// Test building the tree model from bootstrap data and the rendered rows

use tree_editor_wasm::edit::serialize_tree;
use tree_editor_wasm::{TreeBootstrap, TreeModel};

const BOOTSTRAP: &str = r#"{
    "tree_structure": {"0": [6, 9], "6": [7, 8], "7": [], "8": [12]},
    "node_levels": {"6": 0, "7": 1, "8": 1, "9": 0, "12": 2}
}"#;

#[test]
fn test_build_from_server_json() {
    let bootstrap = TreeBootstrap::from_json(BOOTSTRAP).expect("bootstrap should parse");
    let model = TreeModel::build(&bootstrap, &[6, 7, 8, 12, 9]);

    assert_eq!(model.roots(), &[6, 9]);
    assert_eq!(model.children_of(6), &[7, 8]);
    assert_eq!(model.children_of(8), &[12]);
    assert_eq!(model.level_of(12), Some(2));
    assert_eq!(model.row_order(), &[6, 7, 8, 12, 9]);
    assert!(model.has_children(6));
    assert!(!model.has_children(7));
}

#[test]
fn test_missing_rows_are_pruned() {
    // Row 8 was filtered out by permissions; its child 12 is still shown
    let bootstrap = TreeBootstrap::from_json(BOOTSTRAP).expect("bootstrap should parse");
    let model = TreeModel::build(&bootstrap, &[6, 7, 12, 9]);

    assert_eq!(model.children_of(6), &[7]);
    assert!(!model.contains(8));
    assert_eq!(model.parent_of(12), None);
    assert_eq!(model.level_of(12), Some(0));
    assert_eq!(model.roots(), &[6, 12, 9]);
    assert_eq!(model.dfs_order(), model.row_order());
}

#[test]
fn test_parent_with_all_children_pruned_loses_expand_affordance() {
    let bootstrap = TreeBootstrap::from_json(BOOTSTRAP).expect("bootstrap should parse");
    let model = TreeModel::build(&bootstrap, &[6, 7, 8, 9]);

    assert!(!model.has_children(8));
}

#[test]
fn test_roots_follow_document_order() {
    let bootstrap = TreeBootstrap::default()
        .with_children(None, &[1, 2])
        .with_children(Some(1), &[3]);
    let model = TreeModel::build(&bootstrap, &[2, 1, 3]);

    assert_eq!(model.roots(), &[2, 1]);
    assert_eq!(model.row_order(), &[2, 1, 3]);
}

#[test]
fn test_promoted_orphan_moves_behind_former_cousins() {
    // 1 { 2 { 3 }, 4 } with row 2 filtered out: 3 is rendered between 1 and 4
    let bootstrap = TreeBootstrap::default()
        .with_children(None, &[1])
        .with_children(Some(1), &[2, 4])
        .with_children(Some(2), &[3]);
    let model = TreeModel::build(&bootstrap, &[1, 3, 4]);

    assert_eq!(model.roots(), &[1, 3]);
    assert_eq!(model.row_order(), &[1, 4, 3]);
    assert_eq!(model.row_order(), model.dfs_order().as_slice());
    assert_eq!(model.next_row(1), Some(4));
    assert_eq!(model.descendants_of(1), &[4]);

    let saved: Vec<u32> = serialize_tree(&model).iter().map(|row| row.node_id).collect();
    assert_eq!(saved, model.row_order());
}

#[test]
fn test_malformed_bootstrap_is_an_error() {
    assert!(TreeBootstrap::from_json("{\"tree_structure\": [1, 2]}").is_err());
}

#[test]
fn test_levels_ignore_stale_server_values() {
    let bootstrap = TreeBootstrap::default()
        .with_children(None, &[1])
        .with_children(Some(1), &[2])
        .with_level(2, 5);
    let model = TreeModel::build(&bootstrap, &[1, 2]);

    assert_eq!(model.level_of(2), Some(1));
}

#[test]
fn test_mark_closed_twice_is_noop() {
    let bootstrap = TreeBootstrap::from_json(BOOTSTRAP).expect("bootstrap should parse");
    let mut model = TreeModel::build(&bootstrap, &[6, 7, 8, 12, 9]);

    assert!(model.mark_closed(6));
    let once = model.clone();
    assert!(!model.mark_closed(6));
    assert_eq!(model, once);
    assert!(!model.is_expanded(6));
    assert!(!model.is_visible(12));
}
