// Test the request parameters and reply parsing of the changelist endpoint

use tree_editor_wasm::edit::{serialize_tree, MoveIntent, MovePosition};
use tree_editor_wasm::protocol::{
    parse_reply, parse_toggle_reply, toggle_failure_message, ProtocolError, ServerCommand, ToggleReplacement,
};
use tree_editor_wasm::{TreeBootstrap, TreeModel};

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

#[test]
fn test_move_positions_on_the_wire() {
    let expected = [
        (MovePosition::Before, "left"),
        (MovePosition::After, "right"),
        (MovePosition::LastChild, "last-child"),
    ];
    for (position, wire) in expected {
        let params = ServerCommand::MoveNode(MoveIntent {
            dragged: 5,
            target: 8,
            position,
        })
        .params();
        assert_eq!(param(&params, "__cmd"), Some("move_node"));
        assert_eq!(param(&params, "position"), Some(wire));
        assert_eq!(param(&params, "cut_item"), Some("5"));
        assert_eq!(param(&params, "pasted_on"), Some("8"));
    }
}

#[test]
fn test_save_tree_payload() {
    let bootstrap = TreeBootstrap::default().with_children(None, &[1, 2]);
    let model = TreeModel::build(&bootstrap, &[1, 2]);

    let params = ServerCommand::SaveTree(serialize_tree(&model)).params();

    assert_eq!(param(&params, "__cmd"), Some("save_tree"));
    assert_eq!(param(&params, "tree"), Some("[[1,null,0,1,0,1],[2,null,0,1,0,2]]"));
}

#[test]
fn test_delete_and_toggle_params() {
    let params = ServerCommand::DeleteItem(12).params();
    assert_eq!(param(&params, "__cmd"), Some("delete_item"));
    assert_eq!(param(&params, "item_id"), Some("12"));

    let params = ServerCommand::ToggleBoolean {
        item_id: 3,
        attr: "active".to_string(),
    }
    .params();
    assert_eq!(param(&params, "__cmd"), Some("toggle_boolean"));
    assert_eq!(param(&params, "attr"), Some("active"));
}

#[test]
fn test_anything_but_ok_is_shown_verbatim() {
    assert_eq!(parse_reply("OK"), Ok(()));
    assert_eq!(parse_reply("FAIL"), Err(ProtocolError::Rejected("FAIL".to_string())));
    assert_eq!(
        ProtocolError::Rejected("FAIL".to_string()).to_string(),
        "FAIL"
    );
}

#[test]
fn test_toggle_reply_accepts_both_shapes() {
    let replies = parse_toggle_reply(r#"["<td id=\"a-1\">x</td>", [3, "<td id=\"b-3\">y</td>"]]"#)
        .expect("reply should parse");

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], ToggleReplacement::Snippet("<td id=\"a-1\">x</td>".to_string()));
    assert_eq!(replies[1].html(), "<td id=\"b-3\">y</td>");
}

#[test]
fn test_toggle_failures() {
    assert!(matches!(
        parse_toggle_reply("Object does not exist"),
        Err(ProtocolError::MalformedResponse(_))
    ));
    assert_eq!(
        toggle_failure_message("Unable to toggle", "active", "Forbidden"),
        "Unable to toggle active: Forbidden"
    );
}
