// Unit tests for request body construction.

use crate::INBOX_NODE_ID;
use crate::payload::{AddNodesRequest, Node, TargetLocation, current_timestamp};

use serde_json::json;

/// **VALUE**: Verifies the default-location body has no `targetNodeId` key at all.
///
/// **WHY THIS MATTERS**: Sending `"targetNodeId": null` is not the same as omitting it;
/// the service may reject it or file the node somewhere unexpected.
///
/// **BUG THIS CATCHES**: Would catch removal of `skip_serializing_if`.
#[test]
fn given_default_target_when_serialized_then_target_node_id_absent() {
    // GIVEN: A default-location request
    let request = AddNodesRequest::new(vec![Node::new("n", "d")], TargetLocation::Default);

    // WHEN: Serializing
    let value = serde_json::to_value(&request).unwrap();

    // THEN: Exactly the nodes key
    assert_eq!(value, json!({ "nodes": [ { "name": "n", "description": "d" } ] }));
}

/// **VALUE**: Verifies the INBOX body uses the camelCase key and the INBOX id.
///
/// **BUG THIS CATCHES**: Would catch if `rename_all = "camelCase"` were dropped
/// (the service would see `target_node_id` and ignore it).
#[test]
fn given_inbox_target_when_serialized_then_uses_camel_case_inbox_id() {
    let request = AddNodesRequest::new(vec![Node::new("n", "d")], TargetLocation::Inbox);

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["targetNodeId"], json!(INBOX_NODE_ID));
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(1));
    assert!(value.get("target_node_id").is_none());
}

/// **VALUE**: Verifies the two canned test nodes carry the timestamp where expected.
#[test]
fn given_timestamp_when_building_test_nodes_then_names_include_it() {
    let ts = "2024-05-01T09:30:00.123Z";

    let test_node = Node::test_node(ts);
    assert_eq!(test_node.name, format!("Test Node - {ts}"));
    assert!(test_node.description.ends_with(ts));

    let inbox_node = Node::inbox_node(ts);
    assert_eq!(inbox_node.name, format!("Inbox Test - {ts}"));
    assert_eq!(
        inbox_node.description,
        "This test node was sent directly to your Tana inbox"
    );
}

/// **VALUE**: Verifies the timestamp is RFC 3339 UTC with milliseconds.
#[test]
fn given_now_when_formatting_timestamp_then_rfc3339_millis_utc() {
    let ts = current_timestamp();

    assert!(ts.ends_with('Z'), "Should be UTC: {ts}");
    assert_eq!(ts.len(), "2024-05-01T09:30:00.123Z".len(), "Unexpected shape: {ts}");
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[19..20], ".");
}
