use crate::helpers::{ReportEvent, TEST_TOKEN, client_for, config_for, endpoint_path};

use tana_core::INBOX_NODE_ID;
use tana_core::config::TanaConfig;
use tana_core::error::TanaClientError;
use tana_core::payload::{Node, TargetLocation};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Dispatcher tests against a mocked Input API
// ============================================================================

/// **VALUE**: Verifies the default send posts one node, no `targetNodeId`, with the
/// bearer and content-type headers.
///
/// **WHY THIS MATTERS**: This is the exact wire contract the Input API checks. A missing
/// header is a 401; a stray `targetNodeId` files the node somewhere else.
///
/// **BUG THIS CATCHES**: Would catch header regressions or the target flag leaking into
/// the default body.
#[tokio::test]
async fn given_valid_token_when_sending_default_node_then_posts_single_node_without_target() {
    // GIVEN: A mock endpoint that requires the bearer token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path()))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (client, reporter) = client_for(&config);

    // WHEN: Sending the default test node
    let response = client
        .send_test_node("2024-05-01T09:30:00.000Z")
        .await
        .expect("send should succeed");

    // THEN: Response surfaced as-is
    assert!(response.status.is_success());
    assert_eq!(response.json(), Some(json!({ "ok": true })));

    // AND: Body has exactly one node and no targetNodeId
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().expect("body should be JSON");
    assert_eq!(body["nodes"].as_array().map(Vec::len), Some(1));
    assert!(body.get("targetNodeId").is_none(), "No targetNodeId expected");
    assert_eq!(body["nodes"][0]["name"], json!("Test Node - 2024-05-01T09:30:00.000Z"));

    // AND: Reporter saw send then success
    let events = reporter.events();
    assert!(matches!(events[0].1, ReportEvent::Send { target: TargetLocation::Default, .. }));
    assert!(matches!(
        events[1].1,
        ReportEvent::Success { target: TargetLocation::Default, status: 200 }
    ));
}

/// **VALUE**: Verifies the INBOX send carries `targetNodeId: "INBOX"` and one node.
///
/// **BUG THIS CATCHES**: Would catch if the target flag were dropped for INBOX sends.
#[tokio::test]
async fn given_valid_token_when_sending_inbox_node_then_targets_inbox() {
    // GIVEN: A permissive mock endpoint
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (client, _reporter) = client_for(&config);

    // WHEN: Sending the inbox node
    client
        .send_inbox_node("2024-05-01T09:30:00.000Z")
        .await
        .expect("send should succeed");

    // THEN: targetNodeId is INBOX and exactly one node was sent
    let requests = server.received_requests().await.expect("recording enabled");
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["targetNodeId"], json!(INBOX_NODE_ID));
    assert_eq!(body["nodes"].as_array().map(Vec::len), Some(1));
}

/// **VALUE**: Verifies arbitrary node lists pass through unchanged.
#[tokio::test]
async fn given_several_nodes_when_sending_then_all_are_in_body_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("created"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (client, _reporter) = client_for(&config);

    let response = client
        .send_nodes(
            vec![Node::new("first", "a"), Node::new("second", "b")],
            TargetLocation::Default,
        )
        .await
        .unwrap();

    // Non-JSON body is kept as raw text
    assert_eq!(response.json(), None);
    assert_eq!(response.display_body(), "created");

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["nodes"][0]["name"], json!("first"));
    assert_eq!(body["nodes"][1]["name"], json!("second"));
}

/// **VALUE**: Verifies a non-2xx answer becomes `Rejected` with status, body, and headers.
///
/// **WHY THIS MATTERS**: These three pieces are what a user needs to diagnose a bad token
/// or a rate-limit hit.
///
/// **BUG THIS CATCHES**: Would catch if rejected responses were treated as success or if
/// the body/headers were dropped.
#[tokio::test]
async fn given_remote_rejection_when_sending_then_returns_rejected_with_details() {
    // GIVEN: A mock endpoint rejecting the token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("invalid token")
                .insert_header("x-request-id", "req-1"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (client, reporter) = client_for(&config);

    // WHEN: Sending
    let result = client.send_test_node("ts").await;

    // THEN: Rejected with all details
    let err = result.expect_err("401 must fail");
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.error_category(), "unauthorized");
    match &err {
        TanaClientError::Rejected { body, headers, .. } => {
            assert_eq!(body, "invalid token");
            assert!(
                headers
                    .iter()
                    .any(|(name, value)| name == "x-request-id" && value == "req-1"),
                "Headers should be preserved: {headers:?}"
            );
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }

    // AND: Reporter saw the failure
    assert!(reporter.events().iter().any(|(_, e)| matches!(
        e,
        ReportEvent::Failure { category: "unauthorized", .. }
    )));
}

/// **VALUE**: Verifies an unreachable endpoint yields `Transport` naming the request.
///
/// **BUG THIS CATCHES**: Would catch if connection failures were misfiled as
/// construction errors or lost the request description.
#[tokio::test]
async fn given_unreachable_endpoint_when_sending_then_returns_transport_error() {
    // GIVEN: A config pointed at a port nothing listens on
    let server = MockServer::start().await;
    let config = config_for(&server)
        .with_endpoint("http://127.0.0.1:1/addToNodeV2")
        .unwrap();
    let (client, _reporter) = client_for(&config);

    // WHEN: Sending
    let result = client.send_test_node("ts").await;

    // THEN: Transport error with the request description
    match result {
        Err(TanaClientError::Transport { request, .. }) => {
            assert!(request.starts_with("POST http://127.0.0.1:1/"), "{request}");
        }
        other => panic!("Expected Transport, got {other:?}"),
    }
}

/// **VALUE**: Verifies a response slower than the timeout is a timeout transport error.
#[tokio::test]
async fn given_slow_endpoint_when_sending_then_times_out_as_transport() {
    // GIVEN: A mock that answers after two seconds and a 200ms client timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = config_for(&server).with_request_timeout(Duration::from_millis(200));
    let (client, _reporter) = client_for(&config);

    // WHEN: Sending
    let err = client.send_test_node("ts").await.expect_err("should time out");

    // THEN: Timeout category
    assert!(matches!(
        err,
        TanaClientError::Transport { is_timeout: true, .. }
    ));
    assert_eq!(err.error_category(), "timeout");
}

/// **VALUE**: Verifies a non-ASCII token is sent byte-for-byte in the Authorization header.
///
/// **BUG THIS CATCHES**: Would catch building the header with `HeaderValue::from_str`,
/// which refuses anything outside visible ASCII.
#[tokio::test]
async fn given_non_ascii_token_when_sending_then_header_carries_raw_bytes() {
    // GIVEN: A config whose token is not ASCII
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let config = TanaConfig::from_lookup(|_| Some(String::from("tökén-123")))
        .unwrap()
        .with_endpoint(&format!("{}{}", server.uri(), endpoint_path()))
        .unwrap();
    let (client, _reporter) = client_for(&config);

    // WHEN: Sending
    client.send_test_node("ts").await.expect("send should succeed");

    // THEN: The header holds the exact token bytes
    let requests = server.received_requests().await.unwrap();
    let authorization = requests[0]
        .headers
        .get("authorization")
        .expect("Authorization header present");
    assert_eq!(authorization.as_bytes(), "Bearer tökén-123".as_bytes());
}
