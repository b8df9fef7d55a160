use crate::helpers::{ReportEvent, client_for, config_for, endpoint_path};

use tana_core::INBOX_NODE_ID;
use tana_core::error::OrchestratorError;
use tana_core::orchestrator::{RunState, SmokeTest};
use tana_core::payload::TargetLocation;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Smoke test sequencing: ordering, rate-limit pause, fail-fast
// ============================================================================

/// **VALUE**: Verifies the full run against a mock answering `200 {"ok":true}` twice.
///
/// **WHY THIS MATTERS**: This is the whole tool's happy path: two sends, default
/// first, INBOX second, both reported as successes.
///
/// **BUG THIS CATCHES**: Would catch reordering of the sends or a missing second send.
#[tokio::test]
async fn given_accepting_endpoint_when_running_then_sends_default_then_inbox() {
    // GIVEN: A mock accepting every POST
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (client, reporter) = client_for(&config);
    let mut smoke_test = SmokeTest::from_config(&config);

    // WHEN: Running
    let summary = smoke_test.run(&client).await.expect("run should succeed");

    // THEN: Both responses captured and the run is done
    assert_eq!(smoke_test.state(), RunState::Done);
    assert_eq!(summary.default_response.json(), Some(json!({ "ok": true })));
    assert_eq!(summary.inbox_response.json(), Some(json!({ "ok": true })));
    assert_eq!(reporter.success_count(), 2);

    // AND: Default first, INBOX second
    let requests = server.received_requests().await.unwrap();
    let first: Value = requests[0].body_json().unwrap();
    let second: Value = requests[1].body_json().unwrap();
    assert!(first.get("targetNodeId").is_none());
    assert_eq!(second["targetNodeId"], json!(INBOX_NODE_ID));
}

/// **VALUE**: Verifies at least one second passes between the two sends.
///
/// **WHY THIS MATTERS**: The Input API allows one call per second per token; a shorter
/// gap gets the second call rate limited.
///
/// **BUG THIS CATCHES**: Would catch removal of the sleep or a sleep placed after the
/// second send.
#[tokio::test]
async fn given_default_config_when_running_then_sends_are_at_least_one_second_apart() {
    // GIVEN: Default rate-limit delay
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (client, reporter) = client_for(&config);

    // WHEN: Running
    SmokeTest::from_config(&config).run(&client).await.unwrap();

    // THEN: The two send events are >= 1000ms apart
    let times = reporter.send_times();
    assert_eq!(times.len(), 2);
    let gap = times[1].duration_since(times[0]);
    assert!(
        gap >= Duration::from_millis(1000),
        "Sends only {}ms apart",
        gap.as_millis()
    );
}

/// **VALUE**: Verifies a failed default send stops the run before the INBOX send.
///
/// **WHY THIS MATTERS**: The tool is fail-fast; a second request after a rejection only
/// repeats the failure and burns rate limit.
///
/// **BUG THIS CATCHES**: Would catch if errors from the first send were swallowed.
#[tokio::test]
async fn given_default_send_fails_when_running_then_inbox_send_never_attempted() {
    // GIVEN: A mock rejecting everything, expecting exactly one call
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_rate_limit_delay(Duration::from_millis(10));
    let (client, reporter) = client_for(&config);
    let mut smoke_test = SmokeTest::from_config(&config);

    // WHEN: Running
    let err = smoke_test.run(&client).await.expect_err("run should fail");

    // THEN: Failed from START, one request only
    assert_eq!(err.failed_from(), RunState::Start);
    assert_eq!(err.client_error().and_then(|e| e.status_code()), Some(500));
    assert_eq!(smoke_test.state(), RunState::Failed);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    // AND: No INBOX send reported
    assert!(!reporter.events().iter().any(|(_, e)| matches!(
        e,
        ReportEvent::Send { target: TargetLocation::Inbox, .. }
    )));
}

/// **VALUE**: Verifies a failed INBOX send is reported as failing from WAITING.
///
/// **BUG THIS CATCHES**: Would catch if the state machine skipped WAITING or reported
/// the wrong origin state.
#[tokio::test]
async fn given_inbox_send_fails_when_running_then_fails_from_waiting() {
    // GIVEN: INBOX requests rejected, everything else accepted
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "targetNodeId": INBOX_NODE_ID })))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let config = config_for(&server).with_rate_limit_delay(Duration::from_millis(10));
    let (client, _reporter) = client_for(&config);
    let mut smoke_test = SmokeTest::from_config(&config);

    // WHEN: Running
    let err = smoke_test.run(&client).await.expect_err("run should fail");

    // THEN: Failure originates after the wait
    assert_eq!(err.failed_from(), RunState::Waiting);
    assert_eq!(err.client_error().and_then(|e| e.status_code()), Some(429));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

/// **VALUE**: Verifies FAILED absorbs: a second `run` on a failed smoke test sends nothing.
///
/// **WHY THIS MATTERS**: Every accepted request creates a node in the user's workspace.
/// Re-running a failed instance would silently repeat sends the user never asked for.
///
/// **BUG THIS CATCHES**: Would catch `run` resetting its state to START on entry.
#[tokio::test]
async fn given_failed_run_when_run_again_then_refuses_without_sending() {
    // GIVEN: A mock that rejects the first call and accepts any later ones
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let config = config_for(&server).with_rate_limit_delay(Duration::from_millis(10));
    let (client, _reporter) = client_for(&config);
    let mut smoke_test = SmokeTest::from_config(&config);
    smoke_test.run(&client).await.expect_err("first run should fail");
    assert_eq!(smoke_test.state(), RunState::Failed);

    // WHEN: Running the same instance again
    let err = smoke_test.run(&client).await.expect_err("second run must refuse");

    // THEN: Refused from FAILED, state unchanged, still only one request
    assert!(matches!(
        err,
        OrchestratorError::AlreadyFinished { state: RunState::Failed, .. }
    ));
    assert!(err.client_error().is_none());
    assert_eq!(smoke_test.state(), RunState::Failed);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

/// **VALUE**: Verifies DONE is terminal too: a finished smoke test does not send again.
#[tokio::test]
async fn given_completed_run_when_run_again_then_refuses_without_sending() {
    // GIVEN: A completed run
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server).with_rate_limit_delay(Duration::from_millis(10));
    let (client, _reporter) = client_for(&config);
    let mut smoke_test = SmokeTest::from_config(&config);
    smoke_test.run(&client).await.expect("first run should succeed");

    // WHEN: Running again
    let err = smoke_test.run(&client).await.expect_err("second run must refuse");

    // THEN: Refused from DONE
    assert_eq!(err.failed_from(), RunState::Done);
    assert_eq!(smoke_test.state(), RunState::Done);
}
