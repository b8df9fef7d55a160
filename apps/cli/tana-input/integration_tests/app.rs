use tana_input::app::{exit_status, run_with_config, run_with_lookup};
use tana_input::error::AppError;

use tana_core::config::TanaConfig;
use tana_core::error::{ConfigError, TanaClientError};
use tana_core::payload::{AddNodesRequest, TargetLocation};
use tana_core::reporter::{DispatchReporter, LogReporter};
use tana_core::tana_client::DispatchResponse;
use tana_core::{TANA_API_PATH, TANA_API_TOKEN_ENV};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// End-to-end runs of the application against a mocked Input API
// ============================================================================

/// Counts dispatcher callbacks; every network attempt starts with `on_send`.
#[derive(Debug, Default)]
struct CountingReporter {
    sends: AtomicUsize,
    successes: AtomicUsize,
}

impl DispatchReporter for CountingReporter {
    fn on_send(&self, _target: TargetLocation, _request: &AddNodesRequest) {
        self.sends.fetch_add(1, Ordering::SeqCst);
    }

    fn on_success(&self, _target: TargetLocation, _response: &DispatchResponse) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failure(&self, _target: TargetLocation, _error: &TanaClientError) {}
}

fn mock_config(server: &MockServer, token: &str) -> TanaConfig {
    let token = token.to_string();
    TanaConfig::from_lookup(move |key| (key == TANA_API_TOKEN_ENV).then(|| token.clone()))
        .unwrap()
        .with_endpoint(&format!("{}/{}", server.uri(), TANA_API_PATH))
        .unwrap()
}

/// **VALUE**: Verifies a missing token stops the run with exit status 1 and no sends.
///
/// **WHY THIS MATTERS**: Without a token every request is a guaranteed 401; the tool
/// must fail before touching the network.
///
/// **BUG THIS CATCHES**: Would catch if config errors were deferred until after the
/// client was built and a request attempted.
#[tokio::test]
async fn given_no_token_when_running_then_exits_one_without_network_calls() {
    // GIVEN: An environment without TANA_API_TOKEN
    let reporter = Arc::new(CountingReporter::default());

    // WHEN: Running
    let result = run_with_lookup(|_| None, reporter.clone()).await;

    // THEN: Config error, exit status 1
    assert!(matches!(
        result,
        Err(AppError::Config(ConfigError::MissingToken { .. }))
    ));
    assert_eq!(exit_status(&result), 1);

    // AND: Nothing was sent
    assert_eq!(reporter.sends.load(Ordering::SeqCst), 0);
}

/// **VALUE**: Verifies the documented example: token `abc123`, mock answering
/// `200 {"ok":true}` twice, two successes, exit status 0.
#[tokio::test]
async fn given_token_and_accepting_endpoint_when_running_then_exits_zero() {
    // GIVEN: TANA_API_TOKEN=abc123 and a mock accepting exactly two calls
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{TANA_API_PATH}")))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(2)
        .mount(&server)
        .await;

    let config = mock_config(&server, "abc123");
    let reporter = Arc::new(CountingReporter::default());

    // WHEN: Running
    let result = run_with_config(&config, reporter.clone()).await;

    // THEN: Two success reports and exit status 0
    assert!(result.is_ok(), "Run should succeed: {:?}", result.as_ref().err());
    assert_eq!(reporter.successes.load(Ordering::SeqCst), 2);
    assert_eq!(exit_status(&result), 0);
}

/// **VALUE**: Verifies a rejected first send maps to exit status 1 with one request.
///
/// **BUG THIS CATCHES**: Would catch if the application retried or continued after a
/// failed send.
#[tokio::test]
async fn given_rejecting_endpoint_when_running_then_exits_one_after_single_call() {
    // GIVEN: A mock rejecting the token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server, "abc123");

    // WHEN: Running with the console reporter
    let result = run_with_config(&config, Arc::new(LogReporter)).await;

    // THEN: Run error carrying the 401
    match &result {
        Err(AppError::Run(e)) => {
            assert_eq!(e.client_error().and_then(|c| c.status_code()), Some(401))
        }
        other => panic!("Expected Run error, got {other:?}"),
    }
    assert_eq!(exit_status(&result), 1);
}
