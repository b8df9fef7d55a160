use tana_core::error::{OrchestratorError, TanaClientError};
use tana_core::orchestrator::RunState;

use std::error::Error;

/// **VALUE**: Verifies `TanaClientError::construction` records the caller's location.
///
/// **WHY THIS MATTERS**: Construction failures come from deep in the dispatcher; the
/// location is how a user tells serialization from builder problems.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` were removed from the constructor.
#[test]
fn given_construction_error_when_formatted_then_includes_location() {
    // GIVEN: A construction error created here
    let err = TanaClientError::construction("payload could not be encoded");

    // WHEN: Formatting
    let message = format!("{}", err);

    // THEN: Message and this file's location
    assert!(message.contains("Construction Error"));
    assert!(message.contains("payload could not be encoded"));
    assert!(message.contains("tana_client.rs"), "{message}");
}

/// **VALUE**: Verifies rejection categories follow the status class.
#[test]
fn given_rejections_when_categorized_then_follow_status_class() {
    assert_eq!(
        TanaClientError::rejected(403, "", Vec::new()).error_category(),
        "unauthorized"
    );
    assert_eq!(
        TanaClientError::rejected(429, "", Vec::new()).error_category(),
        "client_error"
    );
    assert_eq!(
        TanaClientError::rejected(502, "", Vec::new()).error_category(),
        "server_error"
    );
    assert_eq!(
        TanaClientError::rejected(302, "", Vec::new()).error_category(),
        "rejected"
    );
}

/// **VALUE**: Verifies serde_json failures convert into construction errors.
#[test]
fn given_json_error_when_converted_then_construction() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err = TanaClientError::from(json_err);

    assert!(matches!(err, TanaClientError::Construction { .. }));
    assert_eq!(err.status_code(), None);
}

/// **VALUE**: Verifies orchestrator errors keep the dispatcher error as their source.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[source]`, which hides the HTTP detail
/// from the final diagnostic.
#[test]
fn given_orchestrator_error_when_inspected_then_preserves_source_and_state() {
    let err = OrchestratorError::Step {
        from: RunState::Waiting,
        source: TanaClientError::rejected(500, "boom", Vec::new()),
    };

    let message = err.to_string();
    assert!(message.contains("WAITING"), "{message}");
    assert!(message.contains("boom"), "{message}");

    let source = err.source().expect("should have source");
    assert!(source.to_string().contains("HTTP 500"));
}
