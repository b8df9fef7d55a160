// Unit tests for error module
// Every failure maps to the same exit status

use crate::app::exit_status;
use crate::error::{AppError, FAILURE_EXIT_STATUS};

use common::ErrorLocation;
use tana_core::error::{ConfigError, OrchestratorError, TanaClientError};
use tana_core::orchestrator::RunState;

use std::panic::Location;

/// **VALUE**: Verifies every error variant exits with status 1.
///
/// **WHY THIS MATTERS**: Scripts wrapping the tool only look at the exit status.
///
/// **BUG THIS CATCHES**: Would catch a new variant mapped to 0 or to a different code.
#[test]
fn given_each_error_variant_when_mapped_then_exit_status_is_one() {
    let errors = [
        AppError::Logger {
            message: String::from("Test"),
            location: ErrorLocation::from(Location::caller()),
        },
        AppError::from(ConfigError::missing_token()),
        AppError::from(TanaClientError::construction("bad")),
        AppError::from(OrchestratorError::Step {
            from: RunState::Start,
            source: TanaClientError::rejected(500, "boom", Vec::new()),
        }),
    ];

    for err in errors {
        assert_eq!(err.exit_status(), FAILURE_EXIT_STATUS, "{err}");
        assert_eq!(exit_status::<()>(&Err(err)), 1);
    }
}

#[test]
fn given_success_when_mapped_then_exit_status_is_zero() {
    assert_eq!(exit_status(&Ok::<(), AppError>(())), 0);
}

/// **VALUE**: Verifies transparent variants keep the inner message.
#[test]
fn given_config_error_when_wrapped_then_display_is_transparent() {
    let err = AppError::from(ConfigError::missing_token());

    assert!(err.to_string().starts_with("Missing Token Error"));
}
