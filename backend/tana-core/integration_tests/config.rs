use tana_core::TANA_API_URL;
use tana_core::config::TanaConfig;
use tana_core::error::ConfigError;

use common::BearerToken;

use std::time::Duration;

// ============================================================================
// Public config API from an external consumer's perspective
// ============================================================================

/// **VALUE**: Verifies the config never prints the token.
///
/// **WHY THIS MATTERS**: The config is logged at debug level during startup.
///
/// **BUG THIS CATCHES**: Would catch if `TanaConfig` stored the token as a plain String.
#[test]
fn given_config_when_debug_formatted_then_token_redacted() {
    // GIVEN: A config built from a token
    let config = TanaConfig::new(BearerToken::new(String::from("super-secret-token"))).unwrap();

    // WHEN: Debug formatting
    let rendered = format!("{:?}", config);

    // THEN: Token absent, endpoint present
    assert!(!rendered.contains("super-secret-token"));
    assert!(rendered.contains("REDACTED"));
    assert!(rendered.contains("cloudfunctions.net"));
}

/// **VALUE**: Verifies builder overrides compose without touching the token.
#[test]
fn given_overrides_when_applied_then_only_targeted_fields_change() {
    let config = TanaConfig::from_lookup(|_| Some(String::from("abc123")))
        .unwrap()
        .with_rate_limit_delay(Duration::from_millis(5))
        .with_request_timeout(Duration::from_secs(1));

    assert_eq!(config.endpoint.as_str(), TANA_API_URL);
    assert_eq!(config.rate_limit_delay, Duration::from_millis(5));
    assert_eq!(config.request_timeout, Duration::from_secs(1));
    assert_eq!(config.token, BearerToken::new(String::from("abc123")));
}

/// **VALUE**: Verifies the missing-token message names the variable to set.
#[test]
fn given_missing_token_when_formatted_then_names_variable_and_location() {
    let err = TanaConfig::from_lookup(|_| None).unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, ConfigError::MissingToken { .. }));
    assert!(message.contains("TANA_API_TOKEN"), "{message}");
    assert!(message.contains(".rs:"), "Should include location: {message}");
}
