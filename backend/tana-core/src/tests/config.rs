// Unit tests for config loading and token validation.
// These never touch the process environment; `from_lookup` is the seam.

use crate::config::validation::validate;
use crate::config::{RATE_LIMIT_DELAY, TanaConfig};
use crate::error::{ConfigError, TokenValidationFailure};
use crate::{TANA_API_TOKEN_ENV, TANA_API_URL};

use common::BearerToken;

use std::time::Duration;

fn lookup_with(token: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        if key == TANA_API_TOKEN_ENV {
            token.map(String::from)
        } else {
            None
        }
    }
}

/// **VALUE**: Verifies a missing token is a configuration error, not a default.
///
/// **WHY THIS MATTERS**: The tool must stop before any network activity when the
/// token is absent.
///
/// **BUG THIS CATCHES**: Would catch if `from_lookup` started substituting an empty token.
#[test]
fn given_no_token_when_loading_config_then_returns_missing_token() {
    // GIVEN: A lookup without TANA_API_TOKEN
    let lookup = lookup_with(None);

    // WHEN: Building config
    let result = TanaConfig::from_lookup(lookup);

    // THEN: MissingToken naming the variable
    match result {
        Err(ConfigError::MissingToken { key, .. }) => assert_eq!(key, TANA_API_TOKEN_ENV),
        other => panic!("Expected MissingToken, got {:?}", other),
    }
}

/// **VALUE**: Verifies a valid token yields the production defaults.
///
/// **BUG THIS CATCHES**: Would catch if the endpoint constant or the one second rate
/// limit drifted.
#[test]
fn given_valid_token_when_loading_config_then_uses_production_defaults() {
    // GIVEN: A lookup with a token
    let lookup = lookup_with(Some("abc123"));

    // WHEN: Building config
    let config = TanaConfig::from_lookup(lookup).expect("config should load");

    // THEN: Production endpoint and fixed delay
    assert_eq!(config.token, BearerToken::new(String::from("abc123")));
    assert_eq!(config.endpoint.as_str(), TANA_API_URL);
    assert_eq!(config.rate_limit_delay, RATE_LIMIT_DELAY);
    assert_eq!(config.rate_limit_delay, Duration::from_millis(1000));
}

/// **VALUE**: Verifies surrounding whitespace from `.env` files is trimmed.
///
/// **WHY THIS MATTERS**: A trailing newline or space in the header value gets the
/// request rejected with a confusing 401.
#[test]
fn given_padded_token_when_loading_config_then_token_is_trimmed() {
    let config = TanaConfig::from_lookup(lookup_with(Some("  abc123\n"))).unwrap();

    assert_eq!(config.token, BearerToken::new(String::from("abc123")));
}

/// **VALUE**: Verifies blank and placeholder tokens are refused.
///
/// **WHY THIS MATTERS**: Copying the example `.env` verbatim is the most common setup
/// mistake; it should fail locally with a clear reason.
///
/// **BUG THIS CATCHES**: Would catch if placeholder detection stops matching
/// case-insensitively.
#[test]
fn given_blank_or_placeholder_token_when_validated_then_rejected() {
    assert_eq!(validate("   "), Err(TokenValidationFailure::Empty));
    assert_eq!(
        validate("YOUR_TOKEN_HERE"),
        Err(TokenValidationFailure::PlaceholderDetected {
            pattern: "your_token_here"
        })
    );

    let result = TanaConfig::from_lookup(lookup_with(Some("your_token_here")));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidToken {
            reason: TokenValidationFailure::PlaceholderDetected { .. },
            ..
        })
    ));
}

/// **VALUE**: Verifies tokens that cannot be carried in a header are refused.
///
/// **BUG THIS CATCHES**: Would catch if interior whitespace slipped through and made
/// reqwest fail later with a builder error.
#[test]
fn given_token_with_interior_whitespace_when_validated_then_invalid_characters() {
    assert_eq!(
        validate("abc 123"),
        Err(TokenValidationFailure::InvalidCharacters)
    );
    assert_eq!(
        validate("abc\u{7}123"),
        Err(TokenValidationFailure::InvalidCharacters)
    );
    assert_eq!(
        validate("abc\u{85}123"),
        Err(TokenValidationFailure::InvalidCharacters)
    );
    assert_eq!(validate("abc-123_x.y"), Ok(()));
}

/// **VALUE**: Verifies non-ASCII tokens are accepted locally.
///
/// **WHY THIS MATTERS**: Only the service decides what a valid token looks like; the local
/// check exists to reject values that cannot be sent at all.
///
/// **BUG THIS CATCHES**: Would catch a return to an ASCII-only character check.
#[test]
fn given_non_ascii_token_when_validated_then_accepted() {
    assert_eq!(validate("tökén-123"), Ok(()));

    let config = TanaConfig::from_lookup(lookup_with(Some("tökén-123"))).unwrap();
    assert_eq!(config.token, BearerToken::new(String::from("tökén-123")));
}

/// **VALUE**: Verifies endpoint overrides are parsed and limited to HTTP(S).
#[test]
fn given_endpoint_override_when_applied_then_parsed_and_scheme_checked() {
    let config = TanaConfig::from_lookup(lookup_with(Some("abc123"))).unwrap();

    let overridden = config
        .clone()
        .with_endpoint("http://127.0.0.1:8080/addToNodeV2")
        .expect("http endpoint should be accepted");
    assert_eq!(overridden.endpoint.port(), Some(8080));

    let bad_scheme = config.clone().with_endpoint("ftp://example.com/x");
    assert!(matches!(bad_scheme, Err(ConfigError::InvalidEndpoint { .. })));

    let unparsable = config.with_endpoint("not a url");
    assert!(matches!(unparsable, Err(ConfigError::InvalidEndpoint { .. })));
}

/// **VALUE**: Verifies token errors are distinguishable from endpoint errors.
///
/// **WHY THIS MATTERS**: The CLI prints the `.env` setup hint only for token problems.
#[test]
fn given_config_errors_when_classified_then_token_problems_identified() {
    assert!(ConfigError::missing_token().is_token_problem());
    assert!(ConfigError::invalid_token(TokenValidationFailure::Empty).is_token_problem());
    assert!(!ConfigError::invalid_endpoint("x", "bad").is_token_problem());
}
