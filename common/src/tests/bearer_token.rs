use crate::BearerToken;

/// **VALUE**: Verifies the token never shows up in Debug or Display output.
///
/// **WHY THIS MATTERS**: `TanaConfig` derives Debug and is logged on startup. A leaked
/// token in a terminal scrollback or CI log is a credential leak.
///
/// **BUG THIS CATCHES**: Would catch if someone replaces the manual Debug impl with a derive.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token
    let token = BearerToken::new(String::from("abc123-secret"));

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    // THEN: Neither contains the secret
    assert!(!debug.contains("abc123"), "Debug must not leak the token");
    assert!(!display.contains("abc123"), "Display must not leak the token");
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies the header value uses the Bearer scheme with the raw token.
///
/// **WHY THIS MATTERS**: This is the only place the token leaves the struct; the Input
/// API answers 401 for anything but `Bearer <token>`.
///
/// **BUG THIS CATCHES**: Would catch a missing space or a redacted value in the header.
#[test]
fn given_token_when_building_authorization_header_then_uses_bearer_scheme() {
    // GIVEN: A token
    let token = BearerToken::new(String::from("abc123"));

    // WHEN: Building the header value
    let header = token.authorization_header();

    // THEN: Scheme, single space, raw value
    assert_eq!(header.as_str(), "Bearer abc123");
    assert_eq!(token.len(), 6);
    assert!(!token.is_empty());
}

/// **VALUE**: Verifies equality compares the secret, so config tests can assert on it.
#[test]
fn given_two_tokens_when_compared_then_equal_only_for_same_value() {
    assert_eq!(
        BearerToken::new(String::from("a")),
        BearerToken::new(String::from("a"))
    );
    assert_ne!(
        BearerToken::new(String::from("a")),
        BearerToken::new(String::from("b"))
    );
}
