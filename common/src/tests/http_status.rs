use crate::HttpStatusCode;

/// **VALUE**: Verifies the status class boundaries used for error categories.
///
/// **BUG THIS CATCHES**: Would catch off-by-one errors in the ranges (e.g. 300 counted
/// as success, 500 counted as a client error).
#[test]
fn given_status_codes_when_classified_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());

    assert!(HttpStatusCode(400).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(500).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());
}

#[test]
fn given_401_or_403_when_checked_then_is_auth_failure() {
    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode::from(403).is_auth_failure());
    assert!(!HttpStatusCode(429).is_auth_failure());
    assert_eq!(HttpStatusCode(429).to_string(), "429");
}
