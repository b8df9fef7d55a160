// Unit tests for dispatcher helpers that cannot be driven through a mock server.

use crate::tana_client::rejected_body;

/// **VALUE**: Verifies a rejected response's body read failure is kept, not blanked.
///
/// **WHY THIS MATTERS**: An empty body after a 4xx/5xx looks like the service said
/// nothing; the read error is the only clue left.
///
/// **BUG THIS CATCHES**: Would catch a return to `unwrap_or_default()` on the body read.
#[test]
fn given_unreadable_body_when_building_rejection_then_records_read_error() {
    // GIVEN: A body read that failed
    let read: Result<String, String> = Err(String::from("connection reset"));

    // WHEN: Building the rejection body
    let body = rejected_body(read);

    // THEN: The error is visible in the body
    assert_eq!(body, "<body unreadable: connection reset>");
}

#[test]
fn given_readable_body_when_building_rejection_then_body_is_unchanged() {
    let read: Result<String, String> = Ok(String::from("invalid token"));

    assert_eq!(rejected_body(read), "invalid token");
}
