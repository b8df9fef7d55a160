//! Token format checks.
//!
//! The Input API is the authority on whether a token is valid. These checks
//! only catch values that can never work, so the tool fails before any
//! network activity.

use crate::error::{ConfigError, TokenValidationFailure};

use common::BearerToken;

/// Validate a raw token value.
pub fn validate(token: &str) -> Result<(), TokenValidationFailure> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Err(TokenValidationFailure::Empty);
    }

    if let Some(pattern) = detect_placeholder(trimmed) {
        return Err(TokenValidationFailure::PlaceholderDetected { pattern });
    }

    // Must travel verbatim inside an Authorization header
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TokenValidationFailure::InvalidCharacters);
    }

    Ok(())
}

/// Validate and wrap the trimmed value in a [`BearerToken`].
#[track_caller]
pub fn validate_and_wrap(token: String) -> Result<BearerToken, ConfigError> {
    match validate(&token) {
        Ok(()) => Ok(BearerToken::new(token.trim().to_string())),
        Err(reason) => Err(ConfigError::invalid_token(reason)),
    }
}

/// Detect placeholder values copied from example `.env` files.
///
/// Returns the matched pattern name if detected.
fn detect_placeholder(token: &str) -> Option<&'static str> {
    let lower = token.to_lowercase();

    static PATTERNS: &[(&str, &str)] = &[
        ("your_token_here", "your_token_here"),
        ("your-token-here", "your-token-here"),
        ("your_api_token", "your_api_token"),
        ("<your", "<your...>"),
        ("placeholder", "placeholder"),
        ("replace_me", "replace_me"),
        ("changeme", "changeme"),
    ];

    PATTERNS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, name)| *name)
}
