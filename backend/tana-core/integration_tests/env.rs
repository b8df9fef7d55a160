use tana_core::TANA_API_TOKEN_ENV;
use tana_core::config::TanaConfig;
use tana_core::error::{ConfigError, TokenValidationFailure};

use common::BearerToken;

use std::env;
use std::ffi::{OsStr, OsString};
use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

// ============================================================================
// Config loading from the real process environment and env files.
// Every test here mutates TANA_API_TOKEN and must run #[serial].
// ============================================================================

/// Sets or clears `TANA_API_TOKEN` and restores the previous value on drop.
struct TokenVarGuard {
    previous: Option<OsString>,
}

impl TokenVarGuard {
    fn set(value: impl AsRef<OsStr>) -> Self {
        let previous = env::var_os(TANA_API_TOKEN_ENV);
        // SAFETY: callers are #[serial]; no other test in this binary touches the variable.
        unsafe { env::set_var(TANA_API_TOKEN_ENV, value) };
        Self { previous }
    }

    fn unset() -> Self {
        let previous = env::var_os(TANA_API_TOKEN_ENV);
        // SAFETY: as above.
        unsafe { env::remove_var(TANA_API_TOKEN_ENV) };
        Self { previous }
    }
}

impl Drop for TokenVarGuard {
    fn drop(&mut self) {
        // SAFETY: as above.
        unsafe {
            match &self.previous {
                Some(value) => env::set_var(TANA_API_TOKEN_ENV, value),
                None => env::remove_var(TANA_API_TOKEN_ENV),
            }
        }
    }
}

fn env_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write env file");
    file
}

/// **VALUE**: Verifies `from_env` reads the token from the real process environment.
///
/// **WHY THIS MATTERS**: This is the path the binary takes; `from_lookup` tests never
/// exercise `env::var`.
#[test]
#[serial]
fn given_token_in_environment_when_loading_from_env_then_uses_it() {
    // GIVEN: TANA_API_TOKEN set in the process
    let _guard = TokenVarGuard::set("env-token-123");

    // WHEN: Loading from the environment
    let config = TanaConfig::from_env().expect("config should load");

    // THEN: Token taken from the environment
    assert_eq!(config.token, BearerToken::new(String::from("env-token-123")));
}

/// **VALUE**: Verifies an env file without the token leaves the config unloadable.
///
/// **BUG THIS CATCHES**: Would catch an empty token being substituted when neither the
/// environment nor the file provides one.
#[test]
#[serial]
fn given_no_token_anywhere_when_loading_env_file_then_missing_token() {
    // GIVEN: No variable and an env file that does not set it
    let _guard = TokenVarGuard::unset();
    let file = env_file("OTHER_SETTING=1\n");

    // WHEN: Loading
    let result = TanaConfig::from_env_file(file.path());

    // THEN: MissingToken
    assert!(matches!(result, Err(ConfigError::MissingToken { .. })));
}

/// **VALUE**: Verifies the token is picked up from an env file.
///
/// **WHY THIS MATTERS**: A `.env` file is the documented way to provide the token.
#[test]
#[serial]
fn given_token_only_in_env_file_when_loading_then_uses_file_value() {
    // GIVEN: No variable, token in the file
    let _guard = TokenVarGuard::unset();
    let file = env_file("TANA_API_TOKEN=file-token-123\n");

    // WHEN: Loading the file
    let config = TanaConfig::from_env_file(file.path()).expect("config should load");

    // THEN: Token from the file
    assert_eq!(config.token, BearerToken::new(String::from("file-token-123")));
}

/// **VALUE**: Verifies a variable already in the environment wins over the env file.
///
/// **BUG THIS CATCHES**: Would catch switching to an overriding loader, which would let a
/// stale `.env` shadow an explicitly exported token.
#[test]
#[serial]
fn given_token_in_environment_and_file_when_loading_then_environment_wins() {
    let _guard = TokenVarGuard::set("exported-token");
    let file = env_file("TANA_API_TOKEN=file-token-123\n");

    let config = TanaConfig::from_env_file(file.path()).unwrap();

    assert_eq!(config.token, BearerToken::new(String::from("exported-token")));
}

/// **VALUE**: Verifies a missing env file is an `EnvFile` error naming the path.
#[test]
#[serial]
fn given_missing_env_file_when_loading_then_env_file_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.env");

    let err = TanaConfig::from_env_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::EnvFile { .. }));
    assert!(!err.is_token_problem());
    assert!(err.to_string().contains("absent.env"), "{err}");
}

/// **VALUE**: Verifies a non-unicode variable is refused as an invalid token.
///
/// **BUG THIS CATCHES**: Would catch `env::var` errors being collapsed into MissingToken,
/// which would send the user looking for a variable that is actually set.
#[cfg(unix)]
#[test]
#[serial]
fn given_non_unicode_token_when_loading_from_env_then_invalid_token() {
    use std::os::unix::ffi::OsStrExt;

    // GIVEN: A variable holding invalid UTF-8
    let _guard = TokenVarGuard::set(OsStr::from_bytes(&[0x61, 0x62, 0xff, 0x63]));

    // WHEN: Loading from the environment
    let result = TanaConfig::from_env();

    // THEN: InvalidToken with the NotUnicode reason
    assert!(matches!(
        result,
        Err(ConfigError::InvalidToken {
            reason: TokenValidationFailure::NotUnicode,
            ..
        })
    ));
}
