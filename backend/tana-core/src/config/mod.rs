//! Runtime configuration for the Tana Input client.
//!
//! Configuration is an explicit value handed to the dispatcher. Nothing else
//! in the crate reads the process environment.

pub mod validation;

use crate::error::{ConfigError, TokenValidationFailure};
use crate::{TANA_API_TOKEN_ENV, TANA_API_URL};

use common::BearerToken;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

/// HTTP timeout for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The Input API allows one call per second per token.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct TanaConfig {
    pub token: BearerToken,
    pub endpoint: Url,
    pub request_timeout: Duration,
    pub rate_limit_delay: Duration,
}

impl TanaConfig {
    /// Build a config around an already validated token, pointed at the
    /// production endpoint.
    pub fn new(token: BearerToken) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(TANA_API_URL)
            .map_err(|e| ConfigError::invalid_endpoint(TANA_API_URL, e.to_string()))?;

        Ok(Self {
            token,
            endpoint,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            rate_limit_delay: RATE_LIMIT_DELAY,
        })
    }

    /// Load `.env` (if present) and read the token from the process environment.
    ///
    /// Variables already set in the environment win over `.env` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if `TANA_API_TOKEN` is unset, or
    /// [`ConfigError::InvalidToken`] if its value cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        if try_load_dotenv().is_none() {
            debug!("No .env file found - will check existing environment variables");
        }

        Self::from_process_env()
    }

    /// Load a specific env file, then read the token from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] if the file cannot be read or parsed,
    /// otherwise the same errors as [`TanaConfig::from_env`].
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::from_path(path).map_err(|e| ConfigError::env_file(path, e.to_string()))?;
        info!("Loaded env file: {}", path.display());

        Self::from_process_env()
    }

    fn from_process_env() -> Result<Self, ConfigError> {
        match env::var(TANA_API_TOKEN_ENV) {
            Ok(value) => Self::from_token_value(value),
            Err(env::VarError::NotPresent) => Err(ConfigError::missing_token()),
            Err(env::VarError::NotUnicode(_)) => {
                warn!("Env var {TANA_API_TOKEN_ENV} contains invalid unicode");
                Err(ConfigError::invalid_token(TokenValidationFailure::NotUnicode))
            }
        }
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// [`TanaConfig::from_env`] is this with the process environment plus `.env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(TANA_API_TOKEN_ENV) {
            Some(value) => Self::from_token_value(value),
            None => Err(ConfigError::missing_token()),
        }
    }

    #[track_caller]
    fn from_token_value(value: String) -> Result<Self, ConfigError> {
        let token = validation::validate_and_wrap(value)?;
        info!(
            "Found {TANA_API_TOKEN_ENV} ({} chars)",
            token.len()
        );
        Self::new(token)
    }

    /// Point the dispatcher at a different endpoint (mock servers, staging).
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::invalid_endpoint(endpoint, e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_endpoint(
                endpoint,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        self.endpoint = url;
        Ok(self)
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Load `.env` from the working directory (or a parent), falling back to the
/// directory holding the executable. Returns the file that was loaded.
fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {}", path.display());
        return Some(path);
    }

    let beside_exe = env::current_exe().ok()?.parent()?.join(".env");
    if !beside_exe.is_file() {
        return None;
    }

    match dotenvy::from_path(&beside_exe) {
        Ok(()) => {
            info!("Loaded .env from: {}", beside_exe.display());
            Some(beside_exe)
        }
        Err(e) => {
            warn!("Failed to parse {}: {e}", beside_exe.display());
            None
        }
    }
}
