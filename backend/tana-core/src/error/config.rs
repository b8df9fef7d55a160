use crate::TANA_API_TOKEN_ENV;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing Token Error: {key} not found in environment variables {location}")]
    MissingToken {
        key: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid Token Error: {key}: {reason} {location}")]
    InvalidToken {
        key: &'static str,
        reason: TokenValidationFailure,
        location: ErrorLocation,
    },

    #[error("Env File Error: {}: {reason} {location}", .path.display())]
    EnvFile {
        path: PathBuf,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Invalid Endpoint Error: {value}: {reason} {location}")]
    InvalidEndpoint {
        value: String,
        reason: String,
        location: ErrorLocation,
    },
}

/// Specific reasons a token value is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidationFailure {
    Empty,
    PlaceholderDetected { pattern: &'static str },
    InvalidCharacters,
    NotUnicode,
}

impl std::fmt::Display for TokenValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "token is empty"),
            Self::PlaceholderDetected { pattern } => {
                write!(f, "detected placeholder pattern '{}'", pattern)
            }
            Self::InvalidCharacters => write!(f, "contains whitespace or control characters"),
            Self::NotUnicode => write!(f, "contains invalid unicode"),
        }
    }
}

impl ConfigError {
    #[track_caller]
    pub fn missing_token() -> Self {
        ConfigError::MissingToken {
            key: TANA_API_TOKEN_ENV,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token(reason: TokenValidationFailure) -> Self {
        ConfigError::InvalidToken {
            key: TANA_API_TOKEN_ENV,
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_endpoint(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidEndpoint {
            value: value.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn env_file(path: &Path, reason: impl Into<String>) -> Self {
        ConfigError::EnvFile {
            path: path.to_path_buf(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether the failure concerns the token (as opposed to the endpoint).
    pub fn is_token_problem(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingToken { .. } | ConfigError::InvalidToken { .. }
        )
    }
}

