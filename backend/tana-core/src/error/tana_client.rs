//! Error types for the request dispatcher.
//!
//! - Remote rejections keep the status code, body, and headers as received
//! - Transport failures keep a description of the request that got no response
//! - All errors include ErrorLocation for debugging

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TanaClientError {
    /// The service answered with a non-2xx status.
    #[error("Remote Rejection: HTTP {status} - {body} {location}")]
    Rejected {
        status: HttpStatusCode,
        body: String,
        headers: Vec<(String, String)>,
        location: ErrorLocation,
    },

    /// The request went out but no response came back.
    #[error("Transport Error: no response for {request}: {message} {location}")]
    Transport {
        request: String,
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    /// The request could not be built locally.
    #[error("Construction Error: {message} {location}")]
    Construction {
        message: String,
        location: ErrorLocation,
    },
}

impl TanaClientError {
    #[track_caller]
    pub fn rejected(
        status_code: u16,
        body: impl Into<String>,
        headers: Vec<(String, String)>,
    ) -> Self {
        TanaClientError::Rejected {
            status: HttpStatusCode(status_code),
            body: body.into(),
            headers,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn construction(message: impl Into<String>) -> Self {
        TanaClientError::Construction {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error raised while sending.
    ///
    /// Builder errors never left the process and count as construction
    /// failures; everything else means the request got no response.
    #[track_caller]
    pub fn from_reqwest(request: impl Into<String>, error: &reqwest::Error) -> Self {
        if error.is_builder() {
            return TanaClientError::Construction {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        TanaClientError::Transport {
            request: request.into(),
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Get HTTP status code if the service responded.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TanaClientError::Rejected { status, .. } => Some(status.0),
            _ => None,
        }
    }

    /// Short category name for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            TanaClientError::Rejected { status, .. } if status.is_auth_failure() => "unauthorized",
            TanaClientError::Rejected { status, .. } if status.is_client_error() => "client_error",
            TanaClientError::Rejected { status, .. } if status.is_server_error() => "server_error",
            TanaClientError::Rejected { .. } => "rejected",
            TanaClientError::Transport { is_timeout: true, .. } => "timeout",
            TanaClientError::Transport { is_connection: true, .. } => "connection",
            TanaClientError::Transport { .. } => "transport",
            TanaClientError::Construction { .. } => "construction",
        }
    }
}

impl From<serde_json::Error> for TanaClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        TanaClientError::Construction {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
