use common::ErrorLocation;
use tana_core::error::{ConfigError, OrchestratorError, TanaClientError};

use thiserror::Error;

/// Exit status for every failure: missing token or a failed send alike.
pub const FAILURE_EXIT_STATUS: u8 = 1;

/// Errors that end the process.
///
/// The application is the only place these turn into an exit status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Logger could not be installed
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Token missing or unusable; raised before any network activity
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error(transparent)]
    Client(#[from] TanaClientError),

    /// One of the two sends failed
    #[error(transparent)]
    Run(#[from] OrchestratorError),
}

impl AppError {
    pub fn exit_status(&self) -> u8 {
        FAILURE_EXIT_STATUS
    }
}
