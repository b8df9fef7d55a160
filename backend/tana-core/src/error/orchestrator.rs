use crate::error::TanaClientError;
use crate::orchestrator::RunState;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum OrchestratorError {
    /// A send failed; `from` is the state the run was in when it did.
    #[error("Smoke test failed in state {from}: {source}")]
    Step {
        from: RunState,
        #[source]
        source: TanaClientError,
    },

    /// `run` was called again after the run reached DONE or FAILED.
    #[error("Smoke test already finished in state {state} {location}")]
    AlreadyFinished {
        state: RunState,
        location: ErrorLocation,
    },
}

impl OrchestratorError {
    #[track_caller]
    pub fn already_finished(state: RunState) -> Self {
        OrchestratorError::AlreadyFinished {
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn failed_from(&self) -> RunState {
        match self {
            OrchestratorError::Step { from, .. } => *from,
            OrchestratorError::AlreadyFinished { state, .. } => *state,
        }
    }

    /// The dispatcher error, if a send was attempted and failed.
    pub fn client_error(&self) -> Option<&TanaClientError> {
        match self {
            OrchestratorError::Step { source, .. } => Some(source),
            OrchestratorError::AlreadyFinished { .. } => None,
        }
    }
}
