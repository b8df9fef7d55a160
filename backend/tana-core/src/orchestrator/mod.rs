//! Sequencing of the two test sends.
//!
//! The default-location send runs first. After a fixed rate-limit pause the
//! INBOX send runs. The first failure ends the run; nothing already accepted
//! by the service is undone.

mod state;

pub use state::RunState;

use crate::config::TanaConfig;
use crate::error::{OrchestratorError, TanaClientError};
use crate::payload::current_timestamp;
use crate::tana_client::{DispatchResponse, TanaClient};

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use tokio::time::sleep;

/// Responses of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub default_response: DispatchResponse,
    pub inbox_response: DispatchResponse,
}

#[derive(Debug)]
pub struct SmokeTest {
    rate_limit_delay: Duration,
    state: RunState,
}

impl SmokeTest {
    pub fn new(rate_limit_delay: Duration) -> Self {
        Self {
            rate_limit_delay,
            state: RunState::Start,
        }
    }

    pub fn from_config(config: &TanaConfig) -> Self {
        Self::new(config.rate_limit_delay)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run both sends in order.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Step`] carrying the state the run was in
    /// when a send failed. The INBOX send is never attempted after a failed
    /// default send. A run that already reached DONE or FAILED sends nothing
    /// and returns [`OrchestratorError::AlreadyFinished`].
    pub async fn run(&mut self, client: &TanaClient) -> Result<RunSummary, OrchestratorError> {
        if self.state.is_terminal() {
            return Err(OrchestratorError::already_finished(self.state));
        }

        let default_response = self
            .step(client.send_test_node(&current_timestamp()))
            .await?;
        self.transition(RunState::SentDefault);

        info!(
            "Waiting {}ms (rate limit)...",
            self.rate_limit_delay.as_millis()
        );
        self.transition(RunState::Waiting);
        sleep(self.rate_limit_delay).await;

        let inbox_response = self
            .step(client.send_inbox_node(&current_timestamp()))
            .await?;
        self.transition(RunState::SentInbox);

        self.transition(RunState::Done);
        info!("All tests completed successfully!");

        Ok(RunSummary {
            default_response,
            inbox_response,
        })
    }

    async fn step<F>(&mut self, send: F) -> Result<DispatchResponse, OrchestratorError>
    where
        F: Future<Output = Result<DispatchResponse, TanaClientError>>,
    {
        match send.await {
            Ok(response) => Ok(response),
            Err(source) => {
                let from = self.state;
                self.transition(RunState::Failed);
                Err(OrchestratorError::Step { from, source })
            }
        }
    }

    fn transition(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!("Smoke test state: {} -> {}", self.state, next);
        self.state = next;
    }
}
