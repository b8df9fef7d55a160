//! Console reporting, injected into the dispatcher as a capability.

use crate::error::TanaClientError;
use crate::payload::{AddNodesRequest, TargetLocation};
use crate::tana_client::DispatchResponse;

use log::{error, info, warn};

/// Receives the progress of each send.
///
/// The dispatcher calls `on_send` immediately before the request goes out,
/// then exactly one of `on_success` or `on_failure`.
pub trait DispatchReporter: Send + Sync {
    fn on_send(&self, target: TargetLocation, request: &AddNodesRequest);

    fn on_success(&self, target: TargetLocation, response: &DispatchResponse);

    fn on_failure(&self, target: TargetLocation, error: &TanaClientError);
}

/// Writes human-readable progress lines through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl DispatchReporter for LogReporter {
    fn on_send(&self, target: TargetLocation, request: &AddNodesRequest) {
        info!("Sending test node to Tana ({target})...");
        match serde_json::to_string_pretty(request) {
            Ok(payload) => info!("Payload: {payload}"),
            Err(e) => warn!("Payload could not be rendered: {e}"),
        }
    }

    fn on_success(&self, target: TargetLocation, response: &DispatchResponse) {
        info!("Success! Node created in Tana ({target})");
        info!("Response status: {}", response.status);
        info!("Response data: {}", response.display_body());
    }

    fn on_failure(&self, target: TargetLocation, err: &TanaClientError) {
        error!(
            "Error creating node in Tana ({target}) [{}]:",
            err.error_category()
        );

        match err {
            TanaClientError::Rejected {
                status,
                body,
                headers,
                ..
            } => {
                error!("Status: {status}");
                error!("Data: {body}");
                error!("Headers: {headers:?}");
            }
            TanaClientError::Transport {
                request, message, ..
            } => {
                error!("No response received: {request}: {message}");
            }
            TanaClientError::Construction { message, .. } => {
                error!("Error: {message}");
            }
        }
    }
}
