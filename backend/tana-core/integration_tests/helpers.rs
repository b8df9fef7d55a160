//! Test helpers shared by the dispatcher and orchestrator tests.
//!
//! - Mock Input API endpoint setup
//! - A reporter that records what the dispatcher told it, with timestamps

use tana_core::TANA_API_PATH;
use tana_core::config::TanaConfig;
use tana_core::error::TanaClientError;
use tana_core::payload::{AddNodesRequest, TargetLocation};
use tana_core::reporter::DispatchReporter;
use tana_core::tana_client::{DispatchResponse, TanaClient};

use std::sync::{Arc, Mutex};
use std::time::Instant;

use wiremock::MockServer;

pub const TEST_TOKEN: &str = "abc123";

#[derive(Debug, Clone)]
pub enum ReportEvent {
    Send {
        target: TargetLocation,
        request: AddNodesRequest,
    },
    Success {
        target: TargetLocation,
        status: u16,
    },
    Failure {
        target: TargetLocation,
        category: &'static str,
    },
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(Instant, ReportEvent)>>,
}

impl RecordingReporter {
    fn record(&self, event: ReportEvent) {
        self.events
            .lock()
            .expect("reporter mutex poisoned")
            .push((Instant::now(), event));
    }

    pub fn events(&self) -> Vec<(Instant, ReportEvent)> {
        self.events.lock().expect("reporter mutex poisoned").clone()
    }

    pub fn send_times(&self) -> Vec<Instant> {
        self.events()
            .into_iter()
            .filter(|(_, e)| matches!(e, ReportEvent::Send { .. }))
            .map(|(at, _)| at)
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|(_, e)| matches!(e, ReportEvent::Success { .. }))
            .count()
    }
}

impl DispatchReporter for RecordingReporter {
    fn on_send(&self, target: TargetLocation, request: &AddNodesRequest) {
        self.record(ReportEvent::Send {
            target,
            request: request.clone(),
        });
    }

    fn on_success(&self, target: TargetLocation, response: &DispatchResponse) {
        self.record(ReportEvent::Success {
            target,
            status: response.status.0,
        });
    }

    fn on_failure(&self, target: TargetLocation, error: &TanaClientError) {
        self.record(ReportEvent::Failure {
            target,
            category: error.error_category(),
        });
    }
}

/// Config with the test token, pointed at the mock server.
pub fn config_for(server: &MockServer) -> TanaConfig {
    TanaConfig::from_lookup(|_| Some(TEST_TOKEN.to_string()))
        .expect("test token should be valid")
        .with_endpoint(&format!("{}/{}", server.uri(), TANA_API_PATH))
        .expect("mock endpoint should parse")
}

pub fn client_for(config: &TanaConfig) -> (TanaClient, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let client = TanaClient::new(config, reporter.clone()).expect("client should build");
    (client, reporter)
}

pub fn endpoint_path() -> String {
    format!("/{TANA_API_PATH}")
}
