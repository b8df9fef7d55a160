pub mod config;
pub mod orchestrator;
pub mod tana_client;

pub use config::{ConfigError, TokenValidationFailure};
pub use orchestrator::OrchestratorError;
pub use tana_client::TanaClientError;
