//! Composition root: configuration, banner, smoke test run, exit status.

use crate::error::AppError;

use tana_core::TANA_API_TOKEN_ENV;
use tana_core::config::TanaConfig;
use tana_core::error::ConfigError;
use tana_core::orchestrator::{RunSummary, SmokeTest};
use tana_core::reporter::{DispatchReporter, LogReporter};
use tana_core::tana_client::TanaClient;

use std::sync::Arc;

use log::{debug, error, info};

/// Load configuration from `.env` and the environment, then run the smoke test.
pub async fn run() -> Result<RunSummary, AppError> {
    start(TanaConfig::from_env(), Arc::new(LogReporter)).await
}

/// Same as [`run`], reading variables through `lookup` instead of the environment.
pub async fn run_with_lookup<F>(
    lookup: F,
    reporter: Arc<dyn DispatchReporter>,
) -> Result<RunSummary, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    start(TanaConfig::from_lookup(lookup), reporter).await
}

/// Run the smoke test with an already loaded configuration.
pub async fn run_with_config(
    config: &TanaConfig,
    reporter: Arc<dyn DispatchReporter>,
) -> Result<RunSummary, AppError> {
    log_banner(config);

    let client = TanaClient::new(config, reporter)?;
    let mut smoke_test = SmokeTest::from_config(config);

    match smoke_test.run(&client).await {
        Ok(summary) => {
            info!("Check your Tana workspace to see the new nodes");
            Ok(summary)
        }
        Err(e) => {
            error!("Test failed: {e}");
            Err(e.into())
        }
    }
}

/// Process exit status for a finished run: 0 on success, 1 otherwise.
pub fn exit_status<T>(result: &Result<T, AppError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_status(),
    }
}

async fn start(
    config: Result<TanaConfig, ConfigError>,
    reporter: Arc<dyn DispatchReporter>,
) -> Result<RunSummary, AppError> {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return Err(e.into());
        }
    };

    debug!("Loaded config: {config:?}");

    run_with_config(&config, reporter).await
}

fn report_config_error(err: &ConfigError) {
    error!("Error: {err}");

    if err.is_token_problem() {
        info!("Please create a .env file with your Tana API token");
        info!("Example: {TANA_API_TOKEN_ENV}=your_token_here");
    }
}

fn log_banner(config: &TanaConfig) {
    info!("Starting Tana Input API Test");
    info!(
        "Using API token: {} ({} chars)",
        config.token,
        config.token.len()
    );
    info!("API endpoint: {}", config.endpoint);
    info!(
        "Rate limit: 1 call per {}ms per token",
        config.rate_limit_delay.as_millis()
    );
}
