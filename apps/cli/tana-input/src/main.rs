use tana_input::app;
use tana_input::logger::initialize as LoggerInitialize;

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logger FIRST
    if let Err(e) = LoggerInitialize() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let result = app::run().await;

    ExitCode::from(app::exit_status(&result))
}
