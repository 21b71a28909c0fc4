use session_cli::cli::Cli;
use session_cli::commands::{log_dir, run};
use session_cli::error::SessionCliError;
use session_cli::logger::{initialize as LoggerInitialize, level_for_verbosity};

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> Result<(), SessionCliError> {
    let log_dir = log_dir(&cli)?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, level_for_verbosity(cli.verbose))?;

    info!("Session CLI starting");
    info!("Log directory: {}", log_dir.display());

    run(cli).await
}
