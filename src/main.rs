use std::process::ExitCode;

use clap::Parser;
use push_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(version = push_rs::pkg_version(), "push-rs starting");

    match execute_command(&cli, &settings).await {
        Ok(code) => Ok(code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
