//! Dispatches a parsed command to its handler

use std::process::ExitCode;

use super::handlers::{CheckCommandHandler, SendCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::PushResult;

/// Runs `cli.command` against merged settings and returns the exit code
pub async fn execute_command(cli: &Cli, settings: &Settings) -> PushResult<ExitCode> {
    match &cli.command {
        Commands::Send {
            method,
            title,
            link,
            content,
            ..
        } => {
            SendCommandHandler::new(settings)
                .execute(method, content, title.as_deref(), link.as_deref())
                .await
        }
        Commands::Check => CheckCommandHandler::new(settings).execute(),
    }
}
