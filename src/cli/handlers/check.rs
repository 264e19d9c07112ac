//! Check command handler
//!
//! Reports which channels have usable credentials without sending anything.

use std::process::ExitCode;

use crate::config::Settings;
use crate::error::PushResult;
use crate::services::notifications::{Channel, NotificationDispatcher};

pub struct CheckCommandHandler<'a> {
    settings: &'a Settings,
}

impl<'a> CheckCommandHandler<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Lists each channel's status; fails only when no channel is usable
    pub fn execute(&self) -> PushResult<ExitCode> {
        let dispatcher = NotificationDispatcher::new(self.settings)?;

        println!("✓ Configuration is valid");
        if self.settings.proxy.is_configured() {
            println!("✓ Proxy configured for Telegram and MeoW");
        }

        let statuses = channel_statuses(&dispatcher);
        for (channel, status) in &statuses {
            match status {
                Ok(()) => println!("✓ {channel}: ready"),
                Err(e) => println!("✗ {channel}: {e}"),
            }
        }

        if statuses.iter().all(|(_, status)| status.is_err()) {
            tracing::warn!("No notification channel is configured");
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// Validates every channel exactly once
fn channel_statuses(
    dispatcher: &NotificationDispatcher<'_>,
) -> Vec<(Channel, PushResult<()>)> {
    Channel::ALL
        .into_iter()
        .map(|channel| (channel, dispatcher.sender_for(channel).validate_config()))
        .collect()
}
