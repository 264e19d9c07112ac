//! Send command handler

use std::process::ExitCode;

use crate::config::Settings;
use crate::error::PushResult;
use crate::services::notifications::{Channel, DeliveryOutcome, Message, NotificationDispatcher};

pub struct SendCommandHandler<'a> {
    settings: &'a Settings,
}

impl<'a> SendCommandHandler<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Sends one message and maps the outcome to a process exit code.
    ///
    /// Best-effort channels always exit successfully once their retry loop
    /// finishes; Telegram exits with failure when neither path delivered.
    pub async fn execute(
        &self,
        method: &str,
        content: &str,
        title: Option<&str>,
        link: Option<&str>,
    ) -> PushResult<ExitCode> {
        let channel: Channel = method.parse()?;
        let dispatcher = NotificationDispatcher::new(self.settings)?;

        let mut message = Message::new(content);
        if let Some(title) = title {
            message = message.with_title(title);
        }
        if let Some(link) = link {
            message = message.with_link(link);
        }

        let outcome = dispatcher.send(&message, channel).await?;
        Ok(exit_code_for(outcome))
    }
}

fn exit_code_for(outcome: DeliveryOutcome) -> ExitCode {
    match outcome {
        DeliveryOutcome::Completed | DeliveryOutcome::Delivered(true) => ExitCode::SUCCESS,
        DeliveryOutcome::Delivered(false) => ExitCode::FAILURE,
    }
}
