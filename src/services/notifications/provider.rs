//! Core channel sender trait and types.

use crate::error::{PushError, PushResult};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

use super::channel::Channel;

/// Message to be sent via a channel sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message body (required)
    pub content: String,
    /// Title, used by PushPlus and MeoW
    pub title: Option<String>,
    /// Link, used by MeoW
    pub link: Option<String>,
}

impl Message {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
            link: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// What a completed send reports back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Best-effort channel finished; success or exhaustion is only logged
    Completed,
    /// Channel with a definitive result (Telegram)
    Delivered(bool),
}

impl DeliveryOutcome {
    /// `Some(success)` for channels that report one, `None` otherwise
    pub fn success(&self) -> Option<bool> {
        match self {
            DeliveryOutcome::Completed => None,
            DeliveryOutcome::Delivered(ok) => Some(*ok),
        }
    }
}

/// Shared send contract for the four channels.
///
/// Implementations absorb transport failures (retrying or falling back as
/// their channel requires) and only return `Err` for configuration problems
/// detected before the first request.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send(&self, message: &Message) -> PushResult<DeliveryOutcome>;

    fn channel(&self) -> Channel;

    /// Checks credentials and endpoint without touching the network
    fn validate_config(&self) -> PushResult<()>;
}

/// Issues one request and maps non-2xx statuses to `PushError::Transport`.
///
/// Returns the response body on success.
pub(crate) async fn execute(request: RequestBuilder) -> PushResult<String> {
    let response = request.send().await.map_err(PushError::transport)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_success() {
        Ok(body)
    } else {
        Err(PushError::Transport {
            status: Some(status.as_u16()),
            message: format!("HTTP {}: {}", status, body),
        })
    }
}

pub(crate) fn require(value: &str, channel: Channel, key: &'static str) -> PushResult<()> {
    if value.trim().is_empty() {
        return Err(PushError::MissingCredential {
            channel: channel.as_str(),
            key,
        });
    }
    Ok(())
}
