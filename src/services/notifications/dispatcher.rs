//! Dispatcher: maps a channel to its sender and credentials.

use std::time::Duration;

use super::channel::Channel;
use super::meow_provider::MeowProvider;
use super::provider::{ChannelSender, DeliveryOutcome, Message};
use super::pushplus_provider::PushPlusProvider;
use super::retry::RetryPolicy;
use super::telegram_provider::TelegramProvider;
use super::wxpusher_provider::WxPusherProvider;
use crate::config::Settings;
use crate::error::PushResult;
use crate::external::HttpClients;

/// Sends messages to one channel per call using read-only `Settings`.
///
/// A fresh sender is built for every call; nothing is cached or shared
/// between sends apart from the HTTP connection pools.
pub struct NotificationDispatcher<'a> {
    settings: &'a Settings,
    clients: HttpClients,
    policy: RetryPolicy,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(settings: &'a Settings) -> PushResult<Self> {
        let clients = HttpClients::new(&settings.http, &settings.proxy)?;
        Ok(Self {
            settings,
            clients,
            policy: RetryPolicy::from(&settings.retry),
        })
    }

    /// Replaces the retry policy derived from settings
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends `message` through `channel`.
    ///
    /// Transport failures never surface here; only configuration problems
    /// detected before the first request do.
    pub async fn send(&self, message: &Message, channel: Channel) -> PushResult<DeliveryOutcome> {
        let sender = self.sender_for(channel);
        tracing::debug!(%channel, "Dispatching notification");
        sender.send(message).await
    }

    /// String-tagged entry point: `Some(success)` for Telegram, `None` otherwise
    pub async fn push(&self, content: &str, method: &str) -> PushResult<Option<bool>> {
        let channel: Channel = method.parse()?;
        let outcome = self.send(&Message::new(content), channel).await?;
        Ok(outcome.success())
    }

    /// Builds the sender bound to `channel` and its credentials
    pub fn sender_for(&self, channel: Channel) -> Box<dyn ChannelSender> {
        let channels = &self.settings.channels;
        let request_timeout = Duration::from_secs(self.settings.http.request_timeout);

        match channel {
            Channel::PushPlus => Box::new(PushPlusProvider::new(
                self.clients.direct.clone(),
                channels.pushplus.clone(),
                self.policy.clone(),
                request_timeout,
            )),
            Channel::Telegram => Box::new(TelegramProvider::new(
                self.clients.proxied.clone(),
                self.clients.direct.clone(),
                channels.telegram.clone(),
                Duration::from_secs(self.settings.http.telegram_timeout),
            )),
            Channel::WxPusher => Box::new(WxPusherProvider::new(
                self.clients.direct.clone(),
                channels.wxpusher.clone(),
                self.policy.clone(),
                request_timeout,
            )),
            Channel::Meow => Box::new(MeowProvider::new(
                self.clients.proxied.clone(),
                channels.meow.clone(),
                self.policy.clone(),
                request_timeout,
            )),
        }
    }
}

/// One-shot helper: rejects unknown methods before building any client
pub async fn push(settings: &Settings, content: &str, method: &str) -> PushResult<Option<bool>> {
    let channel: Channel = method.parse()?;
    let dispatcher = NotificationDispatcher::new(settings)?;
    let outcome = dispatcher.send(&Message::new(content), channel).await?;
    Ok(outcome.success())
}
