//! MeoW sender.
//!
//! `GET {url}/{token}[/{title}]/{msg}[?url={link}]`, routed through the proxied
//! client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::channel::Channel;
use super::provider::{ChannelSender, DeliveryOutcome, Message, execute, require};
use super::retry::{RetryPolicy, log_summary, run_with_retry};
use crate::config::MeowConfig;
use crate::error::{PushError, PushResult};

pub struct MeowProvider {
    client: Client,
    config: MeowConfig,
    policy: RetryPolicy,
    timeout: Duration,
}

impl MeowProvider {
    pub fn new(client: Client, config: MeowConfig, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client,
            config,
            policy,
            timeout,
        }
    }

    fn build_url(&self, message: &Message) -> PushResult<Url> {
        let mut url = Url::parse(&self.config.url)
            .map_err(|e| PushError::invalid_endpoint(&self.config.url, e.to_string()))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                PushError::invalid_endpoint(&self.config.url, "URL cannot carry a path")
            })?;
            segments.pop_if_empty().push(&self.config.token);
            if let Some(title) = message.title.as_deref().filter(|t| !t.is_empty()) {
                segments.push(title);
            }
            segments.push(&message.content);
        }

        if let Some(link) = message.link.as_deref().filter(|l| !l.is_empty()) {
            url.query_pairs_mut().append_pair("url", link);
        }

        Ok(url)
    }
}

#[async_trait]
impl ChannelSender for MeowProvider {
    async fn send(&self, message: &Message) -> PushResult<DeliveryOutcome> {
        self.validate_config()?;
        let url = self.build_url(message)?;

        let attempts = run_with_retry(self.channel(), &self.policy, |_| {
            execute(self.client.get(url.clone()).timeout(self.timeout))
        })
        .await;
        log_summary(self.channel(), &attempts);

        Ok(DeliveryOutcome::Completed)
    }

    fn channel(&self) -> Channel {
        Channel::Meow
    }

    fn validate_config(&self) -> PushResult<()> {
        require(&self.config.token, self.channel(), "MEOW_TOKEN")?;
        self.build_url(&Message::new("")).map(|_| ())
    }
}
