//! WxPusher simple-push sender.
//!
//! `GET {url}/{spt}/{content}` with the content percent-encoded into the last
//! path segment.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::channel::Channel;
use super::provider::{ChannelSender, DeliveryOutcome, Message, execute, require};
use super::retry::{RetryPolicy, log_summary, run_with_retry};
use crate::config::WxPusherConfig;
use crate::error::{PushError, PushResult};

pub struct WxPusherProvider {
    client: Client,
    config: WxPusherConfig,
    policy: RetryPolicy,
    timeout: Duration,
}

impl WxPusherProvider {
    pub fn new(client: Client, config: WxPusherConfig, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client,
            config,
            policy,
            timeout,
        }
    }

    fn build_url(&self, content: &str) -> PushResult<Url> {
        let mut url = Url::parse(&self.config.url)
            .map_err(|e| PushError::invalid_endpoint(&self.config.url, e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| PushError::invalid_endpoint(&self.config.url, "URL cannot carry a path"))?
            .pop_if_empty()
            .push(&self.config.spt)
            .push(content);

        Ok(url)
    }
}

#[async_trait]
impl ChannelSender for WxPusherProvider {
    async fn send(&self, message: &Message) -> PushResult<DeliveryOutcome> {
        self.validate_config()?;
        let url = self.build_url(&message.content)?;

        let attempts = run_with_retry(self.channel(), &self.policy, |_| {
            execute(self.client.get(url.clone()).timeout(self.timeout))
        })
        .await;
        log_summary(self.channel(), &attempts);

        Ok(DeliveryOutcome::Completed)
    }

    fn channel(&self) -> Channel {
        Channel::WxPusher
    }

    fn validate_config(&self) -> PushResult<()> {
        require(&self.config.spt, self.channel(), "WXPUSHER_SPT")?;
        self.build_url("").map(|_| ())
    }
}
