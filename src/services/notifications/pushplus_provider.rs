//! PushPlus channel sender.
//!
//! `POST {url}` with JSON body `{token, title, content}`. Retries under the
//! fixed-retry policy and never reports failure to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::json;

use super::channel::Channel;
use super::provider::{ChannelSender, DeliveryOutcome, Message, execute, require};
use super::retry::{RetryPolicy, log_summary, run_with_retry};
use crate::config::PushPlusConfig;
use crate::error::{PushError, PushResult};

pub struct PushPlusProvider {
    client: Client,
    config: PushPlusConfig,
    policy: RetryPolicy,
    timeout: Duration,
}

impl PushPlusProvider {
    pub fn new(client: Client, config: PushPlusConfig, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client,
            config,
            policy,
            timeout,
        }
    }

    fn build_request_body(&self, message: &Message) -> serde_json::Value {
        json!({
            "token": self.config.token,
            "title": message.title.as_deref().unwrap_or(&self.config.default_title),
            "content": message.content,
        })
    }
}

#[async_trait]
impl ChannelSender for PushPlusProvider {
    async fn send(&self, message: &Message) -> PushResult<DeliveryOutcome> {
        self.validate_config()?;
        let body = self.build_request_body(message);

        let attempts = run_with_retry(self.channel(), &self.policy, |_| {
            let request = self
                .client
                .post(&self.config.url)
                .header(CONTENT_TYPE, "application/json")
                .timeout(self.timeout)
                .json(&body);
            execute(request)
        })
        .await;
        log_summary(self.channel(), &attempts);

        Ok(DeliveryOutcome::Completed)
    }

    fn channel(&self) -> Channel {
        Channel::PushPlus
    }

    fn validate_config(&self) -> PushResult<()> {
        require(&self.config.token, self.channel(), "PUSHPLUS_TOKEN")?;
        Url::parse(&self.config.url)
            .map_err(|e| PushError::invalid_endpoint(&self.config.url, e.to_string()))?;
        Ok(())
    }
}
