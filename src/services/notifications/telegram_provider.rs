//! Telegram Bot API sender.
//!
//! Tries the proxied client once, then the direct client once, and reports
//! whether either path got a 2xx from `sendMessage`. No sleeping, no further
//! retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::json;

use super::channel::Channel;
use super::provider::{ChannelSender, DeliveryOutcome, Message, execute, require};
use crate::config::TelegramConfig;
use crate::error::{PushError, PushResult};

/// Path a request is routed through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Proxied,
    Direct,
}

impl Route {
    fn as_str(&self) -> &'static str {
        match self {
            Route::Proxied => "proxied",
            Route::Direct => "direct",
        }
    }
}

pub struct TelegramProvider {
    proxied: Client,
    direct: Client,
    config: TelegramConfig,
    timeout: Duration,
}

impl TelegramProvider {
    pub fn new(proxied: Client, direct: Client, config: TelegramConfig, timeout: Duration) -> Self {
        Self {
            proxied,
            direct,
            config,
            timeout,
        }
    }

    fn api_url(&self) -> PushResult<Url> {
        let raw = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        );
        Url::parse(&raw).map_err(|e| PushError::invalid_endpoint(&self.config.api_base, e.to_string()))
    }

    /// Delivers `text` via the proxied path, falling back to the direct path
    pub async fn attempt_send(&self, text: &str) -> PushResult<bool> {
        self.validate_config()?;
        let url = self.api_url()?;
        let payload = json!({
            "chat_id": self.config.chat_id,
            "text": text,
        });

        for route in [Route::Proxied, Route::Direct] {
            let client = match route {
                Route::Proxied => &self.proxied,
                Route::Direct => &self.direct,
            };
            let request = client.post(url.clone()).timeout(self.timeout).json(&payload);

            match execute(request).await {
                Ok(response) => {
                    tracing::info!(route = route.as_str(), %response, "Telegram message delivered");
                    return Ok(true);
                }
                Err(e) => {
                    tracing::error!(route = route.as_str(), error = %e, "Telegram send failed");
                }
            }
        }

        Ok(false)
    }
}

#[async_trait]
impl ChannelSender for TelegramProvider {
    async fn send(&self, message: &Message) -> PushResult<DeliveryOutcome> {
        self.attempt_send(&message.content)
            .await
            .map(DeliveryOutcome::Delivered)
    }

    fn channel(&self) -> Channel {
        Channel::Telegram
    }

    fn validate_config(&self) -> PushResult<()> {
        require(&self.config.bot_token, self.channel(), "TELEGRAM_BOT_TOKEN")?;
        require(&self.config.chat_id, self.channel(), "TELEGRAM_CHAT_ID")?;
        self.api_url().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Proxy;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: String) -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            api_base,
        }
    }

    fn provider_without_proxy(api_base: String) -> TelegramProvider {
        TelegramProvider::new(
            Client::builder().no_proxy().build().unwrap(),
            Client::builder().no_proxy().build().unwrap(),
            config(api_base),
            Duration::from_secs(30),
        )
    }

    #[test]
    fn test_api_url() {
        let p = provider_without_proxy("https://api.telegram.org/".to_string());
        assert_eq!(
            p.api_url().unwrap().as_str(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_validate_requires_chat_id() {
        let mut cfg = config("https://api.telegram.org".to_string());
        cfg.chat_id.clear();
        let p = TelegramProvider::new(Client::new(), Client::new(), cfg, Duration::from_secs(30));
        assert!(matches!(
            p.validate_config(),
            Err(PushError::MissingCredential { key: "TELEGRAM_CHAT_ID", .. })
        ));
    }

    #[tokio::test]
    async fn test_first_path_success_sends_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(json!({"chat_id": "42", "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let p = provider_without_proxy(server.uri());
        assert!(p.attempt_send("hello").await.unwrap());
    }

    #[tokio::test]
    async fn test_proxy_failure_falls_back_to_direct() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&proxy)
            .await;

        let api = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&api)
            .await;

        let proxied = Client::builder()
            .proxy(Proxy::http(proxy.uri().as_str()).unwrap())
            .build()
            .unwrap();
        let direct = Client::builder().no_proxy().build().unwrap();
        let p = TelegramProvider::new(proxied, direct, config(api.uri()), Duration::from_secs(30));

        assert!(p.attempt_send("hello").await.unwrap());
        assert_eq!(proxy.received_requests().await.unwrap().len(), 1);
        assert_eq!(api.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_both_paths_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let p = provider_without_proxy(server.uri());
        assert!(!p.attempt_send("hello").await.unwrap());
    }

    #[tokio::test]
    async fn test_send_reports_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let p = provider_without_proxy(server.uri());
        let outcome = p.send(&Message::new("hi").with_title("ignored")).await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::Delivered(true));
    }
}
