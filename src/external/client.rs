use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};

use crate::config::{HttpConfig, ProxyConfig};
use crate::error::{PushError, PushResult};

/// The pair of HTTP clients a dispatcher hands to its senders.
///
/// - `direct` never uses a proxy, including system proxy variables.
/// - `proxied` routes through `ProxyConfig`; when no proxy is configured it
///   behaves exactly like `direct`.
///
/// Request timeouts are applied per request by the senders, so both clients
/// only carry the connect timeout and user agent.
///
/// # Example
/// ```ignore
/// let clients = HttpClients::new(&settings.http, &settings.proxy)?;
/// let response = clients
///     .proxied
///     .post(url)
///     .timeout(Duration::from_secs(30))
///     .json(&payload)
///     .send()
///     .await;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClients {
    pub direct: Client,
    pub proxied: Client,
}

impl HttpClients {
    pub fn new(http: &HttpConfig, proxy: &ProxyConfig) -> PushResult<Self> {
        let direct = base_builder(http)
            .no_proxy()
            .build()
            .map_err(|source| PushError::Client { source })?;

        let proxied = with_proxies(base_builder(http), proxy)?
            .build()
            .map_err(|source| PushError::Client { source })?;

        Ok(Self { direct, proxied })
    }
}

fn base_builder(http: &HttpConfig) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(http.connect_timeout))
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(http.user_agent.as_str())
}

fn with_proxies(builder: ClientBuilder, proxy: &ProxyConfig) -> PushResult<ClientBuilder> {
    if !proxy.is_configured() {
        return Ok(builder.no_proxy());
    }

    let mut builder = builder;
    if let Some(ref url) = proxy.http {
        let http_proxy = Proxy::http(url).map_err(|source| PushError::Client { source })?;
        builder = builder.proxy(http_proxy);
    }
    if let Some(ref url) = proxy.https {
        let https_proxy = Proxy::https(url).map_err(|source| PushError::Client { source })?;
        builder = builder.proxy(https_proxy);
    }

    Ok(builder)
}
