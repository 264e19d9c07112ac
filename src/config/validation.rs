//! Configuration validation logic
//!
//! Credentials are deliberately not checked here: only the channel selected
//! for a send needs its credential, and that check happens in the sender.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    ChannelsConfig, FileSettings, HttpConfig, LoggerSettings, ProxyConfig, RetryConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

impl RetryConfig {
    /// # Validation Rules
    /// - At least one attempt
    /// - Minimum backoff must not exceed maximum backoff
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::validation(
                "retry.max_attempts",
                "At least one delivery attempt is required.",
            ));
        }

        if self.min_backoff_secs > self.max_backoff_secs {
            return Err(ConfigError::ValidationError {
                field: "retry.min_backoff_secs".to_string(),
                message: format!(
                    "Minimum backoff ({}s) cannot exceed maximum backoff ({}s).",
                    self.min_backoff_secs, self.max_backoff_secs
                ),
            });
        }

        Ok(())
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "http.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.telegram_timeout == 0 {
            return Err(ConfigError::validation(
                "http.telegram_timeout",
                "Telegram timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "http.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl ProxyConfig {
    /// Proxy URLs, when present, must parse and use a supported scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_proxy_url("proxy.http", self.http.as_deref())?;
        validate_proxy_url("proxy.https", self.https.as_deref())
    }
}

fn validate_proxy_url(field: &str, value: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = value else {
        return Ok(());
    };

    // A bare `host:port` is taken as an http proxy, matching reqwest's `Proxy`
    let url = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{raw}"))
    };
    let url = url.map_err(|e| ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Invalid proxy URL '{}': {}", raw, e),
    })?;

    if !VALID_PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!(
                "Unsupported proxy scheme '{}'. Valid schemes are: {}",
                url.scheme(),
                VALID_PROXY_SCHEMES.join(", ")
            ),
        });
    }

    Ok(())
}

impl ChannelsConfig {
    /// Every channel endpoint must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("channels.pushplus.url", &self.pushplus.url)?;
        validate_endpoint("channels.telegram.api_base", &self.telegram.api_base)?;
        validate_endpoint("channels.wxpusher.url", &self.wxpusher.url)?;
        validate_endpoint("channels.meow.url", &self.meow.url)
    }
}

fn validate_endpoint(field: &str, raw: &str) -> Result<(), ConfigError> {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(url) => Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("Endpoint must use http or https, got '{}'", url.scheme()),
        }),
        Err(e) => Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("Invalid endpoint URL '{}': {}", raw, e),
        }),
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validates all sub-configurations, returning the first error found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retry.validate()?;
        self.http.validate()?;
        self.proxy.validate()?;
        self.channels.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
