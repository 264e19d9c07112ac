//! Configuration settings structures for push-rs
//!
//! Every structure deserializes from TOML and `PUSH_*` environment variables
//! and falls back to the defaults below for anything left unset.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "push-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/push.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_min_backoff_secs() -> u64 {
    180
}

fn default_max_backoff_secs() -> u64 {
    360
}

fn default_request_timeout() -> u64 {
    10
}

fn default_telegram_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("push-rs/{}", crate::pkg_version())
}

fn default_pushplus_url() -> String {
    "https://www.pushplus.plus/send".to_string()
}

fn default_pushplus_title() -> String {
    "微信阅读推送...".to_string()
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_wxpusher_url() -> String {
    "https://wxpusher.zjiecode.com/api/send/message".to_string()
}

fn default_meow_url() -> String {
    "http://api.chuckfang.com".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Delivery Configuration
// ============================================================================

/// Retry policy for the fixed-retry channels (PushPlus, WxPusher, MeoW)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Lower bound of the randomized backoff, in seconds
    #[serde(default = "default_min_backoff_secs")]
    pub min_backoff_secs: u64,

    /// Upper bound of the randomized backoff, in seconds (inclusive)
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_backoff_secs: default_min_backoff_secs(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout for fixed-retry channels, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Per-request timeout for each Telegram path, in seconds
    #[serde(default = "default_telegram_timeout")]
    pub telegram_timeout: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            telegram_timeout: default_telegram_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Proxy endpoints used by the proxied client.
///
/// Both unset means the proxied client connects directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub http: Option<String>,

    #[serde(default)]
    pub https: Option<String>,
}

impl ProxyConfig {
    pub fn is_configured(&self) -> bool {
        self.http.is_some() || self.https.is_some()
    }
}

// ============================================================================
// Channel Credentials
// ============================================================================

/// PushPlus credentials and endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPlusConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_pushplus_url")]
    pub url: String,

    /// Title sent when the message carries none
    #[serde(default = "default_pushplus_title")]
    pub default_title: String,
}

impl Default for PushPlusConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            url: default_pushplus_url(),
            default_title: default_pushplus_title(),
        }
    }
}

/// Telegram bot credentials and API base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,

    #[serde(default)]
    pub chat_id: String,

    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api_base(),
        }
    }
}

/// WxPusher simple-push token (SPT) and endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxPusherConfig {
    #[serde(default)]
    pub spt: String,

    #[serde(default = "default_wxpusher_url")]
    pub url: String,
}

impl Default for WxPusherConfig {
    fn default() -> Self {
        Self {
            spt: String::new(),
            url: default_wxpusher_url(),
        }
    }
}

/// MeoW token and endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeowConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_meow_url")]
    pub url: String,
}

impl Default for MeowConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            url: default_meow_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub pushplus: PushPlusConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub wxpusher: WxPusherConfig,

    #[serde(default)]
    pub meow: MeowConfig,
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts the file representation into the runtime `LoggerConfig`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let format = self
            .file
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })?;
        let file = FileConfig::new(
            self.file.enabled,
            PathBuf::from(self.file.path),
            self.file.append,
            format,
        );

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete process settings, loaded once and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub channels: ChannelsConfig,
}
