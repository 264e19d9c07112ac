//! Settings for push-rs
//!
//! Settings are assembled once at process start and passed by reference to
//! the dispatcher. Sources, lowest priority first:
//! 1. `default.toml` in the configuration directory
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `PUSH_*` environment variables (`__` separates nested keys)
//! 5. Bare credential variables (`PUSHPLUS_TOKEN`, `TELEGRAM_BOT_TOKEN`, ...)
//!    and the proxy variables `http_proxy` / `https_proxy`

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ChannelsConfig, HttpConfig, MeowConfig, ProxyConfig, PushPlusConfig, RetryConfig, Settings,
    TelegramConfig, WxPusherConfig,
};
