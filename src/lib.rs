//! push-rs library
//!
//! Unified notification dispatch to PushPlus, Telegram, WxPusher and MeoW.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub use error::{PushError, PushResult};
pub use services::notifications::{Channel, Message, NotificationDispatcher, push};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
