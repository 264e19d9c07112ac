//! Notification dispatch with per-channel delivery policies.
//!
//! The `ChannelSender` trait is the shared send contract. PushPlus, WxPusher
//! and MeoW wrap their request in the fixed-retry loop from [`retry`];
//! Telegram tries a proxied and then a direct request.

mod channel;
mod dispatcher;
mod meow_provider;
mod provider;
mod pushplus_provider;
mod telegram_provider;
mod wxpusher_provider;

pub mod retry;

pub use channel::Channel;
pub use dispatcher::{NotificationDispatcher, push};
pub use meow_provider::MeowProvider;
pub use provider::{ChannelSender, DeliveryOutcome, Message};
pub use pushplus_provider::PushPlusProvider;
pub use retry::{DeliveryAttempt, RetryPolicy};
pub use telegram_provider::TelegramProvider;
pub use wxpusher_provider::WxPusherProvider;
