//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Environment;

/// Send a notification through PushPlus, Telegram, WxPusher or MeoW
#[derive(Parser, Debug)]
#[command(name = "push-rs")]
#[command(about = "Send a notification through PushPlus, Telegram, WxPusher or MeoW")]
#[command(long_about = "
push-rs delivers one text message to one push provider per invocation.

PushPlus, WxPusher and MeoW are best-effort: failed requests are retried up to
5 times with a 3-6 minute randomized pause, and the command exits 0 either way.
Telegram tries the configured proxy, then a direct connection, and exits 1 if
both fail.

Credentials come from config/*.toml, PUSH_* variables, or the conventional
PUSHPLUS_TOKEN, TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID, WXPUSHER_SPT and
MEOW_TOKEN variables. http_proxy / https_proxy select the proxy.

EXAMPLES:
    # Send via Telegram
    push-rs send --method telegram \"Backup finished\"

    # Send via MeoW with a title and link
    push-rs send -m meow --title CI --link https://ci.example.com/42 \"Build passed\"

    # Show which channels are configured
    push-rs check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Loads this TOML file instead of the layered config directory.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (selects `{env}.toml`)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message
    ///
    /// Examples:
    ///   push-rs send -m pushplus "Daily report ready"
    ///   push-rs send -m wxpusher "Disk usage above 90%"
    Send {
        /// Channel: pushplus, telegram, wxpusher or meow
        #[arg(short, long, value_name = "METHOD")]
        method: String,

        /// Title (PushPlus, MeoW)
        #[arg(long)]
        title: Option<String>,

        /// Link attached to the message (MeoW)
        #[arg(long, value_name = "URL", value_parser = super::validation::validate_link)]
        link: Option<String>,

        /// Message content
        #[arg(value_name = "CONTENT", value_parser = super::validation::validate_content)]
        content: String,

        /// Log level override for this send
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },

    /// Validate configuration and report configured channels
    Check,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}
