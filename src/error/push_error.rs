use thiserror::Error;

/// Error type for the notification dispatcher and its channel senders.
///
/// Only the configuration-class variants (`InvalidChannel`, `MissingCredential`,
/// `InvalidEndpoint`, `Client`) ever reach the caller of the
/// dispatcher. `Transport` describes a single failed attempt and is absorbed by
/// the retry loop or the Telegram fallback path.
#[derive(Error, Debug)]
pub enum PushError {
    /// Method string does not name one of the supported channels
    #[error("Invalid notification channel '{value}', expected one of: pushplus, telegram, wxpusher, meow")]
    InvalidChannel { value: String },

    /// Channel credential is absent from settings
    #[error("Missing credential for {channel}: {key} is not configured")]
    MissingCredential {
        channel: &'static str,
        key: &'static str,
    },

    /// Configured base URL cannot be used to build a request
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Failure of one outbound request (network, timeout or non-2xx status)
    #[error("Transport failure: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client error")]
    Client {
        #[source]
        source: reqwest::Error,
    },
}

impl PushError {
    pub fn invalid_channel(value: impl Into<String>) -> Self {
        Self::InvalidChannel {
            value: value.into(),
        }
    }

    pub fn invalid_endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a reqwest send error as a single-attempt transport failure
    pub fn transport(error: reqwest::Error) -> Self {
        Self::Transport {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

/// Type alias for Result with PushError to simplify function signatures
pub type PushResult<T> = Result<T, PushError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_channel_message_lists_channels() {
        let err = PushError::invalid_channel("email");
        let text = err.to_string();
        assert!(text.contains("'email'"));
        for name in ["pushplus", "telegram", "wxpusher", "meow"] {
            assert!(text.contains(name));
        }
    }

    #[test]
    fn test_missing_credential_display() {
        let err = PushError::MissingCredential {
            channel: "telegram",
            key: "TELEGRAM_BOT_TOKEN",
        };
        assert_eq!(
            err.to_string(),
            "Missing credential for telegram: TELEGRAM_BOT_TOKEN is not configured"
        );
    }
}
