use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PushError;

/// The supported push providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    PushPlus,
    Telegram,
    WxPusher,
    Meow,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::PushPlus,
        Channel::Telegram,
        Channel::WxPusher,
        Channel::Meow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::PushPlus => "pushplus",
            Channel::Telegram => "telegram",
            Channel::WxPusher => "wxpusher",
            Channel::Meow => "meow",
        }
    }
}

impl FromStr for Channel {
    type Err = PushError;

    /// Identifiers are matched exactly; `"Telegram"` is not a channel
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| PushError::invalid_channel(s))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_identifiers() {
        assert_eq!("pushplus".parse::<Channel>().unwrap(), Channel::PushPlus);
        assert_eq!("telegram".parse::<Channel>().unwrap(), Channel::Telegram);
        assert_eq!("wxpusher".parse::<Channel>().unwrap(), Channel::WxPusher);
        assert_eq!("meow".parse::<Channel>().unwrap(), Channel::Meow);
    }

    #[test]
    fn test_near_misses_rejected() {
        for value in ["", "Telegram", " meow", "push plus", "wx-pusher", "email"] {
            let err = value.parse::<Channel>().unwrap_err();
            assert!(matches!(err, PushError::InvalidChannel { value: v } if v == value));
        }
    }

    proptest! {
        #[test]
        fn prop_unknown_strings_are_invalid(value in "\\PC{0,16}") {
            prop_assume!(Channel::ALL.iter().all(|c| c.as_str() != value));
            prop_assert!(
                matches!(value.parse::<Channel>(), Err(PushError::InvalidChannel { .. })),
                "expected InvalidChannel for {:?}",
                value
            );
        }
    }
}
