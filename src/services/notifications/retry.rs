//! Fixed-attempt retry loop with randomized backoff.
//!
//! Used by the best-effort channels (PushPlus, WxPusher, MeoW). The loop stops
//! at the first 2xx response and otherwise sleeps a random delay between
//! attempts. Exhaustion is logged, never returned as an error.

use std::future::Future;
use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;
use crate::error::{PushError, PushResult};

use super::channel::Channel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_secs: RangeInclusive<u64>,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// `max_attempts` is clamped to at least one; an inverted range is reordered
    pub fn new(max_attempts: u32, min_backoff_secs: u64, max_backoff_secs: u64) -> Self {
        let (lo, hi) = if min_backoff_secs <= max_backoff_secs {
            (min_backoff_secs, max_backoff_secs)
        } else {
            (max_backoff_secs, min_backoff_secs)
        };
        Self {
            max_attempts: max_attempts.max(1),
            backoff_secs: lo..=hi,
        }
    }

    /// Same attempt budget, no waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, 0, 0)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_secs(&self) -> &RangeInclusive<u64> {
        &self.backoff_secs
    }

    /// Draws the next backoff uniformly from the configured range
    pub fn next_delay(&self) -> Duration {
        let (lo, hi) = (*self.backoff_secs.start(), *self.backoff_secs.end());
        if lo == hi {
            return Duration::from_secs(lo);
        }
        Duration::from_secs(rand::rng().random_range(lo..=hi))
    }
}

impl Default for RetryPolicy {
    /// 5 attempts, 3 to 6 minutes apart
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, 180, 360)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.min_backoff_secs,
            config.max_backoff_secs,
        )
    }
}

/// Outcome of a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed { status: Option<u16>, error: String },
}

/// Record of one attempt, kept only for the duration of a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub attempt: u32,
    pub outcome: AttemptOutcome,
}

impl DeliveryAttempt {
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Succeeded
    }
}

/// Runs `attempt_fn` until it succeeds or the policy's attempts are used up.
///
/// `attempt_fn` receives the 1-based attempt number and must issue exactly one
/// request per call.
pub async fn run_with_retry<F, Fut>(
    channel: Channel,
    policy: &RetryPolicy,
    mut attempt_fn: F,
) -> Vec<DeliveryAttempt>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = PushResult<String>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempts = Vec::with_capacity(max_attempts as usize);

    for attempt in 1..=max_attempts {
        match attempt_fn(attempt).await {
            Ok(response) => {
                tracing::info!(%channel, attempt, %response, "Notification delivered");
                attempts.push(DeliveryAttempt {
                    attempt,
                    outcome: AttemptOutcome::Succeeded,
                });
                break;
            }
            Err(e) => {
                tracing::error!(%channel, attempt, max_attempts, error = %e, "Notification attempt failed");
                let status = match &e {
                    PushError::Transport { status, .. } => *status,
                    _ => None,
                };
                attempts.push(DeliveryAttempt {
                    attempt,
                    outcome: AttemptOutcome::Failed {
                        status,
                        error: e.to_string(),
                    },
                });

                if attempt < max_attempts {
                    let delay = policy.next_delay();
                    tracing::info!(%channel, delay_secs = delay.as_secs(), "Retrying after backoff");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                } else {
                    tracing::warn!(%channel, attempts = attempt, "Giving up after exhausting all attempts");
                }
            }
        }
    }

    attempts
}

/// Whether the last recorded attempt succeeded
pub fn delivered(attempts: &[DeliveryAttempt]) -> bool {
    attempts.last().is_some_and(DeliveryAttempt::is_success)
}

/// Logs how a retry loop ended
pub fn log_summary(channel: Channel, attempts: &[DeliveryAttempt]) {
    tracing::debug!(
        %channel,
        attempts = attempts.len(),
        delivered = delivered(attempts),
        "Delivery finished"
    );
}
