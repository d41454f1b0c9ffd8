use std::time::Duration;

use crate::Error;

/// Internal decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry policy shared by every call the client makes.
///
/// Deliberately deterministic: the delay before the retry that follows
/// attempt `n` is `base * 2^(n-1)`, capped at the ceiling. No jitter, no
/// adaptive behavior, so failure timelines stay explainable.
#[derive(Debug, Clone)]
pub(crate) struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
    pub ceiling: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration, ceiling: Duration) -> Self {
        Self {
            max_attempts,
            base,
            ceiling,
        }
    }

    /// Backoff scheduled after 1-based attempt `attempt` failed.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u64::MAX);
        let base_ms = self.base.as_millis() as u64;
        let ceiling_ms = self.ceiling.as_millis() as u64;
        Duration::from_millis(base_ms.saturating_mul(factor).min(ceiling_ms))
    }

    /// Decide what happens after attempt `attempt` failed with `err`.
    /// 4xx and decode failures are terminal regardless of remaining attempts.
    pub fn decide(&self, err: &Error, attempt: u32) -> Decision {
        if err.is_retryable() && attempt < self.max_attempts {
            Decision::Retry {
                delay: self.backoff_delay(attempt),
            }
        } else {
            Decision::Fail
        }
    }
}
