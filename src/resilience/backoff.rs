//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Attempt budget plus the delay curve between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub base: Duration,
    pub max: Duration,
}

impl BackoffPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base: Duration::from_millis(config.base_delay_ms),
            max: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Delay to wait after the `attempt`-th failure (1-based).
    ///
    /// `base * 2^(attempt-1)` capped at `max`, plus up to 10% jitter.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_ms = self.base.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        let factor = 2u64.saturating_pow(attempt - 1);
        let capped = base_ms.saturating_mul(factor).min(max_ms);

        let jitter_range = capped / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped + jitter)
    }
}
