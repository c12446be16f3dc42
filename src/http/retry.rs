//! Retry timing for session initialization.
//!
//! Delays are drawn uniformly from a fixed range on every retry; there is no
//! exponential growth. Attempt 0 never waits.

use rand::Rng;
use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first (default: 3).
    pub max_attempts: usize,
    /// Lower bound of the random delay before a retry (default: 1s).
    pub min_delay: Duration,
    /// Upper bound of the random delay before a retry (default: 5s).
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Whether attempt number `attempt` (0-based) is within budget.
    pub fn should_attempt(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }
}

/// Delay to wait before attempt number `attempt` (0-based).
///
/// A reversed range is treated as its bounds swapped.
pub fn backoff_delay(attempt: usize, policy: &RetryPolicy) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let (lo, hi) = if policy.min_delay <= policy.max_delay {
        (policy.min_delay, policy.max_delay)
    } else {
        (policy.max_delay, policy.min_delay)
    };

    if lo == hi {
        return lo;
    }

    let millis = rand::thread_rng().gen_range(lo.as_millis()..=hi.as_millis());
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}
