//! Backoff policy
//!
//! `delay = min(base_delay_ms * backoff_factor^(attempt - 1), max_delay_ms)`
//! where `attempt` is the number of the attempt that just failed. No jitter:
//! the delay sequence is non-decreasing and never exceeds the ceiling.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration for one call-site category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_factor: f64,
}

/// Rejected policy values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    NoAttempts,

    #[error("base_delay_ms must be greater than 0")]
    ZeroBaseDelay,

    #[error("max_delay_ms ({max_delay_ms}) must not be below base_delay_ms ({base_delay_ms})")]
    CeilingBelowBase { base_delay_ms: u64, max_delay_ms: u64 },

    #[error("backoff_factor must be greater than 1, got {0}")]
    FactorTooSmall(f64),
}

impl RetryPolicy {
    /// Policy for user-initiated calls: 3 attempts, 1s doubling, 30s cap.
    pub const fn interactive() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            backoff_factor: 2.0,
        }
    }

    /// Gentler policy for background polling: 5 attempts, 2s growing by
    /// 1.5x, 60s cap.
    pub const fn polling() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 2_000,
            max_delay_ms: 60_000,
            backoff_factor: 1.5,
        }
    }

    pub fn new(
        max_attempts: u32,
        base_delay_ms: u64,
        max_delay_ms: u64,
        backoff_factor: f64,
    ) -> Result<Self, PolicyError> {
        let policy = Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
            backoff_factor,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_attempts == 0 {
            return Err(PolicyError::NoAttempts);
        }
        if self.base_delay_ms == 0 {
            return Err(PolicyError::ZeroBaseDelay);
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(PolicyError::CeilingBelowBase {
                base_delay_ms: self.base_delay_ms,
                max_delay_ms: self.max_delay_ms,
            });
        }
        // Written this way so NaN is rejected too.
        if !(self.backoff_factor > 1.0) {
            return Err(PolicyError::FactorTooSmall(self.backoff_factor));
        }
        Ok(())
    }

    /// Wait before the attempt following `attempt`. Attempt 0 is treated as 1.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let raw = self.base_delay_ms as f64 * self.backoff_factor.powi(exponent);
        // `as` saturates for out-of-range floats, so huge exponents land on the cap.
        let capped = raw.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Free-function form of [`RetryPolicy::delay_for_attempt`].
pub fn delay_for_attempt(attempt: u32, policy: &RetryPolicy) -> Duration {
    policy.delay_for_attempt(attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_millis).collect()
    }

    #[test]
    fn interactive_sequence_doubles() {
        let policy = RetryPolicy::interactive();
        let delays: Vec<Duration> = (1..=6).map(|n| delay_for_attempt(n, &policy)).collect();
        assert_eq!(delays, ms(&[1_000, 2_000, 4_000, 8_000, 16_000, 30_000]));
    }

    #[test]
    fn polling_sequence_grows_by_half() {
        let policy = RetryPolicy::polling();
        let delays: Vec<Duration> = (1..=4).map(|n| policy.delay_for_attempt(n)).collect();
        assert_eq!(delays, ms(&[2_000, 3_000, 4_500, 6_750]));
    }

    #[test]
    fn attempt_zero_uses_base_delay() {
        let policy = RetryPolicy::interactive();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(1_000));
    }

    #[test]
    fn delays_are_monotonic_and_capped() {
        let policies = [
            RetryPolicy::interactive(),
            RetryPolicy::polling(),
            RetryPolicy {
                max_attempts: 50,
                base_delay_ms: 7,
                max_delay_ms: 7,
                backoff_factor: 1.01,
            },
            RetryPolicy {
                max_attempts: 50,
                base_delay_ms: 1,
                max_delay_ms: u64::MAX,
                backoff_factor: 10.0,
            },
        ];
        for policy in policies {
            let cap = Duration::from_millis(policy.max_delay_ms);
            let mut previous = Duration::ZERO;
            for attempt in 1..=200 {
                let delay = policy.delay_for_attempt(attempt);
                assert!(delay <= cap, "{policy:?} attempt {attempt}: {delay:?} > {cap:?}");
                assert!(
                    delay >= previous,
                    "{policy:?} attempt {attempt}: {delay:?} < {previous:?}"
                );
                previous = delay;
            }
        }
    }

    #[test]
    fn huge_attempt_numbers_saturate() {
        let policy = RetryPolicy::interactive();
        assert_eq!(
            policy.delay_for_attempt(u32::MAX),
            Duration::from_millis(30_000)
        );
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert_eq!(RetryPolicy::new(0, 1, 1, 2.0), Err(PolicyError::NoAttempts));
        assert_eq!(RetryPolicy::new(1, 0, 1, 2.0), Err(PolicyError::ZeroBaseDelay));
        assert_eq!(
            RetryPolicy::new(1, 10, 5, 2.0),
            Err(PolicyError::CeilingBelowBase {
                base_delay_ms: 10,
                max_delay_ms: 5
            })
        );
        assert_eq!(RetryPolicy::new(1, 1, 1, 1.0), Err(PolicyError::FactorTooSmall(1.0)));
        assert!(RetryPolicy::new(1, 1, 1, f64::NAN).is_err());
        assert!(RetryPolicy::new(3, 1_000, 30_000, 2.0).is_ok());
    }

    #[test]
    fn builtin_policies_are_valid() {
        assert!(RetryPolicy::interactive().validate().is_ok());
        assert!(RetryPolicy::polling().validate().is_ok());
    }
}
