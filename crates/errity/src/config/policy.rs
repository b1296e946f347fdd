//! Serializable retry policy.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The data-only part of a [`WrapperConfig`](super::WrapperConfig).
///
/// Handlers cannot be serialized, so this carries just the attempt budget and
/// the delay. Load it from any serde format and feed it to
/// [`WrapperConfigBuilder::policy`](super::WrapperConfigBuilder::policy).
///
/// # Examples
///
/// ```rust
/// use errity::config::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::from_json_str(r#"{ "retry_count": 3, "retry_delay_ms": 250 }"#).unwrap();
/// assert_eq!(policy.retry_count, 3);
/// assert_eq!(policy.retry_delay(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Must be at least 1.
    pub retry_count: u32,

    /// Wait before every attempt after the first, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for RetryPolicy {
    /// A single attempt with no delay.
    fn default() -> Self {
        Self {
            retry_count: 1,
            retry_delay_ms: 0,
        }
    }
}

impl RetryPolicy {
    /// Create a policy from an attempt budget and a delay.
    ///
    /// Delays are kept at millisecond precision.
    pub fn new(retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay_ms: u64::try_from(retry_delay.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// The delay between attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Check that the policy allows at least one attempt.
    pub fn validate(&self) -> Result<()> {
        if self.retry_count == 0 {
            return Err(ConfigError::InvalidRetryCount(self.retry_count));
        }
        Ok(())
    }

    /// Parse and validate a policy from JSON.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }
}
