//! Per-wrapper error handling configuration.
//!
//! A wrapper is configured with an [`ErrorHandling`] value, which is either a
//! bare terminal handler or a full [`WrapperConfig`].
//!
//! # Examples
//!
//! ```rust
//! use errity::config::{ErrorHandling, WrapperConfig};
//! use std::time::Duration;
//!
//! // Shorthand: just a terminal handler
//! let handling = ErrorHandling::handler(|err: String| eprintln!("gave up: {err}"));
//!
//! // Full configuration
//! let config = WrapperConfig::builder()
//!     .on_error(|err: String| eprintln!("gave up: {err}"))
//!     .on_retry_error(|err: &String| eprintln!("retrying after: {err}"))
//!     .retry_count(3)
//!     .retry_delay(Duration::from_millis(100))
//!     .build()
//!     .unwrap();
//! let handling: ErrorHandling<String> = config.into();
//! ```

mod policy;

pub use policy::RetryPolicy;

use crate::error::{ConfigError, Result};
use crate::handler::{ErrorHandler, RetryHandler};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// How a wrapper reports failures.
pub enum ErrorHandling<E> {
    /// A terminal handler with every other setting at its default.
    Handler(ErrorHandler<E>),

    /// A full configuration. Without its own `on_error`, terminal failures go
    /// to the session default handler, if any.
    Config(WrapperConfig<E>),
}

impl<E> ErrorHandling<E> {
    /// Shorthand for a single attempt reported to `on_error`.
    pub fn handler<F>(on_error: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(on_error))
    }

    /// No handler of its own and a single attempt.
    pub fn none() -> Self {
        Self::Config(WrapperConfig::default())
    }

    pub(crate) fn into_config(self) -> WrapperConfig<E> {
        match self {
            Self::Handler(on_error) => WrapperConfig {
                on_error: Some(on_error),
                ..WrapperConfig::default()
            },
            Self::Config(config) => config,
        }
    }
}

impl<E> Default for ErrorHandling<E> {
    fn default() -> Self {
        Self::none()
    }
}

impl<E> From<WrapperConfig<E>> for ErrorHandling<E> {
    fn from(config: WrapperConfig<E>) -> Self {
        Self::Config(config)
    }
}

impl<E> fmt::Debug for ErrorHandling<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Config(config) => f.debug_tuple("Config").field(config).finish(),
        }
    }
}

/// Resolved configuration of one wrapper.
///
/// Immutable once built. Use [`WrapperConfig::builder`] to create one.
pub struct WrapperConfig<E> {
    pub(crate) on_error: Option<ErrorHandler<E>>,
    pub(crate) on_retry_error: Option<RetryHandler<E>>,
    pub(crate) retry_count: u32,
    pub(crate) retry_delay: Duration,
}

impl<E> WrapperConfig<E> {
    /// Create a new builder.
    pub fn builder() -> WrapperConfigBuilder<E> {
        WrapperConfigBuilder::default()
    }

    /// Total number of attempts.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Wait before every attempt after the first.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Whether a terminal handler was configured.
    pub fn has_on_error(&self) -> bool {
        self.on_error.is_some()
    }

    /// Whether a retry handler was configured.
    pub fn has_on_retry_error(&self) -> bool {
        self.on_retry_error.is_some()
    }
}

impl<E> Default for WrapperConfig<E> {
    /// No handlers, a single attempt, no delay.
    fn default() -> Self {
        Self {
            on_error: None,
            on_retry_error: None,
            retry_count: 1,
            retry_delay: Duration::ZERO,
        }
    }
}

impl<E> Clone for WrapperConfig<E> {
    fn clone(&self) -> Self {
        Self {
            on_error: self.on_error.clone(),
            on_retry_error: self.on_retry_error.clone(),
            retry_count: self.retry_count,
            retry_delay: self.retry_delay,
        }
    }
}

impl<E> fmt::Debug for WrapperConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperConfig")
            .field("on_error", &self.on_error.is_some())
            .field("on_retry_error", &self.on_retry_error.is_some())
            .field("retry_count", &self.retry_count)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

/// Builder for [`WrapperConfig`].
pub struct WrapperConfigBuilder<E> {
    on_error: Option<ErrorHandler<E>>,
    on_retry_error: Option<RetryHandler<E>>,
    retry_count: Option<u32>,
    retry_delay: Option<Duration>,
}

impl<E> Default for WrapperConfigBuilder<E> {
    fn default() -> Self {
        Self {
            on_error: None,
            on_retry_error: None,
            retry_count: None,
            retry_delay: None,
        }
    }
}

impl<E> WrapperConfigBuilder<E> {
    /// Handler for the failure of the last permitted attempt.
    ///
    /// Takes precedence over a session default handler.
    pub fn on_error<F>(mut self, on_error: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(on_error));
        self
    }

    /// Handler for every failure that is followed by another attempt.
    pub fn on_retry_error<F>(mut self, on_retry_error: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.on_retry_error = Some(Arc::new(on_retry_error));
        self
    }

    /// Total number of attempts, including the first.
    ///
    /// Default: 1
    pub fn retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = Some(retry_count);
        self
    }

    /// Wait before every attempt after the first.
    ///
    /// Default: no delay
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay);
        self
    }

    /// Take the attempt budget and delay from a loaded [`RetryPolicy`].
    pub fn policy(self, policy: RetryPolicy) -> Self {
        self.retry_count(policy.retry_count)
            .retry_delay(policy.retry_delay())
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryCount`] when the attempt budget is zero.
    pub fn build(self) -> Result<WrapperConfig<E>> {
        let retry_count = self.retry_count.unwrap_or(1);
        if retry_count == 0 {
            return Err(ConfigError::InvalidRetryCount(retry_count));
        }

        Ok(WrapperConfig {
            on_error: self.on_error,
            on_retry_error: self.on_retry_error,
            retry_count,
            retry_delay: self.retry_delay.unwrap_or(Duration::ZERO),
        })
    }
}
