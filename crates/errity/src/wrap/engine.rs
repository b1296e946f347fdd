//! Failure routing shared by both execution strategies.

use super::Hooks;
use crate::config::WrapperConfig;
use crate::handler::{ErrorHandler, RetryHandler};
use crate::timing;
use std::ops::Range;
use std::time::Duration;
use tracing::{debug, trace};

/// Configuration of one wrapper, bound to its session (if any).
pub(crate) struct Policy<E> {
    on_error: Option<ErrorHandler<E>>,
    on_retry_error: Option<RetryHandler<E>>,
    retry_count: u32,
    retry_delay: Duration,
    session: Option<Hooks<E>>,
}

impl<E> Policy<E> {
    pub(crate) fn new(config: WrapperConfig<E>, session: Option<Hooks<E>>) -> Self {
        Self {
            on_error: config.on_error,
            on_retry_error: config.on_retry_error,
            retry_count: config.retry_count.max(1),
            retry_delay: config.retry_delay,
            session,
        }
    }

    pub(crate) fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub(crate) fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Attempt indices, 0-indexed.
    pub(crate) fn attempts(&self) -> Range<u32> {
        0..self.retry_count
    }

    pub(crate) fn delay_before(&self, attempt: u32) -> Option<Duration> {
        timing::delay_before(attempt, self.retry_delay)
    }

    /// Route the failure of `attempt`.
    ///
    /// Every failure is logged first. The last attempt goes to the terminal
    /// handler, earlier ones to `on_retry_error`.
    pub(crate) fn fail(&self, attempt: u32, error: E) {
        debug!(
            attempt = attempt + 1,
            retry_count = self.retry_count,
            "wrapped call failed"
        );

        if let Some(session) = &self.session {
            session.record(&error);
        }

        if attempt + 1 < self.retry_count {
            if let Some(on_retry_error) = &self.on_retry_error {
                on_retry_error(&error);
            }
            return;
        }

        match self.terminal_handler() {
            Some(on_error) => on_error(error),
            None => trace!("no error handler resolved, discarding failure"),
        }
    }

    // on_error > session default > none
    fn terminal_handler(&self) -> Option<&ErrorHandler<E>> {
        self.on_error
            .as_ref()
            .or_else(|| self.session.as_ref()?.default_error_cb())
    }
}
