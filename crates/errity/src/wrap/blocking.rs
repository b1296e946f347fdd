//! Synchronous execution strategy.

use super::Hooks;
use super::engine::Policy;
use crate::config::WrapperConfig;
use crate::target::Target;
use crate::timing;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A synchronous function wrapped with retry and error routing.
///
/// Created by [`wrap`](super::wrap) or [`Session::wrap`](crate::session::Session::wrap).
/// Cloning is cheap and clones share the target.
pub struct Wrapper<Tg, A>
where
    Tg: Target<A>,
{
    target: Arc<Tg>,
    policy: Arc<Policy<Tg::Error>>,
    _args: PhantomData<fn(A)>,
}

impl<Tg, A> Wrapper<Tg, A>
where
    Tg: Target<A>,
    A: Clone,
{
    pub(crate) fn new(
        target: Tg,
        config: WrapperConfig<Tg::Error>,
        session: Option<Hooks<Tg::Error>>,
    ) -> Self {
        debug!(
            retry_count = config.retry_count,
            retry_delay_ms = config.retry_delay.as_millis() as u64,
            session = session.is_some(),
            "wrapping synchronous target"
        );

        Self {
            target: Arc::new(target),
            policy: Arc::new(Policy::new(config, session)),
            _args: PhantomData,
        }
    }

    /// Call the target, retrying on failure.
    ///
    /// Returns the target's value unchanged on success, or `None` once the
    /// last attempt has failed and its failure has been handled.
    pub fn call(&self, args: A) -> Option<Tg::Output> {
        for attempt in self.policy.attempts() {
            if let Some(delay) = self.policy.delay_before(attempt) {
                timing::block_for(delay);
            }

            match self.target.invoke(args.clone()) {
                Ok(value) => return Some(value),
                Err(error) => self.policy.fail(attempt, error),
            }
        }
        None
    }

    /// Total number of attempts per call.
    pub fn retry_count(&self) -> u32 {
        self.policy.retry_count()
    }

    /// Wait before every attempt after the first.
    pub fn retry_delay(&self) -> Duration {
        self.policy.retry_delay()
    }
}

impl<Tg, A> Clone for Wrapper<Tg, A>
where
    Tg: Target<A>,
{
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            policy: Arc::clone(&self.policy),
            _args: PhantomData,
        }
    }
}

impl<Tg, A> fmt::Debug for Wrapper<Tg, A>
where
    Tg: Target<A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("retry_count", &self.policy.retry_count())
            .field("retry_delay", &self.policy.retry_delay())
            .finish_non_exhaustive()
    }
}
