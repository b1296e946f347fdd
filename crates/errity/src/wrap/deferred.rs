//! Asynchronous execution strategy.

use super::Hooks;
use super::engine::Policy;
use crate::config::WrapperConfig;
use crate::target::AsyncTarget;
use crate::timing;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// An asynchronous function wrapped with retry and error routing.
///
/// Created by [`wrap_async`](super::wrap_async) or
/// [`Session::wrap_async`](crate::session::Session::wrap_async). Any number of
/// calls may be in flight at once; each keeps its own attempt counter.
pub struct AsyncWrapper<Tg, A>
where
    Tg: AsyncTarget<A>,
{
    target: Arc<Tg>,
    policy: Arc<Policy<Tg::Error>>,
    _args: PhantomData<fn(A)>,
}

impl<Tg, A> AsyncWrapper<Tg, A>
where
    Tg: AsyncTarget<A>,
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
            "wrapping asynchronous target"
        );

        Self {
            target: Arc::new(target),
            policy: Arc::new(Policy::new(config, session)),
            _args: PhantomData,
        }
    }

    /// Call the target, retrying on failure.
    ///
    /// Resolves to the target's value on success, or `None` once the last
    /// attempt has failed and its failure has been handled. A panicking
    /// handler panics this future.
    pub async fn call(&self, args: A) -> Option<Tg::Output> {
        for attempt in self.policy.attempts() {
            if let Some(delay) = self.policy.delay_before(attempt) {
                timing::pause_for(delay).await;
            }

            match self.target.invoke(args.clone()).await {
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

impl<Tg, A> Clone for AsyncWrapper<Tg, A>
where
    Tg: AsyncTarget<A>,
{
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            policy: Arc::clone(&self.policy),
            _args: PhantomData,
        }
    }
}

impl<Tg, A> fmt::Debug for AsyncWrapper<Tg, A>
where
    Tg: AsyncTarget<A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncWrapper")
            .field("retry_count", &self.policy.retry_count())
            .field("retry_delay", &self.policy.retry_delay())
            .finish_non_exhaustive()
    }
}
