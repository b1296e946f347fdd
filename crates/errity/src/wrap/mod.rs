//! Wrapping functions with retry and error routing.
//!
//! [`wrap`] and [`wrap_async`] produce wrappers with no session: terminal
//! failures without an `on_error` are discarded and nothing is logged. Use
//! [`Session::wrap`](crate::session::Session::wrap) for fallback handling and
//! a shared log.
//!
//! # Retry protocol
//!
//! For attempt `i` in `0..retry_count`:
//!
//! 1. If `i > 0` and `retry_delay` is non-zero, wait `retry_delay`.
//! 2. Invoke the target with a clone of the original arguments.
//! 3. On success, return the value. No handler runs.
//! 4. On failure, append the payload to the session log (if any). If `i` is the
//!    last attempt, hand it to the terminal handler and return `None`;
//!    otherwise hand it to `on_retry_error` and continue.

mod blocking;
mod deferred;
mod engine;

pub use blocking::Wrapper;
pub use deferred::AsyncWrapper;

use crate::config::ErrorHandling;
use crate::session::SessionHooks;
use crate::target::{AsyncTarget, Target};
use std::sync::Arc;

/// Read-only handle from a wrapper to the session that created it.
pub(crate) type Hooks<E> = Arc<dyn SessionHooks<E>>;

/// Wrap a synchronous target.
///
/// Waits between attempts block the calling thread.
///
/// # Examples
///
/// ```rust
/// use errity::config::WrapperConfig;
/// use errity::wrap::wrap;
///
/// let config = WrapperConfig::builder()
///     .on_error(|err: String| eprintln!("giving up: {err}"))
///     .retry_count(3)
///     .build()
///     .unwrap();
///
/// let divide = wrap(
///     |(a, b): (i32, i32)| if b == 0 { Err("division by zero".to_string()) } else { Ok(a / b) },
///     config,
/// );
///
/// assert_eq!(divide.call((10, 2)), Some(5));
/// assert_eq!(divide.call((1, 0)), None);
/// ```
pub fn wrap<Tg, A>(target: Tg, handling: impl Into<ErrorHandling<Tg::Error>>) -> Wrapper<Tg, A>
where
    Tg: Target<A>,
    A: Clone,
{
    Wrapper::new(target, handling.into().into_config(), None)
}

/// Wrap an asynchronous target.
///
/// Waits between attempts suspend only the calling task.
///
/// # Examples
///
/// ```rust
/// use errity::config::ErrorHandling;
/// use errity::wrap::wrap_async;
///
/// # #[tokio::main]
/// # async fn main() {
/// let lookup = wrap_async(
///     |id: u32| async move {
///         if id == 0 { Err("unknown id".to_string()) } else { Ok(id * 10) }
///     },
///     ErrorHandling::handler(|err: String| eprintln!("lookup failed: {err}")),
/// );
///
/// assert_eq!(lookup.call(4).await, Some(40));
/// assert_eq!(lookup.call(0).await, None);
/// # }
/// ```
pub fn wrap_async<Tg, A>(
    target: Tg,
    handling: impl Into<ErrorHandling<Tg::Error>>,
) -> AsyncWrapper<Tg, A>
where
    Tg: AsyncTarget<A>,
    A: Clone,
{
    AsyncWrapper::new(target, handling.into().into_config(), None)
}
