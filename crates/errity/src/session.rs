//! Sessions: shared fallback handling for a group of wrappers.
//!
//! Every wrapper created through a [`Session`] holds a read-only handle to the
//! session's default error handler and failure log. The handle is captured
//! when the wrapper is created; the session can be dropped afterwards.

use crate::config::ErrorHandling;
use crate::handler::ErrorHandler;
use crate::log::FailureLog;
use crate::target::{AsyncTarget, Target};
use crate::wrap::{self, AsyncWrapper, Wrapper};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// What a wrapper needs from the session that created it.
pub(crate) trait SessionHooks<E>: Send + Sync {
    /// Record a failed attempt in the shared log, if logging is enabled.
    fn record(&self, error: &E);

    /// Fallback handler for wrappers without their own `on_error`.
    fn default_error_cb(&self) -> Option<&ErrorHandler<E>>;
}

struct SessionShared<E> {
    default_error_cb: Option<ErrorHandler<E>>,
    logs: Option<FailureLog<E>>,
}

impl<E> SessionHooks<E> for SessionShared<E>
where
    E: Clone + Send,
{
    fn record(&self, error: &E) {
        if let Some(logs) = &self.logs {
            logs.push(error.clone());
        }
    }

    fn default_error_cb(&self) -> Option<&ErrorHandler<E>> {
        self.default_error_cb.as_ref()
    }
}

/// Construction options for a [`Session`].
pub struct SessionConfig<E> {
    default_error_cb: Option<ErrorHandler<E>>,
    logger: bool,
}

impl<E> SessionConfig<E> {
    /// No default handler, logging disabled.
    pub fn new() -> Self {
        Self {
            default_error_cb: None,
            logger: false,
        }
    }

    /// Handler for terminal failures of wrappers without their own `on_error`.
    pub fn default_error_cb<F>(mut self, default_error_cb: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.default_error_cb = Some(Arc::new(default_error_cb));
        self
    }

    /// Record every failed attempt of every wrapper in a shared log.
    pub fn logger(mut self, enabled: bool) -> Self {
        self.logger = enabled;
        self
    }
}

impl<E> Default for SessionConfig<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A reusable context that supplies a default error handler and an optional
/// shared failure log to the wrappers it creates.
///
/// # Examples
///
/// ```rust
/// use errity::config::ErrorHandling;
/// use errity::session::{Session, SessionConfig};
///
/// let session = Session::new(
///     SessionConfig::new()
///         .default_error_cb(|err: String| eprintln!("unhandled: {err}"))
///         .logger(true),
/// );
///
/// let parse = session.wrap(
///     |raw: String| raw.parse::<u32>().map_err(|e| e.to_string()),
///     ErrorHandling::none(),
/// );
///
/// assert_eq!(parse.call("7".to_string()), Some(7));
/// assert_eq!(parse.call("seven".to_string()), None);
/// assert_eq!(session.logs().map(|logs| logs.len()), Some(1));
/// ```
pub struct Session<E> {
    shared: Arc<SessionShared<E>>,
}

impl<E> Session<E>
where
    E: Clone + Send + 'static,
{
    /// Create a session.
    ///
    /// The log exists only when `logger` was enabled.
    pub fn new(config: SessionConfig<E>) -> Self {
        debug!(
            default_error_cb = config.default_error_cb.is_some(),
            logger = config.logger,
            "creating session"
        );

        Self {
            shared: Arc::new(SessionShared {
                default_error_cb: config.default_error_cb,
                logs: config.logger.then(FailureLog::new),
            }),
        }
    }

    /// The shared failure log, or `None` when logging was not requested.
    pub fn logs(&self) -> Option<&FailureLog<E>> {
        self.shared.logs.as_ref()
    }

    /// Whether the session carries a default error handler.
    pub fn has_default_error_cb(&self) -> bool {
        self.shared.default_error_cb.is_some()
    }

    /// Wrap a synchronous target with this session's fallback handling.
    pub fn wrap<Tg, A>(
        &self,
        target: Tg,
        handling: impl Into<ErrorHandling<E>>,
    ) -> Wrapper<Tg, A>
    where
        Tg: Target<A, Error = E>,
        A: Clone,
    {
        Wrapper::new(target, handling.into().into_config(), Some(self.hooks()))
    }

    /// Wrap an asynchronous target with this session's fallback handling.
    pub fn wrap_async<Tg, A>(
        &self,
        target: Tg,
        handling: impl Into<ErrorHandling<E>>,
    ) -> AsyncWrapper<Tg, A>
    where
        Tg: AsyncTarget<A, Error = E>,
        A: Clone,
    {
        AsyncWrapper::new(target, handling.into().into_config(), Some(self.hooks()))
    }

    fn hooks(&self) -> wrap::Hooks<E> {
        Arc::clone(&self.shared) as wrap::Hooks<E>
    }
}

impl<E> Default for Session<E>
where
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<E> Clone for Session<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E> fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("default_error_cb", &self.shared.default_error_cb.is_some())
            .field("logs", &self.shared.logs)
            .finish()
    }
}
