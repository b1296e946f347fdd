//! Handler types that receive failure payloads.
//!
//! Handlers are infallible closures. A handler that panics unwinds out of the
//! wrapper invocation that called it; the wrapper does not catch it.

use std::sync::Arc;

/// Handler for a terminal failure (the last permitted attempt failed).
///
/// Receives ownership of the failure payload.
pub type ErrorHandler<E> = Arc<dyn Fn(E) + Send + Sync>;

/// Handler for a failure on an attempt that is about to be retried.
pub type RetryHandler<E> = Arc<dyn Fn(&E) + Send + Sync>;
