#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Wrap functions so their failures are retried and routed to handlers
//! instead of propagating.
//!
//! A wrapped function keeps its calling convention: the same arguments go in
//! and the same success value comes out. On failure the wrapper:
//!
//! - retries up to a bounded number of attempts, optionally waiting between them
//! - reports every non-final failure to an `on_retry_error` handler
//! - reports the final failure to `on_error`, else to the session default handler
//! - records every failure in a session's shared log when logging is enabled
//!
//! The wrapper itself never returns the failure. A successful call yields
//! `Some(value)`, an exhausted one yields `None`.
//!
//! Synchronous targets ([`Target`](target::Target)) wait by blocking the calling
//! thread; asynchronous targets ([`AsyncTarget`](target::AsyncTarget)) wait on the
//! tokio timer and never block other tasks.
//!
//! # Examples
//!
//! ```rust
//! use errity::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ConfigError> {
//! let session = Session::new(
//!     SessionConfig::new()
//!         .default_error_cb(|err: String| eprintln!("unhandled: {err}"))
//!         .logger(true),
//! );
//!
//! let fetch = session.wrap_async(
//!     |id: u32| async move {
//!         if id % 2 == 0 { Ok(format!("item-{id}")) } else { Err(format!("{id} missing")) }
//!     },
//!     WrapperConfig::builder()
//!         .retry_count(3)
//!         .retry_delay(Duration::from_millis(10))
//!         .build()?,
//! );
//!
//! assert_eq!(fetch.call(2).await, Some("item-2".to_string()));
//! assert_eq!(fetch.call(3).await, None);
//! assert_eq!(session.logs().map(|logs| logs.len()), Some(3));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod log;
pub mod session;
pub mod target;
pub mod timing;
pub mod wrap;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use errity::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ErrorHandling, RetryPolicy, WrapperConfig, WrapperConfigBuilder};
    pub use crate::error::ConfigError;
    pub use crate::handler::{ErrorHandler, RetryHandler};
    pub use crate::log::FailureLog;
    pub use crate::session::{Session, SessionConfig};
    pub use crate::target::{AsyncTarget, Target};
    pub use crate::wrap::{AsyncWrapper, Wrapper, wrap, wrap_async};
}
