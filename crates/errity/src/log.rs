//! Shared, append-only failure log.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An ordered log of failure payloads shared by every wrapper of a
/// [`Session`](crate::session::Session).
///
/// Cloning the log clones the handle, not the entries. Appends are atomic, so
/// concurrent invocations can record failures without further coordination.
///
/// # Examples
///
/// ```rust
/// use errity::log::FailureLog;
///
/// let log = FailureLog::new();
/// log.push("timeout");
/// log.push("refused");
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.snapshot(), vec!["timeout", "refused"]);
/// ```
pub struct FailureLog<E> {
    entries: Arc<Mutex<Vec<E>>>,
}

impl<E> FailureLog<E> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a failure payload.
    pub fn push(&self, error: E) {
        self.lock().push(error);
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no failure has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return every recorded failure, oldest first.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.lock())
    }

    // A panicking handler must not make the log unusable.
    fn lock(&self) -> MutexGuard<'_, Vec<E>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Clone> FailureLog<E> {
    /// Copy of the recorded failures, oldest first.
    pub fn snapshot(&self) -> Vec<E> {
        self.lock().clone()
    }
}

impl<E> Default for FailureLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for FailureLog<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<E> fmt::Debug for FailureLog<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureLog")
            .field("len", &self.len())
            .finish()
    }
}
