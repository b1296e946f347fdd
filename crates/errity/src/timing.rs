//! Waiting between attempts.
//!
//! The blocking variant parks the caller's thread with a real sleep instead of
//! spinning; the caller is still blocked for the full duration.

use std::time::Duration;

/// Delay to apply before `attempt` (0-indexed).
///
/// The first attempt never waits, and a zero delay means no wait at all.
pub fn delay_before(attempt: u32, delay: Duration) -> Option<Duration> {
    (attempt > 0 && !delay.is_zero()).then_some(delay)
}

/// Block the calling thread for `delay`.
pub fn block_for(delay: Duration) {
    std::thread::sleep(delay);
}

/// Suspend the current task for `delay` without blocking other tasks.
pub async fn pause_for(delay: Duration) {
    tokio::time::sleep(delay).await;
}
