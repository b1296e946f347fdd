//! Retry and handler routing of standalone wrappers.

use errity::prelude::*;
use proptest::prelude::*;
use rstest::rstest;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const LOOPS: u32 = 500;

/// Counters for the target and both handlers.
#[derive(Clone, Default)]
struct Counts {
    attempts: Arc<AtomicU32>,
    retries: Arc<AtomicU32>,
    terminals: Arc<AtomicU32>,
}

impl Counts {
    fn config(&self, retry_count: u32) -> WrapperConfig<String> {
        let retries = Arc::clone(&self.retries);
        let terminals = Arc::clone(&self.terminals);
        WrapperConfig::builder()
            .on_retry_error(move |_: &String| {
                retries.fetch_add(1, Ordering::SeqCst);
            })
            .on_error(move |_: String| {
                terminals.fetch_add(1, Ordering::SeqCst);
            })
            .retry_count(retry_count)
            .build()
            .unwrap()
    }

    fn get(&self) -> (u32, u32, u32) {
        (
            self.attempts.load(Ordering::SeqCst),
            self.retries.load(Ordering::SeqCst),
            self.terminals.load(Ordering::SeqCst),
        )
    }
}

/// A target that fails until attempt `succeed_on` (1-indexed), or always when `None`.
fn flaky(counts: &Counts, succeed_on: Option<u32>) -> impl Fn(()) -> Result<&'static str, String> {
    let attempts = Arc::clone(&counts.attempts);
    move |()| {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        match succeed_on {
            Some(k) if attempt >= k => Ok("ok"),
            _ => Err(format!("attempt {attempt} failed")),
        }
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(50)]
fn test_always_failing_target(#[case] retry_count: u32) {
    let counts = Counts::default();
    let wrapped = wrap(flaky(&counts, None), counts.config(retry_count));

    assert_eq!(wrapped.call(()), None);
    assert_eq!(counts.get(), (retry_count, retry_count - 1, 1));
}

#[rstest]
#[case(1, 1)]
#[case(3, 2)]
#[case(3, 3)]
#[case(10, 7)]
fn test_success_on_attempt_k(#[case] retry_count: u32, #[case] k: u32) {
    let counts = Counts::default();
    let wrapped = wrap(flaky(&counts, Some(k)), counts.config(retry_count));

    assert_eq!(wrapped.call(()), Some("ok"));
    let (attempts, _, terminals) = counts.get();
    assert_eq!(attempts, k);
    assert_eq!(terminals, 0);
}

proptest! {
    #[test]
    fn prop_attempt_and_handler_counts(retry_count in 1u32..40) {
        let counts = Counts::default();
        let wrapped = wrap(flaky(&counts, None), counts.config(retry_count));
        wrapped.call(());

        prop_assert_eq!(counts.get(), (retry_count, retry_count - 1, 1));
    }

    #[test]
    fn prop_success_value_passes_through(value in any::<i64>(), retry_count in 1u32..10) {
        let wrapped = wrap(
            |x: i64| -> Result<i64, String> { Ok(x) },
            WrapperConfig::builder().retry_count(retry_count).build().unwrap(),
        );
        prop_assert_eq!(wrapped.call(value), Some(value));
    }
}

#[test]
fn test_terminal_handler_receives_payload() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let wrapped = wrap(
        |()| Err::<(), _>("X".to_string()),
        ErrorHandling::handler(move |err: String| sink.lock().unwrap().push(err)),
    );
    wrapped.call(());

    assert_eq!(*seen.lock().unwrap(), vec!["X".to_string()]);
}

#[test]
fn test_parity_failures_with_single_attempt() {
    let counts = Counts::default();
    let wrapped = wrap(
        |(value, has_error): (u32, bool)| -> Result<(), String> {
            if has_error {
                Err(format!("{value} error"))
            } else {
                Ok(())
            }
        },
        counts.config(1),
    );

    for i in 0..LOOPS {
        wrapped.call((i, i % 2 == 0));
    }

    let (_, retries, terminals) = counts.get();
    assert_eq!(terminals, LOOPS / 2);
    assert_eq!(retries, 0);
}

#[test]
fn test_no_handler_returns_none_without_panicking() {
    let wrapped = wrap(|()| Err::<u8, _>("lost".to_string()), ErrorHandling::none());
    assert_eq!(wrapped.call(()), None);
}

#[test]
fn test_non_string_payload_forwarded_verbatim() {
    #[derive(Debug, Clone, PartialEq)]
    struct Rejected {
        code: u16,
    }

    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let wrapped = wrap(
        |code: u16| -> Result<(), Rejected> { Err(Rejected { code }) },
        ErrorHandling::handler(move |err: Rejected| *sink.lock().unwrap() = Some(err)),
    );
    wrapped.call(503);

    assert_eq!(*seen.lock().unwrap(), Some(Rejected { code: 503 }));
}

#[test]
fn test_sync_delay_lower_bound() {
    let config = WrapperConfig::builder()
        .retry_count(4)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let wrapped = wrap(|()| Err::<(), _>("slow".to_string()), config);

    let start = Instant::now();
    wrapped.call(());
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[test]
fn test_no_delay_after_success() {
    let counts = Counts::default();
    let config = WrapperConfig::builder()
        .retry_count(3)
        .retry_delay(Duration::from_millis(200))
        .build()
        .unwrap();
    let wrapped = wrap(flaky(&counts, Some(1)), config);

    let start = Instant::now();
    assert_eq!(wrapped.call(()), Some("ok"));
    assert!(start.elapsed() < Duration::from_millis(200));
}

#[tokio::test]
async fn test_async_always_failing_with_500_attempts() {
    let counts = Counts::default();
    let attempts = Arc::clone(&counts.attempts);
    let wrapped = wrap_async(
        move |()| {
            let attempts = Arc::clone(&attempts);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("async error".to_string())
            }
        },
        counts.config(LOOPS),
    );

    assert_eq!(wrapped.call(()).await, None);
    assert_eq!(counts.get(), (LOOPS, LOOPS - 1, 1));
}

#[tokio::test(start_paused = true)]
async fn test_async_delays_do_not_block_each_other() {
    let config = WrapperConfig::builder()
        .retry_count(3)
        .retry_delay(Duration::from_secs(1))
        .build()
        .unwrap();
    let wrapped = wrap_async(|()| async { Err::<(), _>("slow".to_string()) }, config);

    let start = tokio::time::Instant::now();
    futures::future::join_all((0..10).map(|_| wrapped.call(()))).await;

    // Ten concurrent calls each wait 2s in total; run back to back they would take 20s.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(2));
    assert!(elapsed < Duration::from_secs(4));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_wrapper_shared_across_tasks() {
    let counts = Counts::default();
    let wrapped = wrap_async(
        |fail: bool| async move { if fail { Err("nope".to_string()) } else { Ok(()) } },
        counts.config(2),
    );

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let wrapped = wrapped.clone();
            tokio::spawn(async move { wrapped.call(i % 4 == 0).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let (_, retries, terminals) = counts.get();
    assert_eq!(terminals, 5);
    assert_eq!(retries, 5);
}
