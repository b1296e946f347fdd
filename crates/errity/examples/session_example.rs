//! Example: a session shared by a sync and an async wrapper
//!
//! This example demonstrates:
//! 1. A session default handler catching failures of wrappers without `on_error`
//! 2. Retries with a delay and a retry handler
//! 3. The shared failure log
//!
//! Run with:
//! ```bash
//! RUST_LOG=errity=debug cargo run -p errity --example session_example
//! ```

use errity::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// A simulated service that fails the first few times.
struct UnreliableService {
    attempts: Arc<AtomicU32>,
    fail_count: u32,
}

impl AsyncTarget<String> for UnreliableService {
    type Output = String;
    type Error = String;

    async fn invoke(&self, request: String) -> Result<String, String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_count {
            Err(format!("transient error on attempt {}", attempt + 1))
        } else {
            Ok(format!("handled {request}"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let session = Session::new(
        SessionConfig::new()
            .default_error_cb(|err: String| println!("  [default handler] {err}"))
            .logger(true),
    );

    println!("=== Sync wrapper, session default handler ===");
    let parse = session.wrap(
        |raw: &'static str| raw.parse::<u16>().map_err(|e| format!("{raw:?}: {e}")),
        ErrorHandling::none(),
    );
    for raw in ["8080", "http", "443"] {
        println!("  {raw:?} -> {:?}", parse.call(raw));
    }

    println!("\n=== Async wrapper, 3 attempts 50ms apart ===");
    let service = UnreliableService {
        attempts: Arc::new(AtomicU32::new(0)),
        fail_count: 2,
    };
    let config = WrapperConfig::builder()
        .on_retry_error(|err: &String| println!("  [retry] {err}"))
        .on_error(|err: String| println!("  [gave up] {err}"))
        .retry_count(3)
        .retry_delay(Duration::from_millis(50))
        .build()?;
    let call = session.wrap_async(service, config);

    let start = Instant::now();
    let result = call.call("order-17".to_string()).await;
    println!("  result: {:?} after {:?}", result, start.elapsed());

    if let Some(logs) = session.logs() {
        println!("\n=== Failure log ({} entries) ===", logs.len());
        for entry in logs.snapshot() {
            println!("  {entry}");
        }
    }

    Ok(())
}
