//! Retry policies loaded from configuration files.

use errity::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[derive(Debug, serde::Deserialize)]
struct ServiceConfig {
    name: String,
    retry: RetryPolicy,
}

#[test]
fn test_policy_from_toml_section() {
    let raw = r#"
        name = "billing"

        [retry]
        retry_count = 3
        retry_delay_ms = 5
    "#;
    let config: ServiceConfig = toml::from_str(raw).unwrap();
    config.retry.validate().unwrap();

    assert_eq!(config.name, "billing");
    assert_eq!(config.retry.retry_count, 3);
    assert_eq!(config.retry.retry_delay(), Duration::from_millis(5));
}

#[test]
fn test_loaded_policy_drives_wrapper() {
    let policy = RetryPolicy::from_json_str(r#"{ "retry_count": 4 }"#).unwrap();
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempts);

    let wrapped = wrap(
        move |()| -> Result<(), String> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("down".to_string())
        },
        WrapperConfig::builder().policy(policy).build().unwrap(),
    );
    wrapped.call(());

    assert_eq!(wrapped.retry_count(), 4);
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

#[test]
fn test_zero_attempts_rejected_from_toml() {
    let policy: RetryPolicy = toml::from_str("retry_count = 0").unwrap();
    assert_eq!(policy.validate(), Err(ConfigError::InvalidRetryCount(0)));

    let err = WrapperConfig::<String>::builder()
        .policy(policy)
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::InvalidRetryCount(0));
}
