// Shared helpers for integration tests

// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use pagewait::fake::FakeDriver;
use pagewait::{Page, WaitOptions, Waiter};
use std::sync::Arc;
use std::time::Duration;

/// Installs a fmt subscriber honoring RUST_LOG. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A fresh fake driver and a page backed by it.
pub fn fake_page() -> (Arc<FakeDriver>, Page) {
    let driver = Arc::new(FakeDriver::new());
    let page = driver.page();
    (driver, page)
}

/// Waiter with a 5s timeout and 100ms poll interval.
pub fn waiter() -> Waiter {
    Waiter::new(
        WaitOptions::new()
            .with_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(100)),
    )
}
