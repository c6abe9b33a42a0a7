// Condition waiter - Poll until a condition holds or the timeout elapses
//
// Every page-object wait is built on the same loop:
// 1. Check the condition against the live page (fresh query, nothing cached)
// 2. Succeed on the first observation of the condition
// 3. Otherwise sleep for the poll interval (clamped to the time remaining) and retry
// 4. Fail with Error::Timeout once the deadline passes
//
// Check errors (detached nodes, missing elements, driver hiccups) count as
// "not yet" and are retried. Only running out of time is reported.

use crate::config::WaitOptions;
use crate::element::{ElementArrayFinder, ElementFinder};
use crate::error::{Error, Result};
use futures_util::future::join_all;
use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Lower bound on the poll interval so a zero interval cannot spin.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Deadline used when `start + timeout` overflows (roughly 30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Waits for the element to be displayed, using the default options.
///
/// `timeout` overrides the default timeout for this call.
pub async fn wait_until_displayed(
    element: &ElementFinder,
    timeout: Option<Duration>,
) -> Result<()> {
    Waiter::default().until_displayed(element, timeout).await
}

/// Waits for the collection to contain exactly `expected` nodes, using the default options.
///
/// `expected` may be zero, e.g. to wait for every row of a list to be deleted.
pub async fn wait_until_count(
    elements: &ElementArrayFinder,
    expected: usize,
    timeout: Option<Duration>,
) -> Result<()> {
    Waiter::default().until_count(elements, expected, timeout).await
}

/// Waits for the element to be absent or hidden, using the default options.
pub async fn wait_until_hidden(
    element: &ElementFinder,
    timeout: Option<Duration>,
) -> Result<()> {
    Waiter::default().until_hidden(element, timeout).await
}

/// Waits for at least one of the elements to be displayed, using the default options.
pub async fn wait_until_any_displayed(
    elements: &[ElementFinder],
    timeout: Option<Duration>,
) -> Result<()> {
    Waiter::default().until_any_displayed(elements, timeout).await
}

/// Polls conditions against the page with a fixed set of [`WaitOptions`].
///
/// A waiter holds no state between waits; one instance can serve any number
/// of concurrent waits.
///
/// # Example
///
/// ```ignore
/// use pagewait::{Waiter, WaitOptions};
/// use std::time::Duration;
///
/// let waiter = Waiter::new(WaitOptions::new().with_timeout(Duration::from_secs(5)));
/// waiter.until_displayed(&page.element(by::id("shipment-heading")), None).await?;
/// waiter.until_count(&rows, 2, None).await?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Creates a waiter with the given options.
    pub fn new(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Returns this waiter's options.
    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Polls `check` until it returns `Ok(true)` or the timeout elapses.
    ///
    /// `condition` describes what is being waited for and ends up in the
    /// timeout error. A check returning `Err` is treated like `Ok(false)`.
    /// A check still running at the deadline is abandoned, so a hung driver
    /// call cannot stretch the wait past its timeout.
    ///
    /// A zero timeout checks the condition exactly once.
    pub async fn until<F, Fut>(
        &self,
        condition: &str,
        timeout: Option<Duration>,
        mut check: F,
    ) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let timeout = timeout.unwrap_or(self.options.timeout);
        let poll_interval = self.options.poll_interval.max(MIN_POLL_INTERVAL);
        let start = Instant::now();
        let deadline = start
            .checked_add(timeout)
            .unwrap_or_else(|| start + FAR_FUTURE);
        let mut last_error: Option<String> = None;
        let mut polls: u64 = 0;

        tracing::debug!("Waiting up to {:?} for {}", timeout, condition);

        loop {
            polls = polls.saturating_add(1);
            match tokio::time::timeout_at(deadline, check()).await {
                Ok(Ok(true)) => {
                    tracing::debug!(
                        "Condition met after {:?} ({} polls): {}",
                        start.elapsed(),
                        polls,
                        condition
                    );
                    return Ok(());
                }
                Ok(Ok(false)) => {
                    tracing::trace!("Poll {} not met: {}", polls, condition);
                    last_error = None;
                }
                Ok(Err(e)) => {
                    tracing::debug!("Poll {} failed, retrying ({}): {}", polls, condition, e);
                    last_error = Some(e.to_string());
                }
                Err(_) => {
                    tracing::debug!("Poll {} still running at deadline: {}", polls, condition);
                    last_error =
                        Some("condition check did not finish before the deadline".to_string());
                }
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::debug!(
                    "Gave up after {:?} ({} polls): {}",
                    now - start,
                    polls,
                    condition
                );
                return Err(Error::Timeout {
                    condition: condition.to_string(),
                    timeout,
                    last_error,
                });
            }

            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }

    /// Waits until the element is rendered and visible.
    ///
    /// A missing or detached element is "not yet displayed", not an error.
    pub async fn until_displayed(
        &self,
        element: &ElementFinder,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let condition = format!("{} to be displayed", element.describe());
        self.until(&condition, timeout, move || element.is_displayed()).await
    }

    /// Waits until the element is absent from the page or not displayed.
    pub async fn until_hidden(
        &self,
        element: &ElementFinder,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let condition = format!("{} to be hidden", element.describe());
        self.until(&condition, timeout, move || async move {
            match element.is_displayed().await {
                Ok(displayed) => Ok(!displayed),
                Err(Error::ElementNotFound(_)) | Err(Error::StaleElement(_)) => Ok(true),
                Err(e) => Err(e),
            }
        })
        .await
    }

    /// Waits until exactly `expected` nodes match the collection's selector.
    ///
    /// A timeout error reports the last count that was observed.
    pub async fn until_count(
        &self,
        elements: &ElementArrayFinder,
        expected: usize,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let condition = format!("count of {} to be {}", elements.describe(), expected);
        let observed: Mutex<Option<usize>> = Mutex::new(None);
        let observed_ref = &observed;

        let result = self
            .until(&condition, timeout, move || async move {
                let count = elements.count().await?;
                *observed_ref.lock() = Some(count);
                Ok(count == expected)
            })
            .await;

        match (result, observed.into_inner()) {
            (
                Err(Error::Timeout {
                    condition,
                    timeout,
                    last_error,
                }),
                Some(count),
            ) => Err(Error::Timeout {
                condition: format!("{} (last observed: {})", condition, count),
                timeout,
                last_error,
            }),
            (result, _) => result,
        }
    }

    /// Waits until at least one of `elements` is displayed.
    ///
    /// Each poll queries every element concurrently. An empty slice never
    /// succeeds.
    pub async fn until_any_displayed(
        &self,
        elements: &[ElementFinder],
        timeout: Option<Duration>,
    ) -> Result<()> {
        let described: Vec<String> = elements.iter().map(ElementFinder::describe).collect();
        let condition = format!("any of [{}] to be displayed", described.join(", "));

        self.until(&condition, timeout, move || async move {
            let results = join_all(elements.iter().map(ElementFinder::is_displayed)).await;
            let mut first_error = None;
            let mut checked = false;
            for result in results {
                match result {
                    Ok(true) => return Ok(true),
                    Ok(false) => checked = true,
                    Err(e) => {
                        first_error.get_or_insert(e);
                    }
                }
            }
            // Errors only matter when no element could be checked at all
            match first_error {
                Some(e) if !checked => Err(e),
                _ => Ok(false),
            }
        })
        .await
    }
}
