//! In-memory driver for exercising page objects without a browser.
//!
//! `FakeDriver` keeps a list of nodes per selector and lets a test script
//! the page the way a live application would change it: rows appear and
//! disappear, headings mount late, clicks have side effects, the driver is
//! slow or briefly fails.
//!
//! # Example
//!
//! ```ignore
//! let driver = Arc::new(FakeDriver::new());
//! driver.add_nodes(&by::css("div table .btn-danger"), 3);
//! driver.schedule(Duration::from_millis(200), |d| {
//!     d.remove_last(&by::css("div table .btn-danger"));
//! });
//!
//! let page = driver.page();
//! wait_until_count(&page.element_all(by::css("div table .btn-danger")), 2, None).await?;
//! ```

use crate::driver::Driver;
use crate::element::Page;
use crate::error::{Error, Result};
use crate::selector::Selector;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

type ClickHandler = Arc<dyn Fn(&FakeDriver) + Send + Sync>;

/// A node in the fake page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeNode {
    pub displayed: bool,
    pub text: String,
}

impl FakeNode {
    /// A visible node with the given text.
    pub fn visible(text: impl Into<String>) -> Self {
        Self {
            displayed: true,
            text: text.into(),
        }
    }

    /// A node that is in the document but not displayed.
    pub fn hidden(text: impl Into<String>) -> Self {
        Self {
            displayed: false,
            text: text.into(),
        }
    }
}

#[derive(Default)]
struct State {
    nodes: HashMap<String, Vec<FakeNode>>,
    click_handlers: HashMap<String, ClickHandler>,
    clicks: Vec<(Selector, usize)>,
    failures_remaining: usize,
    latency: Duration,
}

/// Scriptable in-memory [`Driver`].
///
/// Selectors are keyed by their CSS rendering, so `by::id("x")` and
/// `by::css("#x")` address the same nodes.
#[derive(Default)]
pub struct FakeDriver {
    state: Mutex<State>,
    queries: AtomicU64,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Page`] backed by this driver.
    pub fn page(self: &Arc<Self>) -> Page {
        Page::new(Arc::clone(self) as Arc<dyn Driver>)
    }

    /// Appends a node matching `selector`.
    pub fn add(&self, selector: &Selector, node: FakeNode) {
        self.state
            .lock()
            .nodes
            .entry(selector.to_css())
            .or_default()
            .push(node);
    }

    /// Appends `n` visible nodes matching `selector`, with texts `"0"`, `"1"`, ...
    pub fn add_nodes(&self, selector: &Selector, n: usize) {
        let mut state = self.state.lock();
        let nodes = state.nodes.entry(selector.to_css()).or_default();
        let start = nodes.len();
        nodes.extend((start..start + n).map(|i| FakeNode::visible(i.to_string())));
    }

    /// Removes the last node matching `selector`. Returns it if there was one.
    pub fn remove_last(&self, selector: &Selector) -> Option<FakeNode> {
        self.state
            .lock()
            .nodes
            .get_mut(&selector.to_css())
            .and_then(Vec::pop)
    }

    /// Removes every node matching `selector`.
    pub fn clear(&self, selector: &Selector) {
        self.state.lock().nodes.remove(&selector.to_css());
    }

    /// Shows or hides the `index`-th node matching `selector`.
    ///
    /// Returns false if there is no such node.
    pub fn set_displayed(&self, selector: &Selector, index: usize, displayed: bool) -> bool {
        let mut state = self.state.lock();
        match state
            .nodes
            .get_mut(&selector.to_css())
            .and_then(|nodes| nodes.get_mut(index))
        {
            Some(node) => {
                node.displayed = displayed;
                true
            }
            None => false,
        }
    }

    /// Runs `mutation` against this driver after `delay`, on a spawned task.
    pub fn schedule<F>(self: &Arc<Self>, delay: Duration, mutation: F) -> JoinHandle<()>
    where
        F: FnOnce(&FakeDriver) + Send + 'static,
    {
        let driver = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            mutation(driver.as_ref());
        })
    }

    /// Registers a side effect for clicks on any node matching `selector`.
    pub fn on_click<F>(&self, selector: &Selector, handler: F)
    where
        F: Fn(&FakeDriver) + Send + Sync + 'static,
    {
        self.state
            .lock()
            .click_handlers
            .insert(selector.to_css(), Arc::new(handler));
    }

    /// Makes the next `n` driver calls fail with [`Error::StaleElement`].
    pub fn fail_next(&self, n: usize) {
        self.state.lock().failures_remaining = n;
    }

    /// Delays every driver call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = latency;
    }

    /// Clicks performed so far, in order.
    pub fn clicks(&self) -> Vec<(Selector, usize)> {
        self.state.lock().clicks.clone()
    }

    /// Number of driver calls made so far.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    async fn begin_query(&self, selector: &Selector) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let latency = {
            let mut state = self.state.lock();
            if state.failures_remaining > 0 {
                state.failures_remaining -= 1;
                return Err(Error::StaleElement(format!(
                    "'{}' is not attached to the document",
                    selector.to_css()
                )));
            }
            state.latency
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(())
    }

    fn with_node<T>(
        &self,
        selector: &Selector,
        index: usize,
        f: impl FnOnce(&FakeNode) -> T,
    ) -> Result<T> {
        let state = self.state.lock();
        state
            .nodes
            .get(&selector.to_css())
            .and_then(|nodes| nodes.get(index))
            .map(f)
            .ok_or_else(|| {
                Error::StaleElement(format!(
                    "'{}' has no node at index {}",
                    selector.to_css(),
                    index
                ))
            })
    }
}

#[async_trait]
impl Driver for FakeDriver {
    async fn count(&self, selector: &Selector) -> Result<usize> {
        self.begin_query(selector).await?;
        let state = self.state.lock();
        Ok(state
            .nodes
            .get(&selector.to_css())
            .map(Vec::len)
            .unwrap_or(0))
    }

    async fn is_displayed(&self, selector: &Selector, index: usize) -> Result<bool> {
        self.begin_query(selector).await?;
        self.with_node(selector, index, |node| node.displayed)
    }

    async fn click(&self, selector: &Selector, index: usize) -> Result<()> {
        self.begin_query(selector).await?;
        if !self.with_node(selector, index, |node| node.displayed)? {
            return Err(Error::Driver(format!(
                "'{}' at index {} is not displayed and cannot be clicked",
                selector.to_css(),
                index
            )));
        }
        let handler = {
            let mut state = self.state.lock();
            state.clicks.push((selector.clone(), index));
            state.click_handlers.get(&selector.to_css()).cloned()
        };
        if let Some(handler) = handler {
            handler(self);
        }
        Ok(())
    }

    async fn text(&self, selector: &Selector, index: usize) -> Result<String> {
        self.begin_query(selector).await?;
        self.with_node(selector, index, |node| node.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::by;

    #[tokio::test]
    async fn test_id_and_css_alias() {
        let driver = FakeDriver::new();
        driver.add(&by::id("title"), FakeNode::visible("Shipments"));
        assert_eq!(driver.count(&by::css("#title")).await.unwrap(), 1);
        assert_eq!(driver.text(&by::id("title"), 0).await.unwrap(), "Shipments");
    }

    #[tokio::test]
    async fn test_missing_node_is_stale() {
        let driver = FakeDriver::new();
        assert_eq!(driver.count(&by::css("tr")).await.unwrap(), 0);
        assert!(matches!(
            driver.is_displayed(&by::css("tr"), 0).await,
            Err(Error::StaleElement(_))
        ));
    }

    #[tokio::test]
    async fn test_fail_next() {
        let driver = FakeDriver::new();
        driver.add_nodes(&by::css("tr"), 2);
        driver.fail_next(2);
        assert!(driver.count(&by::css("tr")).await.is_err());
        assert!(driver.count(&by::css("tr")).await.is_err());
        assert_eq!(driver.count(&by::css("tr")).await.unwrap(), 2);
        assert_eq!(driver.query_count(), 3);
    }

    #[tokio::test]
    async fn test_click_hidden_node_fails() {
        let driver = FakeDriver::new();
        driver.add(&by::id("btn"), FakeNode::hidden("Delete"));
        assert!(matches!(
            driver.click(&by::id("btn"), 0).await,
            Err(Error::Driver(_))
        ));
        assert!(driver.clicks().is_empty());
    }

    #[tokio::test]
    async fn test_click_runs_handler() {
        let driver = FakeDriver::new();
        driver.add(&by::id("confirm"), FakeNode::visible("Delete"));
        driver.add_nodes(&by::css("tr"), 3);
        driver.on_click(&by::id("confirm"), |d| {
            d.remove_last(&by::css("tr"));
        });

        driver.click(&by::id("confirm"), 0).await.unwrap();

        assert_eq!(driver.count(&by::css("tr")).await.unwrap(), 2);
        assert_eq!(driver.clicks(), vec![(by::id("confirm"), 0)]);
    }
}
