// Element references - Lazy handles to nodes on the page
//
// Key characteristics:
// - Lazy: nothing is looked up when a reference is created
// - Fresh: every query re-resolves the selector against the live page
// - Cheap: a reference is a selector, a position and a shared driver handle
//
// `ElementArrayFinder` refers to every node matching a selector.
// `ElementFinder` refers to one of them (first, last or nth), resolved
// against the match count at query time.

use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::selector::Selector;
use std::fmt;
use std::sync::Arc;

/// Entry point for creating element references against one browser page.
///
/// # Example
///
/// ```ignore
/// use pagewait::{Page, by};
///
/// let page = Page::new(driver);
/// let title = page.element(by::id("shipment-heading"));
/// let rows = page.element_all(by::css("div table .btn-danger"));
/// println!("{} rows", rows.count().await?);
/// title.click().await?;
/// ```
#[derive(Clone)]
pub struct Page {
    driver: Arc<dyn Driver>,
}

impl Page {
    /// Creates a page backed by the given driver.
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    /// Reference to the single node matching `selector` (the first match).
    pub fn element(&self, selector: Selector) -> ElementFinder {
        ElementFinder::new(Arc::clone(&self.driver), selector, Position::First)
    }

    /// Reference to every node matching `selector`.
    pub fn element_all(&self, selector: Selector) -> ElementArrayFinder {
        ElementArrayFinder::new(Arc::clone(&self.driver), selector)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}

/// Which of the matching nodes a single-element reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Last,
    /// Zero-based index
    Nth(usize),
}

impl Position {
    /// Resolves this position against the current number of matches.
    ///
    /// Returns `None` when there is no node at this position.
    pub fn resolve(self, count: usize) -> Option<usize> {
        match self {
            Position::First if count > 0 => Some(0),
            Position::Last if count > 0 => Some(count - 1),
            Position::Nth(i) if i < count => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::First => write!(f, "first"),
            Position::Last => write!(f, "last"),
            Position::Nth(i) => write!(f, "nth={}", i),
        }
    }
}

/// Lazy reference to a single node.
#[derive(Clone)]
pub struct ElementFinder {
    driver: Arc<dyn Driver>,
    selector: Selector,
    position: Position,
}

impl ElementFinder {
    pub(crate) fn new(driver: Arc<dyn Driver>, selector: Selector, position: Position) -> Self {
        Self {
            driver,
            selector,
            position,
        }
    }

    /// Returns the selector this reference resolves.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Returns which match this reference points at.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Human-readable description used in logs and error messages.
    pub fn describe(&self) -> String {
        match self.position {
            Position::First => format!("'{}'", self.selector.to_css()),
            other => format!("'{}' ({})", self.selector.to_css(), other),
        }
    }

    async fn resolve(&self) -> Result<usize> {
        let count = self.driver.count(&self.selector).await?;
        self.position.resolve(count).ok_or_else(|| {
            Error::ElementNotFound(format!("{} matched {} node(s)", self.describe(), count))
        })
    }

    /// Whether a node exists at this reference's position right now.
    pub async fn is_present(&self) -> Result<bool> {
        let count = self.driver.count(&self.selector).await?;
        Ok(self.position.resolve(count).is_some())
    }

    /// Whether the node is rendered and visible.
    ///
    /// Fails with [`Error::ElementNotFound`] if there is no such node.
    pub async fn is_displayed(&self) -> Result<bool> {
        let index = self.resolve().await?;
        self.driver.is_displayed(&self.selector, index).await
    }

    /// Clicks the node.
    pub async fn click(&self) -> Result<()> {
        let index = self.resolve().await?;
        tracing::debug!("Clicking {}", self.describe());
        self.driver.click(&self.selector, index).await
    }

    /// Returns the node's visible text.
    pub async fn text(&self) -> Result<String> {
        let index = self.resolve().await?;
        self.driver.text(&self.selector, index).await
    }
}

impl fmt::Debug for ElementFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementFinder")
            .field("selector", &self.selector)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Lazy reference to every node matching a selector.
#[derive(Clone)]
pub struct ElementArrayFinder {
    driver: Arc<dyn Driver>,
    selector: Selector,
}

impl ElementArrayFinder {
    pub(crate) fn new(driver: Arc<dyn Driver>, selector: Selector) -> Self {
        Self { driver, selector }
    }

    /// Returns the selector this reference resolves.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Human-readable description used in logs and error messages.
    pub fn describe(&self) -> String {
        format!("'{}'", self.selector.to_css())
    }

    /// Number of nodes matching right now. Zero is not an error.
    pub async fn count(&self) -> Result<usize> {
        self.driver.count(&self.selector).await
    }

    /// Reference to the first match.
    pub fn first(&self) -> ElementFinder {
        self.at(Position::First)
    }

    /// Reference to the last match.
    pub fn last(&self) -> ElementFinder {
        self.at(Position::Last)
    }

    /// Reference to the match at `index` (zero-based).
    pub fn get(&self, index: usize) -> ElementFinder {
        self.at(Position::Nth(index))
    }

    fn at(&self, position: Position) -> ElementFinder {
        ElementFinder::new(Arc::clone(&self.driver), self.selector.clone(), position)
    }
}

impl fmt::Debug for ElementArrayFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementArrayFinder")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}
