// Driver - Browser-automation capability surface
//
// The page objects and the condition waiter only ever need four things from a
// browser: count the nodes matching a selector, ask whether one of them is
// displayed, click one, and read its text. Anything that can do that (a
// WebDriver session, a CDP client, an in-memory fake) can back a `Page`.

use crate::error::Result;
use crate::selector::Selector;
use async_trait::async_trait;

/// Minimal browser-automation capability consumed by element references.
///
/// `index` is always a resolved, zero-based position into the nodes currently
/// matching `selector`. Implementations must query live state on every call;
/// callers rely on nothing being cached between calls.
///
/// A node that disappeared between the count and the follow-up query should be
/// reported as [`Error::StaleElement`](crate::Error::StaleElement) or
/// [`Error::ElementNotFound`](crate::Error::ElementNotFound).
#[async_trait]
pub trait Driver: Send + Sync {
    /// Number of nodes currently matching `selector`. Zero is a valid answer.
    async fn count(&self, selector: &Selector) -> Result<usize>;

    /// Whether the `index`-th match is rendered and visible.
    async fn is_displayed(&self, selector: &Selector, index: usize) -> Result<bool>;

    /// Clicks the `index`-th match.
    async fn click(&self, selector: &Selector, index: usize) -> Result<()>;

    /// Visible text of the `index`-th match.
    async fn text(&self, selector: &Selector, index: usize) -> Result<String>;
}
