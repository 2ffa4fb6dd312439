use crate::dom::NavNode;
use crate::error::Result;
use std::time::Duration;

/// Scroll position of a scrollable container after a scroll step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub top: i64,
    pub height: i64,
}

/// Browser operations the crawl engine issues against its primary session.
///
/// Every call is a blocking round-trip. Node handles returned by
/// [`PageDriver::query_all`] are only valid until the next navigation.
pub trait PageDriver {
    /// Navigate the primary tab to `url`
    fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until the first element matching `selector` is rendered and visible
    fn wait_visible(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Snapshot every element matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Result<Vec<NavNode>>;

    /// Serialized outer markup of a previously queried node
    fn outer_html(&self, node: &NavNode) -> Result<String>;

    fn scroll_into_view(&self, node: &NavNode) -> Result<()>;

    fn click(&self, node: &NavNode) -> Result<()>;

    /// Scroll the container matching `selector` by `delta` pixels.
    /// Returns `None` when the container is not in the page.
    fn scroll_by(&self, selector: &str, delta: i64) -> Result<Option<ScrollState>>;

    /// Current location of the primary tab
    fn current_url(&self) -> Result<String>;

    /// Rendered text of the first element matching `selector`
    fn inner_text(&self, selector: &str) -> Result<String>;

    /// Inner markup of the first element matching `selector`
    fn inner_html(&self, selector: &str) -> Result<String>;

    /// Read the inner markup of `selector` at `url` in a disposable child tab
    /// that leaves the primary tab untouched
    fn fetch_isolated(&self, url: &str, selector: &str, timeout: Duration) -> Result<String>;
}
