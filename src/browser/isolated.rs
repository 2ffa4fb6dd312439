//! Reads a page in a disposable child tab.
//!
//! The child tab is a separate CDP target on the same browser connection, so
//! navigating it leaves the primary tab's location, scroll position and
//! in-page state alone. It is closed as soon as the read finishes, which also
//! removes the target from the browser's tab list.

use crate::browser::session::{inner_html, wait_visible};
use crate::error::{CrawlError, Result};
use headless_chrome::{Browser, Tab};
use std::time::{Duration, Instant};

/// Open `url` in a fresh child tab, wait for `selector` to become
/// visible and return its inner markup.
///
/// The child tab is closed before returning whether or not the read succeeded.
/// Every failure collapses into [`CrawlError::IsolatedFetchFailed`].
pub fn fetch_inner_html(browser: &Browser, url: &str, selector: &str, timeout: Duration) -> Result<String> {
    let fail = |reason: String| CrawlError::IsolatedFetchFailed { url: url.to_string(), reason };

    let tab = browser.new_tab().map_err(|e| fail(format!("Failed to create tab: {}", e)))?;

    let result = read_inner_html(&tab, url, selector, timeout);

    if let Err(e) = tab.close(true) {
        log::debug!("Failed to close isolated tab for {}: {}", url, e);
    }

    result.map_err(|e| fail(e.to_string()))
}

fn read_inner_html(tab: &Tab, url: &str, selector: &str, timeout: Duration) -> Result<String> {
    let started = Instant::now();
    tab.set_default_timeout(timeout);

    tab.navigate_to(url)
        .map_err(|e| CrawlError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;
    tab.wait_until_navigated()
        .map_err(|e| CrawlError::NavigationFailed(format!("Navigation to {} did not complete: {}", url, e)))?;

    let remaining = timeout.saturating_sub(started.elapsed());
    wait_visible(tab, selector, remaining)?;

    inner_html(tab, selector)
}
