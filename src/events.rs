//! Structured crawl events
//!
//! The crawler reports its outcomes through a [`CrawlEvents`] value handed to
//! its constructor rather than a process-wide logger.

use std::fmt;

/// Why a leaf candidate did not produce a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Scrolling to or clicking the node failed
    ClickFailed,
    /// No identity could be derived from the resolved URL
    NoIdentity,
    /// The identity was already collected
    Duplicate,
    /// Every content read attempt failed
    ContentUnavailable,
    /// The click landed outside the allowed URLs
    Disallowed,
    /// The node handle predates a navigation back to the start page
    Stale,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::ClickFailed => "click_failed",
            SkipReason::NoIdentity => "no_identity",
            SkipReason::Duplicate => "duplicate",
            SkipReason::ContentUnavailable => "content_unavailable",
            SkipReason::Disallowed => "disallowed",
            SkipReason::Stale => "stale_handle",
        };
        f.write_str(s)
    }
}

/// Receiver of crawl outcomes
pub trait CrawlEvents {
    /// A document was collected
    fn parsed_doc(&self, title: &str, url: &str);

    /// A leaf candidate was skipped
    fn skipped(&self, _reason: SkipReason, _url: Option<&str>) {}
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEvents;

impl CrawlEvents for LogEvents {
    fn parsed_doc(&self, title: &str, url: &str) {
        log::info!(title = title, url = url; "parsed_doc");
    }

    fn skipped(&self, reason: SkipReason, url: Option<&str>) {
        let reason = reason.to_string();
        log::debug!(reason = reason.as_str(), url = url.unwrap_or(""); "skipped_leaf");
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl CrawlEvents for NoopEvents {
    fn parsed_doc(&self, _title: &str, _url: &str) {}
}
