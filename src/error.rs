use thiserror::Error;

/// Errors produced while driving the browser, crawling, or persisting documents
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Navigation container not visible: {0}")]
    NavContainerNotVisible(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Node handle {node_id} is stale (generation {handle_generation}, session is at {current_generation})")]
    StaleNode {
        node_id: u32,
        handle_generation: u64,
        current_generation: u64,
    },

    #[error("Click failed: {0}")]
    ClickFailed(String),

    #[error("Isolated fetch of {url} failed: {reason}")]
    IsolatedFetchFailed { url: String, reason: String },

    #[error("Overall crawl deadline exceeded")]
    DeadlineExceeded,

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CrawlError {
    /// Whether the overall run budget ran out; retrying cannot help
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, CrawlError::DeadlineExceeded)
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CrawlError::NavContainerNotVisible("div.tree".to_string());
        assert_eq!(err.to_string(), "Navigation container not visible: div.tree");

        let err = CrawlError::UnknownFormat("xml".to_string());
        assert_eq!(err.to_string(), "Unknown output format: xml");
    }

    #[test]
    fn test_is_deadline_exceeded() {
        assert!(CrawlError::DeadlineExceeded.is_deadline_exceeded());
        assert!(!CrawlError::Timeout("wait".into()).is_deadline_exceeded());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CrawlError = io.into();
        assert!(matches!(err, CrawlError::Io(_)));
    }
}
