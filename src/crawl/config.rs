use crate::crawl::backoff::BackoffConfig;
use std::time::Duration;

/// How the navigation container is scrolled to materialize lazily rendered nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Upper bound on scroll steps per scroll-to-end
    pub max_attempts: usize,
    /// Pixels per step
    pub step: i64,
    /// Pause after each step
    pub pause: Duration,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { max_attempts: 20, step: 1000, pause: Duration::from_millis(50) }
    }
}

/// Tuning knobs for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Pause after each click so the page can react
    pub click_delay: Duration,

    /// Stop after this many documents (0 = unbounded)
    pub limit: usize,

    /// Budget for the whole run (`None` = unbounded)
    pub overall_timeout: Option<Duration>,

    /// Wait for the navigation container after the initial navigation
    pub nav_wait: Duration,

    /// Wait for the navigation container after recovering from a disallowed URL
    pub recover_wait: Duration,

    /// Wait for the content container per attempt
    pub content_wait: Duration,

    /// Wait for the title per attempt
    pub title_wait: Duration,

    /// Bound on one isolated fetch
    pub isolated_timeout: Duration,

    /// Attempts per content read
    pub content_attempts: usize,

    pub backoff: BackoffConfig,

    pub scroll: ScrollConfig,

    /// Safety cap on expansion passes
    pub max_expand_passes: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            click_delay: Duration::from_millis(150),
            limit: 0,
            overall_timeout: Some(Duration::from_secs(120)),
            nav_wait: Duration::from_secs(30),
            recover_wait: Duration::from_secs(15),
            content_wait: Duration::from_secs(30),
            title_wait: Duration::from_secs(10),
            isolated_timeout: Duration::from_secs(30),
            content_attempts: 5,
            backoff: BackoffConfig::default(),
            scroll: ScrollConfig::default(),
            max_expand_passes: 200,
        }
    }
}

impl CrawlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set click delay
    pub fn click_delay(mut self, delay: Duration) -> Self {
        self.click_delay = delay;
        self
    }

    /// Builder method: set document limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder method: set overall timeout (zero disables it)
    pub fn overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Builder method: set backoff
    pub fn backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    /// Builder method: set scroll behaviour
    pub fn scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Builder method: set every bounded wait to `wait`
    pub fn waits(mut self, wait: Duration) -> Self {
        self.nav_wait = wait;
        self.recover_wait = wait;
        self.content_wait = wait;
        self.title_wait = wait;
        self.isolated_timeout = wait;
        self
    }

    /// Whether `collected` documents satisfy the limit
    pub fn limit_reached(&self, collected: usize) -> bool {
        self.limit > 0 && collected >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.click_delay, Duration::from_millis(150));
        assert_eq!(config.limit, 0);
        assert_eq!(config.overall_timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.content_attempts, 5);
        assert_eq!(config.scroll.max_attempts, 20);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = CrawlConfig::new().overall_timeout(Duration::ZERO);
        assert_eq!(config.overall_timeout, None);
    }

    #[test]
    fn test_limit_reached() {
        assert!(!CrawlConfig::new().limit(0).limit_reached(1000));
        assert!(!CrawlConfig::new().limit(3).limit_reached(2));
        assert!(CrawlConfig::new().limit(3).limit_reached(3));
    }
}
