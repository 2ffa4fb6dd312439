use crate::error::{CrawlError, Result};
use std::time::{Duration, Instant};

/// Overall time budget of a crawl run. `None` means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    pub fn after(budget: Option<Duration>) -> Self {
        Self { expires_at: budget.map(|b| Instant::now() + b) }
    }

    pub fn unbounded() -> Self {
        Self { expires_at: None }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_zero())
    }

    pub fn check(&self) -> Result<()> {
        if self.is_expired() { Err(CrawlError::DeadlineExceeded) } else { Ok(()) }
    }

    /// Narrow `timeout` so a bounded wait never outlives the run
    pub fn clamp(&self, timeout: Duration) -> Duration {
        match self.remaining() {
            Some(remaining) => timeout.min(remaining),
            None => timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded() {
        let deadline = Deadline::unbounded();
        assert!(!deadline.is_expired());
        assert!(deadline.check().is_ok());
        assert_eq!(deadline.clamp(Duration::from_secs(30)), Duration::from_secs(30));
    }

    #[test]
    fn test_expired() {
        let deadline = Deadline::after(Some(Duration::ZERO));
        assert!(deadline.is_expired());
        assert!(matches!(deadline.check(), Err(CrawlError::DeadlineExceeded)));
        assert_eq!(deadline.clamp(Duration::from_secs(30)), Duration::ZERO);
    }

    #[test]
    fn test_clamp_to_remaining() {
        let deadline = Deadline::after(Some(Duration::from_secs(60)));
        assert!(deadline.clamp(Duration::from_secs(120)) <= Duration::from_secs(60));
        assert_eq!(deadline.clamp(Duration::from_secs(1)), Duration::from_secs(1));
    }
}
