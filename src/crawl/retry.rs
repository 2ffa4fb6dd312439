use crate::crawl::backoff::{Backoff, BackoffConfig};
use crate::crawl::deadline::Deadline;
use crate::error::Result;
use std::time::Duration;

/// Runs retry episodes: bounded attempt loops separated by backoff sleeps.
///
/// Each call to [`RetryPolicy::attempt`] starts a fresh episode with the
/// backoff reset to its base delay. An episode never outlives its [`Deadline`]:
/// sleeps are clamped to the remaining budget and a `DeadlineExceeded` error
/// ends the episode at once.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    backoff: Backoff,
    max_tries: usize,
}

impl RetryPolicy {
    pub fn new(backoff: BackoffConfig, max_tries: usize) -> Self {
        Self { backoff: Backoff::new(backoff), max_tries: max_tries.max(1) }
    }

    pub fn reset(&mut self) {
        self.backoff.reset();
    }

    pub fn next_delay(&mut self) -> Duration {
        self.backoff.next_delay()
    }

    /// Run `op` until it succeeds or `max_tries` attempts have failed, sleeping
    /// a backoff delay between attempts. Returns the last error on exhaustion.
    ///
    /// `op` receives the zero-based attempt number.
    pub fn attempt<T>(
        &mut self,
        max_tries: usize,
        deadline: &Deadline,
        mut op: impl FnMut(usize) -> Result<T>,
    ) -> Result<T> {
        self.reset();
        let max_tries = max_tries.max(1);
        let mut attempt = 0;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_deadline_exceeded() || attempt + 1 >= max_tries => return Err(e),
                Err(e) => {
                    let delay = deadline.clamp(self.next_delay());
                    log::debug!("Attempt {}/{} failed: {}; retrying in {:?}", attempt + 1, max_tries, e, delay);
                    std::thread::sleep(delay);
                }
            }
            attempt += 1;
        }
    }

    /// [`RetryPolicy::attempt`] with the configured attempt budget
    pub fn run<T>(&mut self, deadline: &Deadline, op: impl FnMut(usize) -> Result<T>) -> Result<T> {
        let max_tries = self.max_tries;
        self.attempt(max_tries, deadline, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use std::time::Instant;

    fn fast_policy(max_tries: usize) -> RetryPolicy {
        RetryPolicy::new(
            BackoffConfig { base: Duration::from_millis(1), max: Duration::from_millis(2), multiplier: 2.0, jitter: 0.0 },
            max_tries,
        )
    }

    #[test]
    fn test_succeeds_after_failures() {
        let mut policy = fast_policy(5);
        let result = policy.run(&Deadline::unbounded(), |attempt| {
            if attempt < 2 { Err(CrawlError::Timeout("not yet".into())) } else { Ok(attempt) }
        });
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn test_exhaustion_returns_last_error() {
        let mut policy = fast_policy(5);
        let mut calls = 0;
        let result: Result<()> = policy.run(&Deadline::unbounded(), |attempt| {
            calls += 1;
            Err(CrawlError::Timeout(format!("attempt {}", attempt)))
        });

        assert_eq!(calls, 5);
        match result {
            Err(CrawlError::Timeout(msg)) => assert_eq!(msg, "attempt 4"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_each_episode_resets_backoff() {
        let mut policy = fast_policy(3);
        let _: Result<()> = policy.run(&Deadline::unbounded(), |_| Err(CrawlError::Timeout("x".into())));
        policy.reset();
        assert_eq!(policy.next_delay(), Duration::from_millis(1));
    }

    #[test]
    fn test_zero_tries_still_runs_once() {
        let mut policy = fast_policy(0);
        let mut calls = 0;
        let _: Result<()> = policy.attempt(0, &Deadline::unbounded(), |_| {
            calls += 1;
            Err(CrawlError::Timeout("x".into()))
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_deadline_error_ends_episode() {
        let mut policy = fast_policy(5);
        let mut calls = 0;
        let result: Result<()> = policy.run(&Deadline::unbounded(), |_| {
            calls += 1;
            Err(CrawlError::DeadlineExceeded)
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(CrawlError::DeadlineExceeded)));
    }

    #[test]
    fn test_sleeps_are_clamped_to_deadline() {
        let mut policy = RetryPolicy::new(
            BackoffConfig { base: Duration::from_secs(5), max: Duration::from_secs(20), multiplier: 2.0, jitter: 0.0 },
            5,
        );
        let deadline = Deadline::after(Some(Duration::from_millis(50)));
        let started = Instant::now();

        let result: Result<()> = policy.run(&deadline, |_| {
            deadline.check()?;
            Err(CrawlError::Timeout("content".into()))
        });

        assert!(matches!(result, Err(CrawlError::DeadlineExceeded)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
