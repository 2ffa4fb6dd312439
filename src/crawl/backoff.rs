use rand::Rng;
use std::time::Duration;

/// Smallest delay [`Backoff::next_delay`] will hand out after jitter
const MIN_DELAY: Duration = Duration::from_millis(1);

/// Settings for exponential backoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffConfig {
    pub base: Duration,
    pub max: Duration,
    /// Growth factor per failed attempt (> 1)
    pub multiplier: f64,
    /// Relative randomization applied to each delay (0..1)
    pub jitter: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self { base: Duration::from_millis(500), max: Duration::from_secs(20), multiplier: 2.0, jitter: 0.2 }
    }
}

/// Exponential backoff with jitter.
///
/// `next_delay` returns the current nominal delay randomized by `±jitter`, then
/// grows the nominal value by `multiplier`, saturating at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    config: BackoffConfig,
    current: Duration,
}

impl Backoff {
    pub fn new(config: BackoffConfig) -> Self {
        let config = BackoffConfig {
            base: config.base.min(config.max),
            max: config.max,
            multiplier: config.multiplier.max(1.0),
            jitter: if config.jitter.is_nan() { 0.0 } else { config.jitter.clamp(0.0, 1.0) },
        };
        Self { current: config.base, config }
    }

    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }

    /// Nominal (pre-jitter) value the next call to [`Backoff::next_delay`] is based on
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Return to the base delay
    pub fn reset(&mut self) {
        self.current = self.config.base;
    }

    pub fn next_delay(&mut self) -> Duration {
        let nominal = self.current;
        let grown = nominal.as_secs_f64() * self.config.multiplier;
        self.current = saturating_secs(grown).min(self.config.max);

        jittered(nominal, self.config.jitter)
    }
}

fn jittered(nominal: Duration, jitter: f64) -> Duration {
    if jitter <= 0.0 || nominal.is_zero() {
        return nominal;
    }
    let factor = 1.0 + rand::thread_rng().gen_range(-jitter..=jitter);
    saturating_secs(nominal.as_secs_f64() * factor).max(MIN_DELAY)
}

/// Seconds to a `Duration`, saturating at `Duration::MAX`
fn saturating_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 { Duration::MAX } else { Duration::ZERO })
}
