//! Delay policies between reconciler ticks.

use backoff::backoff::Backoff;
use std::time::Duration;

/// Decides how long to wait before the next tick.
pub trait RetryPolicy: Send {
    fn next_delay(&mut self, last_tick_failed: bool) -> Duration;

    fn name(&self) -> &'static str;
}

/// Same interval after every tick, failed or not. No backoff.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl RetryPolicy for FixedInterval {
    fn next_delay(&mut self, _last_tick_failed: bool) -> Duration {
        self.interval
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Poll interval while healthy; doubling delays (capped) while ticks fail.
pub struct ExponentialRetry {
    interval: Duration,
    max: Duration,
    backoff: backoff::ExponentialBackoff,
}

impl ExponentialRetry {
    pub fn new(interval: Duration, max: Duration) -> Self {
        let max = max.max(interval);
        let backoff = backoff::ExponentialBackoff {
            current_interval: interval,
            initial_interval: interval,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: max,
            max_elapsed_time: None,
            ..Default::default()
        };

        Self {
            interval,
            max,
            backoff,
        }
    }
}

impl RetryPolicy for ExponentialRetry {
    fn next_delay(&mut self, last_tick_failed: bool) -> Duration {
        if !last_tick_failed {
            self.backoff.reset();
            return self.interval;
        }
        self.backoff.next_backoff().unwrap_or(self.max)
    }

    fn name(&self) -> &'static str {
        "exponential"
    }
}
