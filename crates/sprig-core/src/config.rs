//! Engine Configuration

use std::time::Duration;

/// Scheduler configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Yield to the host once the deadline reports less than this
    pub yield_threshold: Duration,

    /// Length of one host idle period
    pub idle_budget: Duration,

    /// Upper bound on idle ticks when running until idle
    pub max_idle_ticks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            yield_threshold: Duration::from_millis(1),
            idle_budget: Duration::from_millis(16),
            max_idle_ticks: 10_000,
        }
    }
}

impl Config {
    pub fn with_yield_threshold(mut self, threshold: Duration) -> Self {
        self.yield_threshold = threshold;
        self
    }

    pub fn with_idle_budget(mut self, budget: Duration) -> Self {
        self.idle_budget = budget;
        self
    }

    pub fn with_max_idle_ticks(mut self, ticks: usize) -> Self {
        self.max_idle_ticks = ticks;
        self
    }
}
