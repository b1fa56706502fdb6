//! Idle deadlines
//!
//! The host hands the engine a deadline with every idle callback; the work
//! loop checks it after each fiber.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Remaining-time estimate for the current idle period
pub trait Deadline {
    fn time_remaining(&self) -> Duration;
}

/// Wall-clock deadline
#[derive(Debug, Clone, Copy)]
pub struct InstantDeadline {
    end: Instant,
}

impl InstantDeadline {
    /// Deadline `budget` from now
    pub fn starting_now(budget: Duration) -> Self {
        Self { end: Instant::now() + budget }
    }

    pub fn at(end: Instant) -> Self {
        Self { end }
    }
}

impl Deadline for InstantDeadline {
    fn time_remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }
}

/// Deterministic deadline that expires after a fixed number of checks
///
/// The work loop checks once per fiber, so `slots(n)` lets exactly `n`
/// fibers run before yielding (at least one always runs).
#[derive(Debug)]
pub struct CountdownDeadline {
    remaining: Cell<usize>,
}

impl CountdownDeadline {
    pub fn slots(n: usize) -> Self {
        Self { remaining: Cell::new(n) }
    }
}

impl Deadline for CountdownDeadline {
    fn time_remaining(&self) -> Duration {
        let left = self.remaining.get().saturating_sub(1);
        self.remaining.set(left);
        if left > 0 { Duration::MAX } else { Duration::ZERO }
    }
}

/// Deadline that never expires
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Deadline for Unbounded {
    fn time_remaining(&self) -> Duration {
        Duration::MAX
    }
}
