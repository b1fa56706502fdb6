//! Host idle loop
//!
//! Stands in for the host's idle-callback facility: every tick hands the
//! runtime a wall-clock deadline of `Config::idle_budget`, and ticking goes on
//! whether or not there is work.

use std::time::Duration;

use sprig_core::{Config, InstantDeadline, WorkOutcome};

use crate::{Runtime, RuntimeResult};

/// Repeatedly issues idle callbacks to a runtime
#[derive(Debug, Clone)]
pub struct IdleLoop {
    budget: Duration,
    ticks: u64,
}

impl IdleLoop {
    pub fn new(config: &Config) -> Self {
        Self {
            budget: config.idle_budget,
            ticks: 0,
        }
    }

    /// Run one idle callback
    pub fn tick(&mut self, runtime: &mut Runtime) -> RuntimeResult<WorkOutcome> {
        self.ticks += 1;
        let deadline = InstantDeadline::starting_now(self.budget);
        let outcome = runtime.on_idle(&deadline)?;
        tracing::trace!(tick = self.ticks, ?outcome, "idle tick");
        Ok(outcome)
    }

    /// Tick until `done` returns true
    ///
    /// Sleeps for one budget between ticks that found nothing to do.
    pub fn run_until(
        &mut self,
        runtime: &mut Runtime,
        mut done: impl FnMut(&Runtime) -> bool,
    ) -> RuntimeResult<()> {
        while !done(runtime) {
            if let WorkOutcome::Idle = self.tick(runtime)? {
                std::thread::sleep(self.budget);
            }
        }
        Ok(())
    }

    /// Idle callbacks issued so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
