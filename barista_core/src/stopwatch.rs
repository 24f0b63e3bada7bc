//! Shot timer feeding the timer-driven classifier.

use std::time::Instant;

use barista_traits::clock::{Clock, MonotonicClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Idle,
    Running,
    Stopped,
}

/// Start/stop timer over an injectable `Clock`.
///
/// Starting again after a stop begins a fresh measurement.
#[derive(Debug)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    started_at: Option<Instant>,
    frozen_s: Option<f64>,
}

impl Default for Stopwatch<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            started_at: None,
            frozen_s: None,
        }
    }

    pub fn state(&self) -> StopwatchState {
        match (self.started_at, self.frozen_s) {
            (Some(_), None) => StopwatchState::Running,
            (_, Some(_)) => StopwatchState::Stopped,
            (None, None) => StopwatchState::Idle,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.frozen_s = None;
    }

    /// Stop and return the measured seconds. `None` if the watch was not running.
    pub fn stop(&mut self) -> Option<f64> {
        if self.state() != StopwatchState::Running {
            return None;
        }
        let elapsed = self.started_at.map(|t0| self.clock.secs_since(t0))?;
        self.frozen_s = Some(elapsed);
        Some(elapsed)
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.frozen_s = None;
    }

    /// Live reading while running, the frozen reading once stopped, 0 when idle.
    pub fn elapsed_s(&self) -> f64 {
        match (self.frozen_s, self.started_at) {
            (Some(frozen), _) => frozen,
            (None, Some(t0)) => self.clock.secs_since(t0),
            (None, None) => 0.0,
        }
    }
}
