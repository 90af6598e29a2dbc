//! Simulation time bookkeeping.

use serde::{Deserialize, Serialize};
use time::Duration;

/// Time-unit constants, in seconds.
pub const SECOND: f64 = 1.0;
pub const MINUTE: f64 = 60.0;
pub const HOUR: f64 = 3_600.0;
pub const DAY: f64 = 86_400.0;
pub const WEEK: f64 = 604_800.0;
/// Julian year (365.25 days).
pub const YEAR: f64 = 31_557_600.0;
pub const CENTURY: f64 = YEAR * 100.0;

/// The single source of simulated time.
///
/// Tracks elapsed simulated time, the per-tick step, a time-scale
/// multiplier, the pause flag, and the tick count. Only the orchestrator
/// advances it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    current: Duration,
    time_step: Duration,
    time_scale: f64,
    paused: bool,
    tick_count: u64,
}

impl SimClock {
    /// A clock starting at `initial` seconds with the given step.
    pub fn new(initial: f64, time_step: f64) -> Self {
        Self {
            current: Duration::seconds_f64(initial),
            time_step: Duration::seconds_f64(time_step),
            time_scale: 1.0,
            paused: false,
            tick_count: 0,
        }
    }

    /// Advance one tick: `current += time_step · time_scale`. No-op while
    /// paused.
    pub fn tick(&mut self) {
        if !self.paused {
            self.current += self.time_step * self.time_scale;
            self.tick_count += 1;
        }
    }

    /// Advance by an explicit delta (seconds), still scaled and still
    /// gated on the pause flag. Does not count as a tick.
    pub fn advance_by(&mut self, seconds: f64) {
        if !self.paused {
            self.current += Duration::seconds_f64(seconds) * self.time_scale;
        }
    }

    /// Zero the elapsed time and tick count. Step, scale, and pause state
    /// are preserved.
    pub fn reset(&mut self) {
        self.current = Duration::ZERO;
        self.tick_count = 0;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Elapsed simulated time in seconds.
    pub fn seconds(&self) -> f64 {
        self.current.as_seconds_f64()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step.as_seconds_f64()
    }

    pub fn set_time_step(&mut self, seconds: f64) {
        self.time_step = Duration::seconds_f64(seconds);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Elapsed simulated time in hours.
    pub fn hours(&self) -> f64 {
        self.seconds() / HOUR
    }

    /// Elapsed simulated time in days.
    pub fn days(&self) -> f64 {
        self.seconds() / DAY
    }

    /// Elapsed simulated time in Julian years.
    pub fn years(&self) -> f64 {
        self.seconds() / YEAR
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0.0, HOUR)
    }
}
