//! Refresh pacing.
//!
//! A reading that sits right on a level boundary jitters between two
//! levels. Refreshing at most once per interval keeps the bar from
//! flickering. Timestamps are `u32` milliseconds and compared with
//! `wrapping_sub`, so the gate keeps working across the ~49-day rollover.

use crate::config::DEFAULT_UPDATE_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateGate {
    interval_ms: u32,
    last_fired_ms: u32,
}

impl UpdateGate {
    /// Start the interval at `now_ms`.
    pub fn new(interval_ms: u32, now_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fired_ms: now_ms,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Takes effect for the interval already running.
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// `true` when `forced` or when a full interval has elapsed.
    ///
    /// Does not restart the interval; call [`reset`](Self::reset) after
    /// acting on a `true` result.
    pub fn should_refresh(&self, now_ms: u32, forced: bool) -> bool {
        forced || now_ms.wrapping_sub(self.last_fired_ms) >= self.interval_ms
    }

    pub fn reset(&mut self, now_ms: u32) {
        self.last_fired_ms = now_ms;
    }
}

impl Default for UpdateGate {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATE_INTERVAL_MS, 0)
    }
}
