//! Timed playback through a series.
//!
//! The scheduler owns no timer thread. The host calls [`CineScheduler::poll`]
//! with the current instant from its event loop and applies every tick that
//! has come due since the last call.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::consts::CINE_INTERVAL_MS;
use crate::series::Series;

#[derive(Clone, Debug)]
pub struct CineScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for CineScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(CINE_INTERVAL_MS))
    }
}

impl CineScheduler {
    /// A zero interval would never let time catch up with the ticks and
    /// falls back to the default.
    pub fn new(interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("Zero cine interval, using {CINE_INTERVAL_MS} ms");
            Duration::from_millis(CINE_INTERVAL_MS)
        } else {
            interval
        };
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Begin playback. A series of one slice or fewer has nothing to play
    /// and leaves the scheduler stopped. Returns whether playback runs.
    pub fn start(&mut self, series_len: usize, now: Instant) -> bool {
        if series_len <= 1 {
            return false;
        }
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
            info!(interval_ms = self.interval.as_millis() as u64, "Cine started");
        }
        true
    }

    /// Cancel future ticks. Stopping twice is harmless.
    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            info!("Cine stopped");
        }
    }

    /// Advance one slice with wraparound.
    pub fn tick<S>(&self, series: &mut Series<S>) -> Option<usize> {
        series.advance_wrapping()
    }

    /// Apply every tick due at `now`, one slice per tick, and return the
    /// visited indices in order.
    pub fn poll<S>(&mut self, now: Instant, series: &mut Series<S>) -> Vec<usize> {
        let mut visited = Vec::new();
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            if let Some(index) = self.tick(series) {
                visited.push(index);
            }
            self.next_due = Some(due + self.interval);
        }
        visited
    }
}
