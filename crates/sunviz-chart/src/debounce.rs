#![forbid(unsafe_code)]

//! Trailing-edge redraw debounce.
//!
//! Data, config, and resize triggers all reset one shared delay; the draw
//! runs only after the trigger stream has been quiet for the full window.
//! Time is caller-ticked, matching the rest of the engine.

use std::time::Duration;

/// Quiet window between the last trigger and the draw.
pub const REDRAW_DELAY: Duration = Duration::from_millis(300);

/// A resettable trailing-edge timer.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    delay: Duration,
    remaining: Option<Duration>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            remaining: None,
        }
    }

    /// Arm (or re-arm) the timer for a full delay window.
    pub fn trigger(&mut self) {
        self.remaining = Some(self.delay);
    }

    /// Whether a draw is scheduled.
    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance time. Returns true exactly once per armed window, at expiry.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(remaining) if dt >= remaining => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - dt);
                false
            }
            None => false,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(REDRAW_DELAY)
    }
}
