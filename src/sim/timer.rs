//! Per-turn countdown

use serde::{Deserialize, Serialize};

/// Result of advancing the countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerStatus {
    /// Still counting (or not running this tick)
    Running,
    /// Hit zero this tick; `overshoot` is the time (ms) spent past zero
    Expired { overshoot: f64 },
}

/// Countdown that only runs while the player is expected to move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnTimer {
    /// Remaining ms; may go negative in storage, never on display
    time_left: f64,
    max_time: f64,
}

impl TurnTimer {
    pub fn new(max_time: f64) -> Self {
        Self {
            time_left: max_time,
            max_time,
        }
    }

    pub fn reset(&mut self) {
        self.time_left = self.max_time;
    }

    /// Count down by `dt` ms when `running`; reports expiry on the tick it happens
    pub fn tick(&mut self, dt: f64, running: bool) -> TimerStatus {
        if !running || self.time_left <= 0.0 {
            return TimerStatus::Running;
        }
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            TimerStatus::Expired {
                overshoot: -self.time_left,
            }
        } else {
            TimerStatus::Running
        }
    }

    /// Remaining time for display, clamped at 0
    pub fn time_left(&self) -> f64 {
        self.time_left.max(0.0)
    }

    /// Remaining fraction of the budget in [0, 1]
    pub fn fraction(&self) -> f64 {
        (self.time_left() / self.max_time).clamp(0.0, 1.0)
    }
}
