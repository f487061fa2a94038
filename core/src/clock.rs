use alloc::{format, string::String};
use serde::{Deserialize, Serialize};

/// Interval between two clock ticks, in milliseconds.
pub const TICK_MS: u32 = 1000;

/// Elapsed-time counter of a game. It only counts ticks, the scheduler decides when they happen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    elapsed_secs: u32,
    running: bool,
}

impl GameClock {
    pub const fn new() -> Self {
        Self {
            elapsed_secs: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Forces the elapsed time back to zero without touching the running state.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
    }

    /// Advances the clock by one tick, returns whether it was running.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.running
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }
}

/// Formats seconds as zero padded `MM:SS`.
pub fn format_elapsed(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
