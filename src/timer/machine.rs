use crate::models::{Durations, Mode};

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Ignored,
    /// One second was counted down
    Counted,
    /// The countdown reached zero and the timer stopped
    Expired,
}

/// Countdown state.
///
/// Two states: idle and running. `seconds_remaining` only decreases while
/// running, and every mode switch reloads the full preset and stops the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    mode: Mode,
    seconds_remaining: u32,
    running: bool,
}

impl Timer {
    /// Idle focus timer with the full focus duration loaded
    pub fn new(durations: &Durations) -> Self {
        Self::from_parts(Mode::Focus, durations.seconds(Mode::Focus))
    }

    /// Idle timer with an arbitrary remaining count
    pub fn from_parts(mode: Mode, seconds_remaining: u32) -> Self {
        Self {
            mode,
            seconds_remaining,
            running: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Idle → running. Returns false if already running.
    ///
    /// A finished countdown is reloaded first so it can be run again.
    pub fn start(&mut self, durations: &Durations) -> bool {
        if self.running {
            return false;
        }
        if self.seconds_remaining == 0 {
            self.seconds_remaining = durations.seconds(self.mode);
        }
        self.running = true;
        true
    }

    /// Running → idle. Returns false if already idle.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Stop and reload the current mode's duration
    pub fn reset(&mut self, durations: &Durations) {
        self.running = false;
        self.seconds_remaining = durations.seconds(self.mode);
    }

    /// Switch preset; always stops and reloads
    pub fn select_mode(&mut self, mode: Mode, durations: &Durations) {
        self.mode = mode;
        self.reset(durations);
    }

    /// New durations were saved. An idle timer picks up the new length for
    /// its current mode; a running one keeps counting.
    pub fn apply_durations(&mut self, durations: &Durations) {
        if !self.running {
            self.seconds_remaining = durations.seconds(self.mode);
        }
    }

    /// Count down one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted
        }
    }
}
