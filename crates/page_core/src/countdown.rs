//! Reload countdown state machine.
//!
//! Pure state, no IO: each transition returns what the host should do with
//! its display or page. [`crate::PageSession`] wires the outcomes to the UI
//! seams and drives `tick` from the one-second ticker.

/// Text shown in place of the remaining seconds while the countdown is paused.
pub const PAUSED_SENTINEL: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
}

/// Caption for the pause toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseLabel {
    Pause,
    Restart,
}

impl PauseLabel {
    pub fn caption(self) -> &'static str {
        match self {
            PauseLabel::Pause => "Pause",
            PauseLabel::Restart => "Restart",
        }
    }
}

/// Outcome of one one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Show the updated remaining-seconds value.
    Show(u64),
    /// Paused: show the sentinel instead of a number.
    ShowPaused,
    /// The countdown expired: show zero and reload the page.
    Reload,
}

/// Outcome of the user pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Frozen: show the sentinel, relabel the control to `Restart`.
    Paused,
    /// Resumed from the top: show the full timeout, relabel to `Pause`.
    Restarted { remaining: u64 },
}

/// Seconds-until-reload state for one page lifetime.
///
/// `timeout` must be positive and stays constant; `remaining` never leaves
/// `0..=timeout` while running.
#[derive(Debug)]
pub struct ReloadCountdown {
    timeout: u64,
    remaining: u64,
    phase: Phase,
}

impl ReloadCountdown {
    pub fn new(timeout: u64) -> Self {
        Self {
            timeout,
            remaining: timeout,
            phase: Phase::Running,
        }
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance one second. The reload outcome ends the page's life; the
    /// countdown re-arms at the full timeout so a host that survives the
    /// reload observes a fresh page cycle.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == Phase::Paused {
            return TickOutcome::ShowPaused;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.timeout;
            return TickOutcome::Reload;
        }
        TickOutcome::Show(self.remaining)
    }

    /// The pause control: freeze while running, restart from the full
    /// timeout while paused.
    pub fn toggle_pause(&mut self) -> ToggleOutcome {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                ToggleOutcome::Paused
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.remaining = self.timeout;
                ToggleOutcome::Restarted {
                    remaining: self.remaining,
                }
            }
        }
    }
}
