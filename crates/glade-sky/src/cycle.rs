//! Day/night phase bookkeeping.
//!
//! The cycle alternates between two phases, each with its own progress scalar in
//! `[0, 1)` measuring how much of that phase's duration has elapsed. Reaching 1.0
//! flips the phase and resets progress to exactly 0; overshoot is discarded.

/// One of the two mutually exclusive cycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Sun is the active body.
    Day,
    /// Moon is the active body.
    Night,
}

impl Phase {
    /// The other phase.
    pub fn flipped(self) -> Self {
        match self {
            Phase::Day => Phase::Night,
            Phase::Night => Phase::Day,
        }
    }

    /// Returns `true` for [`Phase::Day`].
    pub fn is_daytime(self) -> bool {
        self == Phase::Day
    }
}

/// Snapshot of the cycle: active phase and its progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CyclePhase {
    /// Active phase.
    pub phase: Phase,
    /// Fraction of the active phase elapsed, in `[0, 1)`.
    pub progress: f64,
}

impl CyclePhase {
    /// Start of `phase`.
    pub fn start_of(phase: Phase) -> Self {
        Self {
            phase,
            progress: 0.0,
        }
    }

    /// Advance by `dt` seconds given both phase durations.
    ///
    /// Pure: returns the next snapshot and whether a transition happened. A negative
    /// or NaN `dt` does not move the cycle. A non-positive duration completes the
    /// phase immediately.
    pub fn advanced(self, dt: f64, day_duration: f64, night_duration: f64) -> CycleStep {
        let duration = match self.phase {
            Phase::Day => day_duration,
            Phase::Night => night_duration,
        };
        let dt = dt.max(0.0);
        let progress = if duration > 0.0 {
            self.progress + dt / duration
        } else {
            1.0
        };

        if progress >= 1.0 {
            CycleStep {
                phase: self.phase.flipped(),
                progress: 0.0,
                transitioned: true,
            }
        } else {
            CycleStep {
                phase: self.phase,
                progress,
                transitioned: false,
            }
        }
    }
}

/// Outcome of one [`DayNightCycle::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleStep {
    /// Phase after the step.
    pub phase: Phase,
    /// Progress of that phase after the step.
    pub progress: f64,
    /// Whether the phase flipped during this step.
    pub transitioned: bool,
}

impl CycleStep {
    /// The step as a [`CyclePhase`].
    pub fn cycle_phase(&self) -> CyclePhase {
        CyclePhase {
            phase: self.phase,
            progress: self.progress,
        }
    }
}

/// Two-state day/night machine holding independent per-phase progress.
#[derive(Clone, Debug, PartialEq)]
pub struct DayNightCycle {
    phase: Phase,
    day_progress: f64,
    night_progress: f64,
    /// Whether the cycle is frozen (e.g., while a debug view is open).
    pub paused: bool,
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self::new(Phase::Day)
    }
}

impl DayNightCycle {
    /// Create a cycle at the start of `phase`.
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            day_progress: 0.0,
            night_progress: 0.0,
            paused: false,
        }
    }

    /// Active phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress of the active phase.
    pub fn progress(&self) -> f64 {
        match self.phase {
            Phase::Day => self.day_progress,
            Phase::Night => self.night_progress,
        }
    }

    /// Progress of a specific phase.
    pub fn progress_of(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Day => self.day_progress,
            Phase::Night => self.night_progress,
        }
    }

    /// Active phase and progress as a snapshot.
    pub fn current(&self) -> CyclePhase {
        CyclePhase {
            phase: self.phase,
            progress: self.progress(),
        }
    }

    /// Add `dt / duration` to the active phase's progress, flipping on completion.
    ///
    /// Only bookkeeping happens here; applying the new phase's palette and moving the
    /// celestial bodies is up to the caller.
    pub fn advance(&mut self, dt: f64, day_duration: f64, night_duration: f64) -> CycleStep {
        if self.paused {
            return CycleStep {
                phase: self.phase,
                progress: self.progress(),
                transitioned: false,
            };
        }

        let step = self.current().advanced(dt, day_duration, night_duration);
        if step.transitioned {
            self.reset_to(step.phase);
        } else {
            match self.phase {
                Phase::Day => self.day_progress = step.progress,
                Phase::Night => self.night_progress = step.progress,
            }
        }
        step
    }

    /// Switch phase immediately, exactly as an automatic transition would.
    pub fn toggle(&mut self) -> CycleStep {
        self.reset_to(self.phase.flipped());
        CycleStep {
            phase: self.phase,
            progress: 0.0,
            transitioned: true,
        }
    }

    fn reset_to(&mut self, phase: Phase) {
        self.phase = phase;
        self.day_progress = 0.0;
        self.night_progress = 0.0;
    }
}
