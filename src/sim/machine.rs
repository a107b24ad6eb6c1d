//! Coarse session state machine
//!
//! Idle until the first start, then Running with excursions to Paused, and
//! finally Won or Lost. Transitions are a total function over (phase, event):
//! anything not listed is a no-op, so callers can fire events without
//! checking applicability first.

use serde::{Deserialize, Serialize};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Fresh session, waiting for the first start
    #[default]
    Idle,
    /// Active gameplay; the only phase in which the simulation steps
    Running,
    /// Frozen mid-run; timers and entity progress hold exactly
    Paused,
    /// Terminal: the run-progress goal was reached (dodge mode)
    Won,
    /// Terminal: the resource ran out
    Lost,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Won | SessionPhase::Lost)
    }
}

/// Transition triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Begin a run; from a terminal phase this implies a full reset
    Start,
    Pause,
    Resume,
    /// Forced pause when the hosting tab is hidden; same target as `Pause`
    TabHidden,
    GoalReached,
    ResourceExhausted,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateMachine {
    phase: SessionPhase,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Apply one event. Returns whether the phase changed; inapplicable
    /// events leave the machine untouched.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        use SessionEvent::*;
        use SessionPhase::*;

        let next = match (self.phase, event) {
            (Idle | Won | Lost, Start) => Running,
            (Running, Pause | TabHidden) => Paused,
            (Paused, Resume) => Running,
            (Running, GoalReached) => Won,
            (Running, ResourceExhausted) => Lost,
            (current, _) => current,
        };

        let changed = next != self.phase;
        self.phase = next;
        changed
    }
}
