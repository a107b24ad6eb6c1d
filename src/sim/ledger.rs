//! Run resource bookkeeping
//!
//! One scalar resource (a draining time budget, or discrete lives) plus the
//! score, streak and hit counters. Every operation saturates; the exposed
//! values never leave their configured ranges, and loss is reported through
//! [`ResourceLedger::exhausted`] rather than an error.

use serde::{Deserialize, Serialize};

/// The run's scalar resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resource {
    /// Dodge mode: seconds of budget, clamped to `[0, cap]`
    Budget { seconds: f32, cap: f32 },
    /// Catch mode: remaining lives, never refilled
    Lives { remaining: u32 },
}

/// Read-only resource view for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub resource: Resource,
    pub score: u32,
    pub streak: u32,
    pub hits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLedger {
    resource: Resource,
    score: u32,
    streak: u32,
    hits: u32,
}

impl ResourceLedger {
    /// Dodge-mode ledger: `start` seconds of budget, refillable up to `cap`.
    pub fn budget(start: f32, cap: f32) -> Self {
        Self {
            resource: Resource::Budget {
                seconds: start.clamp(0.0, cap),
                cap,
            },
            score: 0,
            streak: 0,
            hits: 0,
        }
    }

    /// Catch-mode ledger with a fixed stock of lives.
    pub fn lives(count: u32) -> Self {
        Self {
            resource: Resource::Lives { remaining: count },
            score: 0,
            streak: 0,
            hits: 0,
        }
    }

    /// Refill the budget, clamped at the cap. Lives are never incremented;
    /// a bonus is a no-op for them.
    pub fn apply_bonus(&mut self, amount: f32) {
        if let Resource::Budget { seconds, cap } = &mut self.resource {
            *seconds = (*seconds + amount).min(*cap);
        }
    }

    /// One penalty: costs `amount` seconds of budget (floored at zero) or a
    /// single life, counts a hit, and breaks the streak.
    pub fn apply_penalty(&mut self, amount: f32) {
        match &mut self.resource {
            Resource::Budget { seconds, .. } => *seconds = (*seconds - amount).max(0.0),
            Resource::Lives { remaining } => *remaining = remaining.saturating_sub(1),
        }
        self.hits = self.hits.saturating_add(1);
        self.streak = 0;
    }

    /// Continuous budget drain; not a penalty (no hit, streak untouched).
    /// No-op for lives.
    pub fn drain(&mut self, seconds_elapsed: f32) {
        if let Resource::Budget { seconds, .. } = &mut self.resource {
            *seconds = (*seconds - seconds_elapsed).max(0.0);
        }
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn increment_streak(&mut self) {
        self.streak = self.streak.saturating_add(1);
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Loss condition: budget at zero, or no lives left.
    pub fn exhausted(&self) -> bool {
        match self.resource {
            Resource::Budget { seconds, .. } => seconds <= 0.0,
            Resource::Lives { remaining } => remaining == 0,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            resource: self.resource,
            score: self.score,
            streak: self.streak,
            hits: self.hits,
        }
    }
}
