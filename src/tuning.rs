//! Data-driven game balance
//!
//! Every gameplay number lives here so variants can be rebalanced without
//! touching simulation logic. Defaults: a 30 second budget against a 900
//! unit deadline in dodge mode, three lives in catch mode.

use serde::{Deserialize, Serialize};

use crate::sim::{SpawnKinds, SpawnTuning};

/// Dodge-mode balance: a draining time budget against a distance goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodgeTuning {
    /// Budget at run start, seconds
    pub start_budget: f32,
    /// Refill ceiling, seconds
    pub budget_cap: f32,
    /// Continuous drain, seconds of budget per second of play
    pub drain_per_sec: f32,
    /// Budget cost of one obstacle strike
    pub hit_penalty: f32,
    /// Budget refill per collected pickup
    pub pickup_bonus: f32,
    /// Distance at which the run is won
    pub goal_distance: f32,
    /// Run speed at zero progress, units/sec
    pub run_speed_base: f32,
    /// Extra run speed at full progress
    pub run_speed_ramp: f32,
    /// Per-frame easing of the run speed toward its target
    pub run_speed_smoothing: f32,
    /// Progress coordinate where entities are collision-resolved
    pub capture_at: f32,
    /// Progress coordinate where unconsumed entities vanish
    pub despawn_at: f32,
    pub obstacles: SpawnTuning,
    pub pickups: SpawnTuning,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            start_budget: 30.0,
            budget_cap: 99.0,
            drain_per_sec: 1.0,
            hit_penalty: 8.0,
            pickup_bonus: 6.0,
            goal_distance: 900.0,
            run_speed_base: 22.0,
            run_speed_ramp: 18.0,
            run_speed_smoothing: 0.04,
            capture_at: 1.1,
            despawn_at: 6.5,
            obstacles: SpawnTuning {
                kinds: SpawnKinds::Obstacles,
                interval_min: 0.55,
                interval_max: 1.05,
                initial_countdown: 0.7,
                difficulty_slope: 1.0,
                start_progress: -92.0,
                speed_min: 20.0,
                speed_max: 26.0,
                speed_min_ramp: 16.0,
                speed_max_ramp: 14.0,
            },
            // Pickups keep a steady cadence; only obstacles speed up
            pickups: SpawnTuning {
                kinds: SpawnKinds::Pickups,
                interval_min: 0.65,
                interval_max: 1.35,
                initial_countdown: 0.7,
                difficulty_slope: 0.0,
                start_progress: -85.0,
                speed_min: 20.0,
                speed_max: 26.0,
                speed_min_ramp: 16.0,
                speed_max_ramp: 14.0,
            },
        }
    }
}

/// Catch-mode balance: a fixed stock of lives against an endless token
/// stream whose difficulty ramps with score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatchTuning {
    pub lives: u32,
    /// Normalized travel: tokens run 0 -> 1, resolved at 1
    pub capture_at: f32,
    pub despawn_at: f32,
    /// Score points it takes to reach full difficulty
    pub full_difficulty_score: u32,
    pub tokens: SpawnTuning,
}

impl Default for CatchTuning {
    fn default() -> Self {
        Self {
            lives: 3,
            capture_at: 1.0,
            despawn_at: 1.08,
            full_difficulty_score: 25,
            tokens: SpawnTuning {
                kinds: SpawnKinds::Tokens { labels: 8 },
                interval_min: 0.8,
                interval_max: 1.6,
                initial_countdown: 0.7,
                difficulty_slope: 1.0,
                start_progress: 0.0,
                speed_min: 0.30,
                speed_max: 0.42,
                speed_min_ramp: 0.25,
                speed_max_ramp: 0.20,
            },
        }
    }
}
