//! Timed entity spawning under a difficulty curve
//!
//! Each entity category (obstacles, pickups, tokens) runs its own countdown.
//! When it elapses the spawner rolls a lane, a kind and a speed, then resets
//! the countdown to a random interval divided by the current difficulty
//! factor, so spawns come strictly faster as a run progresses (bounded below
//! by `MIN_SPAWN_INTERVAL`).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, ObstacleKind};
use super::lane::Lane;
use crate::consts::{LANE_COUNT, LANE_REROLL_BIAS, MAX_SPAWN_INTERVAL, MIN_SPAWN_INTERVAL};

/// Which kind table a spawner draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKinds {
    /// Uniform over the three obstacle flavors
    Obstacles,
    Pickups,
    /// Uniform over `labels` cosmetic token labels
    Tokens { labels: u8 },
}

/// Balance knobs for one spawner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    pub kinds: SpawnKinds,
    /// Interval sampled uniformly from `[interval_min, interval_max]` before
    /// difficulty scaling
    pub interval_min: f32,
    pub interval_max: f32,
    /// Countdown right after a reset (shorter than a steady-state roll)
    pub initial_countdown: f32,
    /// Linear interval scaling: the divisor is `1 + slope * difficulty`
    pub difficulty_slope: f32,
    /// Progress value entities start at
    pub start_progress: f32,
    /// Speed band at zero difficulty...
    pub speed_min: f32,
    pub speed_max: f32,
    /// ...and how far each end rises by full difficulty. The low end rises
    /// faster, so the band narrows as it shifts up.
    pub speed_min_ramp: f32,
    pub speed_max_ramp: f32,
}

/// A spawn decision: everything the stream needs to create the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub lane: Lane,
    pub kind: EntityKind,
    pub progress: f32,
    pub speed: f32,
}

/// Countdown-driven generator for one entity category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    countdown: f32,
    last_lane: Option<Lane>,
    tuning: SpawnTuning,
}

impl Spawner {
    pub fn new(tuning: SpawnTuning) -> Self {
        Self {
            countdown: tuning.initial_countdown,
            last_lane: None,
            tuning,
        }
    }

    /// Back to the initial (shorter) countdown, forgetting lane history.
    pub fn reset(&mut self) {
        self.countdown = self.tuning.initial_countdown;
        self.last_lane = None;
    }

    /// Advance the countdown by `dt`; when it elapses, roll the next entity.
    ///
    /// `difficulty` is the run's progress-or-score ramp in `[0, 1]`. Pure
    /// given its inputs and the RNG state, which is what makes seeded runs
    /// reproducible.
    pub fn advance(&mut self, dt: f32, difficulty: f32, rng: &mut Pcg32) -> Option<Spawn> {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }

        let t = self.tuning;
        let difficulty = difficulty.clamp(0.0, 1.0);

        let lane = self.roll_lane(rng);
        self.last_lane = Some(lane);

        let kind = match t.kinds {
            SpawnKinds::Obstacles => {
                EntityKind::Obstacle(match rng.random_range(0..3u8) {
                    0 => ObstacleKind::Social,
                    1 => ObstacleKind::Email,
                    _ => ObstacleKind::Meeting,
                })
            }
            SpawnKinds::Pickups => EntityKind::Pickup,
            SpawnKinds::Tokens { labels } => EntityKind::Token(rng.random_range(0..labels.max(1))),
        };

        let lo = t.speed_min + t.speed_min_ramp * difficulty;
        let hi = (t.speed_max + t.speed_max_ramp * difficulty).max(lo);
        let speed = if hi > lo { rng.random_range(lo..hi) } else { lo };

        let factor = 1.0 + t.difficulty_slope * difficulty;
        self.countdown = (rng.random_range(t.interval_min..t.interval_max) / factor)
            .clamp(MIN_SPAWN_INTERVAL, MAX_SPAWN_INTERVAL);

        Some(Spawn {
            lane,
            kind,
            progress: t.start_progress,
            speed,
        })
    }

    /// Uniform lane choice, with a biased re-roll when it repeats the
    /// previous spawn's lane. Repeats stay possible, unbroken runs don't.
    fn roll_lane(&self, rng: &mut Pcg32) -> Lane {
        let lane = Lane::from_index(rng.random_range(0..LANE_COUNT));
        if let Some(prev) = self.last_lane
            && lane == prev
            && rng.random_bool(LANE_REROLL_BIAS)
        {
            // Re-roll among the other three lanes
            let step = rng.random_range(1..LANE_COUNT);
            return Lane::from_index((prev.index() + step) % LANE_COUNT);
        }
        lane
    }
}
