//! Lane Dash headless demo
//!
//! Drives a dodge-mode session the way a frame scheduler would: synthetic
//! 60 Hz timestamps in, snapshots out, intents enqueued between frames. A
//! trivial auto-policy plays from the snapshot alone, which is exactly the
//! view a real input/render layer gets. Pass a seed as the first argument
//! for a reproducible run; the final snapshot is printed as JSON.

use std::time::{SystemTime, UNIX_EPOCH};

use lane_dash::consts::LANE_COUNT;
use lane_dash::sim::{EntityKind, GameSession, SessionConfig, SessionPhase, Snapshot};

/// 60 Hz frame cadence, two minutes tops
const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 120;

/// How close to the capture threshold an entity must be before the policy
/// reacts to it
const NEAR_WINDOW: f32 = 30.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system clock before unix epoch")
                .as_millis() as u64
        });

    let mut session = GameSession::new(SessionConfig::dodge(seed));
    session.start();

    let mut last = session.tick(0.0);
    for frame in 1..MAX_FRAMES {
        if let Some(lane) = pick_lane(&last) {
            session.select_lane(lane);
        }
        last = session.tick(frame as f64 * FRAME_MS);
        if last.phase.is_terminal() {
            break;
        }
    }

    match last.phase {
        SessionPhase::Won => log::info!("made it to the goal"),
        SessionPhase::Lost => log::info!("ran out of budget"),
        _ => log::warn!("run still open after {} frames", MAX_FRAMES),
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&last).expect("snapshot serializes")
    );
}

/// Snapshot-only policy: stay put unless an obstacle is bearing down on the
/// selected lane, then sidestep into a safe lane, preferring one with a
/// pickup inbound.
fn pick_lane(snapshot: &Snapshot) -> Option<usize> {
    let mut threatened = [false; LANE_COUNT];
    let mut rewarding = [false; LANE_COUNT];

    for entity in &snapshot.entities {
        if entity.progress < -NEAR_WINDOW {
            continue;
        }
        match entity.kind {
            EntityKind::Obstacle(_) => threatened[entity.lane.index()] = true,
            EntityKind::Pickup | EntityKind::Token(_) => rewarding[entity.lane.index()] = true,
        }
    }

    let current = snapshot.selection.target.index();
    if !threatened[current] && rewarding[current] {
        return None;
    }

    let candidate = (0..LANE_COUNT)
        .filter(|&lane| !threatened[lane])
        .max_by_key(|&lane| (rewarding[lane], lane == current));

    match candidate {
        Some(lane) if lane != current => Some(lane),
        _ => None,
    }
}
