//! Lane Dash - a four-lane reflex arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, collision, session)
//! - `tuning`: Data-driven game balance
//!
//! The crate is presentation-free. Renderers, HUDs and input layers talk to a
//! [`sim::GameSession`] through queued intents and the per-frame snapshot; the
//! simulation never touches a rendering surface.

pub mod sim;
pub mod tuning;

pub use sim::{GameSession, ModeConfig, SessionConfig, Snapshot};
pub use tuning::{CatchTuning, DodgeTuning};

/// Game configuration constants
pub mod consts {
    /// Hard cap on a single frame's simulated time, in seconds. Keeps tab
    /// switches and debugger pauses from integrating a huge jump.
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Number of lanes (2x2 grid)
    pub const LANE_COUNT: usize = 4;
    /// Lane anchor offset from the tunnel center, world units
    pub const LANE_RADIUS: f32 = 1.55;

    /// Probability of re-rolling a spawn lane that matches the previous one
    pub const LANE_REROLL_BIAS: f64 = 0.65;
    /// Spawn countdown window, seconds
    pub const MIN_SPAWN_INTERVAL: f32 = 0.25;
    pub const MAX_SPAWN_INTERVAL: f32 = 2.0;

    /// Per-frame smoothing of the visible player position toward the selected
    /// lane anchor. Cosmetic only; collision always uses the target lane.
    pub const SELECT_SMOOTHING: f32 = 0.16;
}
