//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped frame delta only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod entity;
pub mod lane;
pub mod ledger;
pub mod machine;
pub mod resolve;
pub mod session;
pub mod spawn;

pub use clock::FrameClock;
pub use entity::{Entity, EntityKind, EntityStream, ObstacleKind};
pub use lane::{Column, Direction, Lane, Row, Selection};
pub use ledger::{Resource, ResourceLedger, ResourceSnapshot};
pub use machine::{SessionEvent, SessionPhase, StateMachine};
pub use resolve::{CollisionEvent, ResolveRules, resolve};
pub use session::{
    EntitySnapshot, GameSession, Intent, ModeConfig, SelectionSnapshot, SessionConfig, Snapshot,
};
pub use spawn::{Spawn, SpawnKinds, SpawnTuning, Spawner};
