//! Entities and the live entity stream
//!
//! Everything that travels down a lane is an [`Entity`]: a lane index, a kind,
//! and a scalar `progress` that advances by `dt * speed` every frame until it
//! crosses the capture threshold (collision resolution) and then the despawn
//! threshold (silent removal).

use serde::{Deserialize, Serialize};

use super::lane::Lane;

/// Obstacle flavors (dodge mode). Purely cosmetic beyond the penalty they
/// share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Social,
    Email,
    Meeting,
}

/// What an entity is, and therefore which outcome branch it takes at the
/// capture threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Penalizes when captured in the player's lane, harmless when dodged
    Obstacle(ObstacleKind),
    /// Refills budget when captured, harmless when missed
    Pickup,
    /// Must be caught: rewards on capture, penalizes on a miss. The label is
    /// cosmetic.
    Token(u8),
}

/// A single traveling entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub lane: Lane,
    pub kind: EntityKind,
    /// Scalar travel coordinate; monotone toward the capture threshold
    pub progress: f32,
    /// Progress units per second
    pub speed: f32,
    /// Set exactly once, the frame the entity is collision-resolved
    pub consumed: bool,
}

/// Ordered collection of live entities (stable by spawn order / id).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStream {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly spawned entity and return its id. Ids are never
    /// reused within a session.
    pub fn push(&mut self, lane: Lane, kind: EntityKind, progress: f32, speed: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            lane,
            kind,
            progress,
            speed,
            consumed: false,
        });
        id
    }

    /// Advance every live entity by one frame.
    pub fn step(&mut self, dt: f32) {
        for entity in &mut self.entities {
            entity.progress += dt * entity.speed;
        }
    }

    /// Drop consumed entities and anything that drifted past the despawn
    /// threshold unconsumed. Runs after collision resolution, so an entity
    /// that crossed both thresholds in one frame has already been evaluated.
    pub fn sweep(&mut self, despawn_at: f32) {
        self.entities
            .retain(|e| !e.consumed && e.progress < despawn_at);
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
