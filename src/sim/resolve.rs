//! Threshold-crossing collision resolution
//!
//! Runs once per frame, after the stream has advanced. Every unconsumed
//! entity at or past the capture threshold gets exactly one outcome, decided
//! against the player's target lane, and the ledger is updated synchronously
//! as each outcome is emitted. Capture is always evaluated before despawn:
//! an entity fast enough to cross both thresholds in one frame is resolved
//! here and only then removed by the stream's sweep.

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, EntityStream, ObstacleKind};
use super::lane::Lane;
use super::ledger::ResourceLedger;

/// One resolved outcome, surfaced to renderers through the frame snapshot so
/// feedback (shake, bursts, sounds) stays outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// Obstacle captured in the player's lane: penalty
    ObstacleStruck(ObstacleKind),
    /// Obstacle crossed in another lane: dodged, no effect
    ObstacleDodged(ObstacleKind),
    /// Pickup captured: reward
    PickupCollected,
    /// Pickup crossed in another lane: lost, no effect
    PickupLost,
    /// Token caught in the player's lane: reward
    TokenCaught(u8),
    /// Token crossed in another lane: penalty (catch mode demands the catch)
    TokenDropped(u8),
}

/// Mode-dependent outcome amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveRules {
    /// Budget seconds an obstacle strike costs
    pub obstacle_penalty: f32,
    /// Budget seconds a collected pickup refills
    pub pickup_bonus: f32,
}

/// Resolve every entity that has reached `capture_at` against the selected
/// lane, applying outcomes to the ledger as they are decided.
pub fn resolve(
    stream: &mut EntityStream,
    selected: Lane,
    capture_at: f32,
    rules: ResolveRules,
    ledger: &mut ResourceLedger,
    events: &mut Vec<CollisionEvent>,
) {
    for entity in stream.entities_mut() {
        if entity.consumed || entity.progress < capture_at {
            continue;
        }
        // Latched before anything else: one outcome per entity, ever
        entity.consumed = true;

        let captured = entity.lane == selected;
        let event = match (entity.kind, captured) {
            (EntityKind::Obstacle(kind), true) => {
                ledger.apply_penalty(rules.obstacle_penalty);
                CollisionEvent::ObstacleStruck(kind)
            }
            (EntityKind::Obstacle(kind), false) => CollisionEvent::ObstacleDodged(kind),
            (EntityKind::Pickup, true) => {
                ledger.apply_bonus(rules.pickup_bonus);
                ledger.increment_score();
                ledger.increment_streak();
                CollisionEvent::PickupCollected
            }
            (EntityKind::Pickup, false) => CollisionEvent::PickupLost,
            (EntityKind::Token(label), true) => {
                ledger.increment_score();
                ledger.increment_streak();
                CollisionEvent::TokenCaught(label)
            }
            (EntityKind::Token(label), false) => {
                ledger.apply_penalty(1.0);
                CollisionEvent::TokenDropped(label)
            }
        };
        events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ledger::Resource;

    const RULES: ResolveRules = ResolveRules {
        obstacle_penalty: 8.0,
        pickup_bonus: 6.0,
    };

    fn budget_seconds(ledger: &ResourceLedger) -> f32 {
        match ledger.resource() {
            Resource::Budget { seconds, .. } => seconds,
            Resource::Lives { .. } => panic!("budget ledger expected"),
        }
    }

    #[test]
    fn test_obstacle_struck_vs_dodged() {
        let mut stream = EntityStream::new();
        let mut ledger = ResourceLedger::budget(30.0, 99.0);
        let mut events = Vec::new();

        stream.push(
            Lane::BOTTOM_RIGHT,
            EntityKind::Obstacle(ObstacleKind::Email),
            1.2,
            24.0,
        );
        stream.push(
            Lane::TOP_LEFT,
            EntityKind::Obstacle(ObstacleKind::Social),
            1.2,
            24.0,
        );

        resolve(
            &mut stream,
            Lane::BOTTOM_RIGHT,
            1.1,
            RULES,
            &mut ledger,
            &mut events,
        );

        assert_eq!(budget_seconds(&ledger), 22.0);
        assert_eq!(ledger.hits(), 1);
        assert_eq!(
            events,
            vec![
                CollisionEvent::ObstacleStruck(ObstacleKind::Email),
                CollisionEvent::ObstacleDodged(ObstacleKind::Social),
            ]
        );
    }

    #[test]
    fn test_pickup_reward_only_in_lane() {
        let mut stream = EntityStream::new();
        let mut ledger = ResourceLedger::budget(30.0, 99.0);
        let mut events = Vec::new();

        stream.push(Lane::TOP_LEFT, EntityKind::Pickup, 1.5, 24.0);
        stream.push(Lane::TOP_RIGHT, EntityKind::Pickup, 1.5, 24.0);

        resolve(
            &mut stream,
            Lane::TOP_LEFT,
            1.1,
            RULES,
            &mut ledger,
            &mut events,
        );

        assert_eq!(budget_seconds(&ledger), 36.0);
        assert_eq!(ledger.score(), 1);
        assert_eq!(ledger.streak(), 1);
        assert_eq!(
            events,
            vec![CollisionEvent::PickupCollected, CollisionEvent::PickupLost]
        );
    }

    #[test]
    fn test_token_must_be_caught() {
        let mut stream = EntityStream::new();
        let mut ledger = ResourceLedger::lives(3);
        let mut events = Vec::new();

        stream.push(Lane::BOTTOM_LEFT, EntityKind::Token(2), 1.0, 0.4);
        stream.push(Lane::TOP_RIGHT, EntityKind::Token(5), 1.0, 0.4);

        resolve(
            &mut stream,
            Lane::BOTTOM_LEFT,
            1.0,
            RULES,
            &mut ledger,
            &mut events,
        );

        assert_eq!(ledger.resource(), Resource::Lives { remaining: 2 });
        assert_eq!(ledger.score(), 1);
        assert_eq!(
            events,
            vec![CollisionEvent::TokenCaught(2), CollisionEvent::TokenDropped(5)]
        );
    }

    #[test]
    fn test_entity_resolved_at_most_once() {
        let mut stream = EntityStream::new();
        let mut ledger = ResourceLedger::budget(30.0, 99.0);
        let mut events = Vec::new();

        stream.push(
            Lane::BOTTOM_RIGHT,
            EntityKind::Obstacle(ObstacleKind::Meeting),
            1.2,
            24.0,
        );

        resolve(
            &mut stream,
            Lane::BOTTOM_RIGHT,
            1.1,
            RULES,
            &mut ledger,
            &mut events,
        );
        // Same frame, second pass (should never happen, but must be safe)
        resolve(
            &mut stream,
            Lane::BOTTOM_RIGHT,
            1.1,
            RULES,
            &mut ledger,
            &mut events,
        );

        assert_eq!(events.len(), 1);
        assert_eq!(budget_seconds(&ledger), 22.0);
        assert!(stream.entities()[0].consumed);
    }

    #[test]
    fn test_overshoot_past_despawn_still_captures() {
        let mut stream = EntityStream::new();
        let mut ledger = ResourceLedger::budget(30.0, 99.0);
        let mut events = Vec::new();

        // A very fast entity that jumped from below capture (1.1) to past
        // despawn (6.5) in a single frame
        stream.push(
            Lane::BOTTOM_RIGHT,
            EntityKind::Obstacle(ObstacleKind::Social),
            8.0,
            200.0,
        );

        resolve(
            &mut stream,
            Lane::BOTTOM_RIGHT,
            1.1,
            RULES,
            &mut ledger,
            &mut events,
        );
        stream.sweep(6.5);

        assert_eq!(events.len(), 1);
        assert_eq!(budget_seconds(&ledger), 22.0);
        assert!(stream.is_empty());
    }
}
