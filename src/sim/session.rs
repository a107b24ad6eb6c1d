//! Session orchestration
//!
//! One [`GameSession`] owns every simulation component and is the only thing
//! the outside world (scheduler, input layer, renderer, HUD) talks to. Input
//! handlers enqueue intents at any time; the queue drains at the top of the
//! next `tick`, so nothing mutates simulation state mid-frame. Each `tick`
//! returns an owned snapshot; mutating it has no effect on the session.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::entity::{EntityKind, EntityStream};
use super::lane::{Direction, Lane, Selection};
use super::ledger::{Resource, ResourceLedger, ResourceSnapshot};
use super::machine::{SessionEvent, SessionPhase, StateMachine};
use super::resolve::{CollisionEvent, ResolveRules, resolve};
use super::spawn::Spawner;
use crate::tuning::{CatchTuning, DodgeTuning};

/// Lane the player holds at session creation and after every reset
const DEFAULT_LANE: Lane = Lane::BOTTOM_RIGHT;

/// Which variant a session runs, with its balance numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModeConfig {
    Dodge(DodgeTuning),
    Catch(CatchTuning),
}

impl ModeConfig {
    fn name(&self) -> &'static str {
        match self {
            ModeConfig::Dodge(_) => "dodge",
            ModeConfig::Catch(_) => "catch",
        }
    }

    fn starting_ledger(&self) -> ResourceLedger {
        match self {
            ModeConfig::Dodge(t) => ResourceLedger::budget(t.start_budget, t.budget_cap),
            ModeConfig::Catch(t) => ResourceLedger::lives(t.lives),
        }
    }

    fn spawners(&self) -> Vec<Spawner> {
        match self {
            ModeConfig::Dodge(t) => vec![Spawner::new(t.obstacles), Spawner::new(t.pickups)],
            ModeConfig::Catch(t) => vec![Spawner::new(t.tokens)],
        }
    }

    fn base_run_speed(&self) -> f32 {
        match self {
            ModeConfig::Dodge(t) => t.run_speed_base,
            ModeConfig::Catch(_) => 0.0,
        }
    }
}

/// Everything needed to build a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: ModeConfig,
    /// RNG seed; a fixed seed makes the whole run reproducible
    pub seed: u64,
    /// Carried through to the snapshot for renderers; the simulation never
    /// reads it
    pub reduced_motion: bool,
}

impl SessionConfig {
    pub fn dodge(seed: u64) -> Self {
        Self {
            mode: ModeConfig::Dodge(DodgeTuning::default()),
            seed,
            reduced_motion: false,
        }
    }

    pub fn catch(seed: u64) -> Self {
        Self {
            mode: ModeConfig::Catch(CatchTuning::default()),
            seed,
            reduced_motion: false,
        }
    }
}

/// Queued input/lifecycle command, drained at the top of the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectLane(usize),
    Navigate(Direction),
    Start,
    TogglePause,
    ForcePause,
}

/// Per-entity view in the snapshot. No id on purpose: renderers must not
/// track entities across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub lane: Lane,
    pub kind: EntityKind,
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    /// Authoritative lane used for collision
    pub target: Lane,
    /// Smoothed position for drawing the player
    pub visual: Vec2,
}

/// Read-only frame output for renderers and HUDs.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub resource: ResourceSnapshot,
    /// Dodge: distance toward the goal. Catch: the difficulty ramp. 0-100.
    pub run_progress_pct: f32,
    pub entities: Vec<EntitySnapshot>,
    pub selection: SelectionSnapshot,
    /// Collision outcomes of this frame, for feedback effects
    pub events: Vec<CollisionEvent>,
    pub reduced_motion: bool,
}

/// One live game: the orchestrator the external frame scheduler drives.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    machine: StateMachine,
    clock: FrameClock,
    ledger: ResourceLedger,
    selection: Selection,
    stream: EntityStream,
    spawners: Vec<Spawner>,
    rng: Pcg32,
    run_progress: f32,
    run_speed: f32,
    intents: VecDeque<Intent>,
    events: Vec<CollisionEvent>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        log::info!(
            "session created: {} mode, seed {}",
            config.mode.name(),
            config.seed
        );
        Self {
            machine: StateMachine::new(),
            clock: FrameClock::new(),
            ledger: config.mode.starting_ledger(),
            selection: Selection::new(DEFAULT_LANE),
            stream: EntityStream::new(),
            spawners: config.mode.spawners(),
            rng: Pcg32::seed_from_u64(config.seed),
            run_progress: 0.0,
            run_speed: config.mode.base_run_speed(),
            intents: VecDeque::new(),
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.machine.phase()
    }

    // --- Intents (enqueued, applied at the top of the next tick) ---

    /// Jump straight to a lane. Out-of-range indices clamp.
    pub fn select_lane(&mut self, index: usize) {
        self.intents.push_back(Intent::SelectLane(index));
    }

    /// Move one step from the current target lane.
    pub fn navigate(&mut self, direction: Direction) {
        self.intents.push_back(Intent::Navigate(direction));
    }

    /// Begin a run (from Idle or a terminal phase; otherwise a no-op).
    pub fn start(&mut self) {
        self.intents.push_back(Intent::Start);
    }

    pub fn toggle_pause(&mut self) {
        self.intents.push_back(Intent::TogglePause);
    }

    /// Forced pause for tab-hidden/visibility events.
    pub fn force_pause(&mut self) {
        self.intents.push_back(Intent::ForcePause);
    }

    // --- Lifecycle ---

    /// The per-frame entry point. Drains queued intents, advances the clock,
    /// steps the simulation when Running, and returns the frame snapshot.
    pub fn tick(&mut self, timestamp_ms: f64) -> Snapshot {
        self.drain_intents();
        let dt = self.clock.tick(timestamp_ms);
        self.events.clear();
        if self.machine.is_running() {
            self.step(dt);
        }
        self.snapshot()
    }

    fn drain_intents(&mut self) {
        while let Some(intent) = self.intents.pop_front() {
            match intent {
                Intent::SelectLane(index) => self.selection.set_target(Lane::from_index(index)),
                Intent::Navigate(direction) => self.selection.navigate(direction),
                Intent::Start => {
                    if self.machine.apply(SessionEvent::Start) {
                        self.reset_run();
                        log::info!("run started ({} mode)", self.config.mode.name());
                    }
                }
                Intent::TogglePause => {
                    let event = match self.machine.phase() {
                        SessionPhase::Running => Some(SessionEvent::Pause),
                        SessionPhase::Paused => Some(SessionEvent::Resume),
                        _ => None,
                    };
                    if let Some(event) = event {
                        self.machine.apply(event);
                    }
                }
                Intent::ForcePause => {
                    if self.machine.apply(SessionEvent::TabHidden) {
                        log::info!("auto-paused (tab hidden)");
                    }
                }
            }
        }
    }

    /// Full reset back to starting values; the RNG stream keeps going, so
    /// replaying a run needs a fresh session with the same seed.
    fn reset_run(&mut self) {
        self.ledger = self.config.mode.starting_ledger();
        self.stream.clear();
        for spawner in &mut self.spawners {
            spawner.reset();
        }
        self.run_progress = 0.0;
        self.run_speed = self.config.mode.base_run_speed();
        self.selection = Selection::new(DEFAULT_LANE);
        self.events.clear();
    }

    fn step(&mut self, dt: f32) {
        match self.config.mode {
            ModeConfig::Dodge(t) => self.step_dodge(&t, dt),
            ModeConfig::Catch(t) => self.step_catch(&t, dt),
        }
    }

    fn step_dodge(&mut self, t: &DodgeTuning, dt: f32) {
        // Run speed ramps with progress
        let pct = (self.run_progress / t.goal_distance).clamp(0.0, 1.0);
        let target_speed = t.run_speed_base + t.run_speed_ramp * pct;
        self.run_speed += (target_speed - self.run_speed) * t.run_speed_smoothing;

        self.ledger.drain(dt * t.drain_per_sec);
        self.run_progress += dt * self.run_speed;

        if self.run_progress >= t.goal_distance {
            self.machine.apply(SessionEvent::GoalReached);
            log::info!("goal reached with {:.0}s of budget left", self.budget_left());
            return;
        }
        if self.ledger.exhausted() {
            self.machine.apply(SessionEvent::ResourceExhausted);
            log::info!("budget drained away at {:.0}% of the run", pct * 100.0);
            return;
        }

        self.spawn_entities(dt, pct);
        self.selection.smooth();
        self.stream.step(dt);
        resolve(
            &mut self.stream,
            self.selection.target(),
            t.capture_at,
            ResolveRules {
                obstacle_penalty: t.hit_penalty,
                pickup_bonus: t.pickup_bonus,
            },
            &mut self.ledger,
            &mut self.events,
        );
        self.stream.sweep(t.despawn_at);

        // Strike penalties land above; exhaustion must be caught this frame
        if self.ledger.exhausted() {
            self.machine.apply(SessionEvent::ResourceExhausted);
            log::info!(
                "budget exhausted after {} hits at {:.0}% of the run",
                self.ledger.hits(),
                pct * 100.0
            );
        }
    }

    fn step_catch(&mut self, t: &CatchTuning, dt: f32) {
        self.run_progress += dt;
        let difficulty = if t.full_difficulty_score == 0 {
            1.0
        } else {
            (self.ledger.score() as f32 / t.full_difficulty_score as f32).min(1.0)
        };

        self.spawn_entities(dt, difficulty);
        self.selection.smooth();
        self.stream.step(dt);
        resolve(
            &mut self.stream,
            self.selection.target(),
            t.capture_at,
            // Only tokens spawn in catch mode; the dodge amounts are unused
            ResolveRules {
                obstacle_penalty: 0.0,
                pickup_bonus: 0.0,
            },
            &mut self.ledger,
            &mut self.events,
        );
        self.stream.sweep(t.despawn_at);

        if self.ledger.exhausted() {
            self.machine.apply(SessionEvent::ResourceExhausted);
            log::info!("out of lives with score {}", self.ledger.score());
        }
    }

    fn spawn_entities(&mut self, dt: f32, difficulty: f32) {
        for spawner in &mut self.spawners {
            if let Some(spawn) = spawner.advance(dt, difficulty, &mut self.rng) {
                let id = self
                    .stream
                    .push(spawn.lane, spawn.kind, spawn.progress, spawn.speed);
                log::debug!(
                    "spawned {:?} #{id} in lane {} at {:.2} u/s",
                    spawn.kind,
                    spawn.lane.index(),
                    spawn.speed
                );
            }
        }
    }

    fn budget_left(&self) -> f32 {
        match self.ledger.resource() {
            Resource::Budget { seconds, .. } => seconds,
            Resource::Lives { remaining } => remaining as f32,
        }
    }

    fn run_progress_pct(&self) -> f32 {
        match self.config.mode {
            ModeConfig::Dodge(t) => (self.run_progress / t.goal_distance * 100.0).clamp(0.0, 100.0),
            ModeConfig::Catch(t) => {
                if t.full_difficulty_score == 0 {
                    100.0
                } else {
                    (self.ledger.score() as f32 / t.full_difficulty_score as f32 * 100.0)
                        .min(100.0)
                }
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.machine.phase(),
            resource: self.ledger.snapshot(),
            run_progress_pct: self.run_progress_pct(),
            entities: self
                .stream
                .entities()
                .iter()
                .map(|e| EntitySnapshot {
                    lane: e.lane,
                    kind: e.kind,
                    progress: e.progress,
                })
                .collect(),
            selection: SelectionSnapshot {
                target: self.selection.target(),
                visual: self.selection.visual(),
            },
            events: self.events.clone(),
            reduced_motion: self.config.reduced_motion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::ObstacleKind;

    fn budget_of(snapshot: &Snapshot) -> f32 {
        match snapshot.resource.resource {
            Resource::Budget { seconds, .. } => seconds,
            Resource::Lives { .. } => panic!("budget resource expected"),
        }
    }

    fn lives_of(snapshot: &Snapshot) -> u32 {
        match snapshot.resource.resource {
            Resource::Lives { remaining } => remaining,
            Resource::Budget { .. } => panic!("lives resource expected"),
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = GameSession::new(SessionConfig::dodge(1));
        let snap = session.tick(0.0);
        assert_eq!(snap.phase, SessionPhase::Idle);
        assert!(snap.entities.is_empty());

        session.start();
        let snap = session.tick(16.0);
        assert_eq!(snap.phase, SessionPhase::Running);
        // One 16ms frame of drain has already happened
        assert!((budget_of(&snap) - 30.0).abs() < 0.05);
        assert_eq!(snap.selection.target, Lane::BOTTOM_RIGHT);
    }

    #[test]
    fn test_spawns_appear_while_running() {
        let mut session = GameSession::new(SessionConfig::dodge(7));
        session.start();
        let mut saw_entities = false;
        for frame in 0..180 {
            let snap = session.tick(frame as f64 * 16.0);
            saw_entities |= !snap.entities.is_empty();
        }
        assert!(saw_entities, "three seconds without a single spawn");
    }

    #[test]
    fn test_obstacle_hit_costs_budget() {
        let mut session = GameSession::new(SessionConfig::dodge(2));
        session.start();
        session.tick(0.0);

        // Plant an obstacle in the selected lane just shy of the capture
        // threshold; the next frame carries it across
        session.stream.push(
            Lane::BOTTOM_RIGHT,
            EntityKind::Obstacle(ObstacleKind::Meeting),
            1.0,
            25.0,
        );
        let snap = session.tick(16.0);

        assert_eq!(snap.resource.hits, 1);
        // 30s start, one 8s penalty, 16ms of drain
        assert!((budget_of(&snap) - 22.0).abs() < 0.05);
        assert!(
            snap.events
                .contains(&CollisionEvent::ObstacleStruck(ObstacleKind::Meeting))
        );
        assert_eq!(snap.phase, SessionPhase::Running);
    }

    #[test]
    fn test_penalties_to_zero_lose_the_run() {
        let mut session = GameSession::new(SessionConfig::dodge(3));
        session.start();
        session.tick(0.0);

        // Four strikes in one frame: 32s of penalties against a 30s budget
        for _ in 0..4 {
            session.stream.push(
                Lane::BOTTOM_RIGHT,
                EntityKind::Obstacle(ObstacleKind::Social),
                1.2,
                25.0,
            );
        }
        let snap = session.tick(16.0);

        assert_eq!(snap.phase, SessionPhase::Lost);
        // Clamped, never negative
        assert_eq!(budget_of(&snap), 0.0);
    }

    #[test]
    fn test_goal_reached_wins_and_keeps_budget() {
        let mut session = GameSession::new(SessionConfig::dodge(4));
        session.start();
        session.tick(0.0);

        session.run_progress = 899.9;
        let snap = session.tick(100.0);

        assert_eq!(snap.phase, SessionPhase::Won);
        assert_eq!(snap.run_progress_pct, 100.0);
        assert!(budget_of(&snap) > 29.0, "win must preserve the budget");
    }

    #[test]
    fn test_catch_three_drops_lose() {
        let mut session = GameSession::new(SessionConfig::catch(5));
        session.start();
        session.tick(0.0);

        // Three tokens crossing in a lane the player never selected
        for label in 0..3 {
            session
                .stream
                .push(Lane::TOP_LEFT, EntityKind::Token(label), 0.999, 0.4);
        }
        let snap = session.tick(16.0);

        assert_eq!(snap.phase, SessionPhase::Lost);
        assert_eq!(lives_of(&snap), 0);
        assert_eq!(snap.resource.score, 0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut session = GameSession::new(SessionConfig::dodge(6));
        session.start();
        session.tick(0.0);
        session.stream.push(
            Lane::TOP_LEFT,
            EntityKind::Obstacle(ObstacleKind::Email),
            -50.0,
            25.0,
        );
        session.tick(16.0);

        session.toggle_pause();
        let frozen = session.tick(32.0);
        assert_eq!(frozen.phase, SessionPhase::Paused);

        // A long paused stretch changes nothing
        let later = session.tick(5032.0);
        assert_eq!(later.run_progress_pct, frozen.run_progress_pct);
        assert_eq!(later.entities[0].progress, frozen.entities[0].progress);

        // Resume continues from exactly where it stopped
        session.toggle_pause();
        let resumed = session.tick(5048.0);
        assert_eq!(resumed.phase, SessionPhase::Running);
        assert!(resumed.entities[0].progress > frozen.entities[0].progress);
        let advanced = resumed.entities[0].progress - frozen.entities[0].progress;
        assert!(advanced <= 25.0 * crate::consts::MAX_FRAME_DT + 1e-3);
    }

    #[test]
    fn test_force_pause_mirrors_tab_hidden() {
        let mut session = GameSession::new(SessionConfig::dodge(8));
        session.start();
        session.tick(0.0);

        session.force_pause();
        assert_eq!(session.tick(16.0).phase, SessionPhase::Paused);

        // Idempotent when already paused or idle
        session.force_pause();
        assert_eq!(session.tick(32.0).phase, SessionPhase::Paused);
    }

    #[test]
    fn test_lane_intents_clamp_and_navigate() {
        let mut session = GameSession::new(SessionConfig::dodge(9));
        session.select_lane(42);
        let snap = session.tick(0.0);
        assert_eq!(snap.selection.target, Lane::BOTTOM_RIGHT);

        session.select_lane(0);
        session.navigate(Direction::Down);
        session.navigate(Direction::Right);
        let snap = session.tick(16.0);
        assert_eq!(snap.selection.target, Lane::BOTTOM_RIGHT);
    }

    #[test]
    fn test_reduced_motion_passes_through_untouched() {
        let config = SessionConfig {
            reduced_motion: true,
            ..SessionConfig::dodge(12)
        };
        let mut session = GameSession::new(config);
        assert!(session.tick(0.0).reduced_motion);
        session.start();
        // The flag is for renderers only; the run plays out the same
        let snap = session.tick(16.0);
        assert!(snap.reduced_motion);
        assert_eq!(snap.phase, SessionPhase::Running);
    }

    #[test]
    fn test_restart_after_loss_resets_the_ledger() {
        let mut session = GameSession::new(SessionConfig::dodge(10));
        session.start();
        session.tick(0.0);
        for _ in 0..4 {
            session.stream.push(
                Lane::BOTTOM_RIGHT,
                EntityKind::Obstacle(ObstacleKind::Social),
                1.2,
                25.0,
            );
        }
        assert_eq!(session.tick(16.0).phase, SessionPhase::Lost);

        session.start();
        let snap = session.tick(32.0);
        assert_eq!(snap.phase, SessionPhase::Running);
        assert!((budget_of(&snap) - 30.0).abs() < 0.05);
        assert_eq!(snap.resource.hits, 0);
        assert!(snap.entities.is_empty());
        assert!(snap.run_progress_pct < 0.1);
    }
}
