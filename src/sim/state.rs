//! World state and the orchestrator-owned tick context
//!
//! [`WorldState`] is the snapshot handed to presentation. It is rebuilt
//! wholesale each tick; nothing outside the simulation mutates it.

use serde::{Deserialize, Serialize};

use super::hazards::{Hazard, HazardType};
use super::particles::Particle;
use super::player::Player;
use crate::tuning::Tuning;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// World frozen, frame driver still subscribed
    Paused,
    /// Run ended
    Over,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Floor,
    Ceiling,
    Obstacle,
    Saw,
}

/// Things that happened since the previous snapshot (for audio/effects)
///
/// Events belong to the tick that produced the snapshot. Paused and finished
/// snapshots are republished unchanged, so listeners handle a snapshot's
/// events once per [`WorldState::tick`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Spawned(HazardType),
    Scored { total: u64 },
    Boosted,
    Died(DeathCause),
}

/// Complete game snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub player: Player,
    /// Left-to-right by x
    pub hazards: Vec<Hazard>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub phase: GamePhase,
    /// Ticks simulated in this run; unchanged while not running
    pub tick: u64,
    /// Events produced by the tick (and commands) that led here
    pub events: Vec<GameEvent>,
}

impl WorldState {
    /// Fresh world in the given phase
    pub fn new(tuning: &Tuning, phase: GamePhase) -> Self {
        Self {
            player: Player::centered(tuning),
            hazards: Vec::new(),
            particles: Vec::new(),
            score: 0,
            phase,
            tick: 0,
            events: Vec::new(),
        }
    }
}

/// Mutable bookkeeping that crosses tick boundaries
///
/// Owned by the session and passed into every tick, so no timer or counter
/// lives in free-floating state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimContext {
    /// Monotonic simulation clock (sum of accepted elapsed times)
    pub clock_ms: f64,
    /// Clock value at the most recent hazard spawn
    pub last_spawn_ms: f64,
    /// Next presentation key for hazards and particles
    next_id: u32,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            clock_ms: 0.0,
            last_spawn_ms: 0.0,
            next_id: 1,
        }
    }
}

impl SimContext {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Restart the spawn timer from the current clock
    ///
    /// Ids keep counting so presentation keys stay unique across runs.
    pub fn restart_spawn_timer(&mut self) {
        self.last_spawn_ms = self.clock_ms;
    }

    pub fn since_last_spawn(&self) -> f64 {
        self.clock_ms - self.last_spawn_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_world() {
        let tuning = Tuning::default();
        let world = WorldState::new(&tuning, GamePhase::Running);
        assert_eq!(world.score, 0);
        assert!(world.hazards.is_empty());
        assert!(world.particles.is_empty());
        assert_eq!(world.player, Player::centered(&tuning));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut ctx = SimContext::default();
        assert_eq!(ctx.next_entity_id(), 1);
        assert_eq!(ctx.next_entity_id(), 2);
        ctx.clock_ms = 500.0;
        ctx.restart_spawn_timer();
        assert_eq!(ctx.since_last_spawn(), 0.0);
        assert_eq!(ctx.next_entity_id(), 3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let tuning = Tuning::default();
        let mut world = WorldState::new(&tuning, GamePhase::Over);
        world.events.push(GameEvent::Died(DeathCause::Floor));
        let json = serde_json::to_string(&world).unwrap();
        assert!(json.contains("\"phase\":\"Over\""));
        let back: WorldState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, world);
    }
}
