//! Session controller
//!
//! Owns the lifecycle (`NotStarted -> Running <-> Paused`, `Running -> Over`)
//! and everything that persists between ticks: the snapshot, the tick
//! context and the random source. Input collaborators talk to it through
//! commands; frame drivers call [`Session::advance`] once per frame.

use serde::{Deserialize, Serialize};

use crate::sim::particles::{self, ParticleKind};
use crate::sim::{
    GameEvent, GamePhase, PcgSource, RandomSource, SimContext, WorldState, sanitize_elapsed, step,
};
use crate::tuning::Tuning;

/// Parameterless commands from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Jump,
    TogglePause,
    Reset,
}

pub struct Session<R: RandomSource = PcgSource> {
    tuning: Tuning,
    world: WorldState,
    ctx: SimContext,
    rng: R,
    /// Events from commands, delivered with the next snapshot
    pending: Vec<GameEvent>,
}

impl Session<PcgSource> {
    /// Default tuning, seeded PCG randomness
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        log::info!("Session created with seed {seed}");
        Self::with_source(tuning, PcgSource::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Use any random source (scripted sources make runs reproducible in tests)
    pub fn with_source(tuning: Tuning, rng: R) -> Self {
        let world = WorldState::new(&tuning, GamePhase::NotStarted);
        Self {
            tuning,
            world,
            ctx: SimContext::default(),
            rng,
            pending: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> &WorldState {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    /// Whether the frame driver should keep requesting frames
    ///
    /// Paused sessions stay subscribed so resuming needs no reload.
    pub fn wants_frames(&self) -> bool {
        matches!(self.world.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Jump => self.jump(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
        }
    }

    /// Begin a run from the title screen or after game over
    pub fn start(&mut self) {
        match self.world.phase {
            GamePhase::NotStarted | GamePhase::Over => self.reset(),
            GamePhase::Running | GamePhase::Paused => {}
        }
    }

    /// Reinitialize the world and start running
    pub fn reset(&mut self) {
        self.world = WorldState::new(&self.tuning, GamePhase::Running);
        self.ctx.restart_spawn_timer();
        self.pending.clear();
        log::info!("Run started");
    }

    /// Overwrite vertical velocity; honored only while running
    pub fn jump(&mut self) {
        if self.world.phase != GamePhase::Running {
            return;
        }
        self.world.player.jump(self.tuning.jump_strength);
        let origin = self.world.player.center(&self.tuning);
        particles::spawn(
            &mut self.world.particles,
            &mut self.ctx,
            &mut self.rng,
            &self.tuning,
            self.tuning.sparkle.count,
            origin,
            ParticleKind::Sparkle,
        );
        self.pending.push(GameEvent::Jumped);
    }

    pub fn toggle_pause(&mut self) {
        self.world.phase = match self.world.phase {
            GamePhase::Running => {
                log::info!("Paused");
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                GamePhase::Running
            }
            other => other,
        };
    }

    /// Run one tick if running; otherwise the snapshot is left untouched
    pub fn advance(&mut self, elapsed_ms: Option<f64>) -> &WorldState {
        if self.world.phase != GamePhase::Running {
            return &self.world;
        }
        let elapsed = sanitize_elapsed(elapsed_ms, &self.tuning);
        let mut next = step(&self.world, &mut self.ctx, &mut self.rng, &self.tuning, elapsed);
        if !self.pending.is_empty() {
            let mut events = std::mem::take(&mut self.pending);
            events.append(&mut next.events);
            next.events = events;
        }
        self.world = next;
        &self.world
    }

    /// Current snapshot as JSON for a JS presentation layer
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.world)
    }
}
