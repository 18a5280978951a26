//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed kinematic step per tick
//! - Injected randomness only
//! - Hazards kept in left-to-right order
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod hazards;
pub mod particles;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, resolve};
pub use geometry::{Rect, aabb_overlap, circles_overlap};
pub use hazards::{BoostPad, GapObstacle, Hazard, HazardType, Saw};
pub use particles::{Particle, ParticleKind};
pub use player::Player;
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use state::{DeathCause, GameEvent, GamePhase, SimContext, WorldState};
pub use tick::{sanitize_elapsed, step};
