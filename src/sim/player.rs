//! Player square kinematics
//!
//! The player only moves vertically. Each tick applies one semi-implicit
//! Euler step: gravity into velocity, then velocity into position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::DeathCause;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge of the square
    pub y: f32,
    /// Positive is downward
    pub velocity: f32,
}

impl Player {
    /// Resting at mid-field
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            y: tuning.playfield_height / 2.0,
            velocity: 0.0,
        }
    }

    /// One fixed integration step
    pub fn integrated(self, gravity: f32) -> Self {
        let velocity = self.velocity + gravity;
        Self {
            y: self.y + velocity,
            velocity,
        }
    }

    /// Overrides any current velocity, including mid-air
    pub fn jump(&mut self, strength: f32) {
        self.velocity = -strength;
    }

    pub fn boost(&mut self, strength: f32) {
        self.velocity = -strength;
    }

    pub fn is_descending(&self) -> bool {
        self.velocity > 0.0
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(tuning.player_x, self.y, tuning.player_size, tuning.player_size)
    }

    pub fn center(&self, tuning: &Tuning) -> Vec2 {
        self.rect(tuning).center()
    }

    /// Floor/ceiling contact; touching either is fatal
    pub fn boundary_hit(&self, tuning: &Tuning) -> Option<DeathCause> {
        if self.y >= tuning.max_player_y() {
            Some(DeathCause::Floor)
        } else if self.y <= 0.0 {
            Some(DeathCause::Ceiling)
        } else {
            None
        }
    }
}
