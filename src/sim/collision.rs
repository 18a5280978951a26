//! Collision resolution between the player and the world
//!
//! Gap obstacles are two rectangles, saws are circles, boost pads are
//! one-way rectangles that only fire for a descending player. The player's
//! hitbox is its square for rectangles and its inscribed circle for saws.

use glam::Vec2;

use super::geometry::{Rect, aabb_overlap, circles_overlap};
use super::hazards::{BoostPad, GapObstacle, Hazard, Saw};
use super::player::Player;
use super::state::DeathCause;
use crate::tuning::Tuning;

/// Result of a collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// First fatal contact, if any
    pub fatal: Option<DeathCause>,
    /// Launch points of boost pads that fired
    pub boosts: Vec<Vec2>,
}

impl CollisionResult {
    pub fn dead(cause: DeathCause) -> Self {
        Self {
            fatal: Some(cause),
            boosts: Vec::new(),
        }
    }
}

/// Player rectangle against either wall section
pub fn hits_gap(player_rect: &Rect, gap: &GapObstacle, tuning: &Tuning) -> bool {
    gap.rects(tuning)
        .iter()
        .any(|wall| aabb_overlap(player_rect, wall))
}

/// Player circle against saw circle (rotation is ignored)
pub fn hits_saw(player: &Player, saw: &Saw, tuning: &Tuning) -> bool {
    circles_overlap(
        player.center(tuning),
        tuning.player_size / 2.0,
        saw.center(tuning),
        tuning.saw_radius(),
    )
}

/// Pads fire only while the player is falling onto them
pub fn triggers_pad(player: &Player, pad: &BoostPad, tuning: &Tuning) -> bool {
    player.is_descending() && aabb_overlap(&player.rect(tuning), &pad.rect(tuning))
}

/// Check the player against boundaries then hazards, in list order
///
/// Boundary contact short-circuits before any hazard is looked at. The first
/// fatal hazard stops the scan. Boost pads passed before that point apply
/// their launch to `player` and are marked triggered.
pub fn resolve(player: &mut Player, hazards: &mut [Hazard], tuning: &Tuning) -> CollisionResult {
    if let Some(cause) = player.boundary_hit(tuning) {
        return CollisionResult::dead(cause);
    }

    let player_rect = player.rect(tuning);
    let mut result = CollisionResult::default();
    for hazard in hazards.iter_mut() {
        match hazard {
            Hazard::Gap(gap) => {
                if hits_gap(&player_rect, gap, tuning) {
                    result.fatal = Some(DeathCause::Obstacle);
                    break;
                }
            }
            Hazard::Saw(saw) => {
                if hits_saw(player, saw, tuning) {
                    result.fatal = Some(DeathCause::Saw);
                    break;
                }
            }
            Hazard::BoostPad(pad) => {
                if triggers_pad(player, pad, tuning) {
                    player.boost(tuning.boost_strength);
                    pad.triggered = true;
                    result.boosts.push(pad.top_center(tuning));
                }
            }
        }
    }
    result
}
