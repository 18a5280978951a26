//! Hazard entities and the spawner
//!
//! Three closed variants scroll from the right edge to the left:
//! - Gap obstacles: a wall with one opening, fatal on contact
//! - Saws: spinning discs, fatal on contact
//! - Boost pads: launch a descending player upward
//!
//! Hazards are kept left-to-right (new ones always enter at the right edge),
//! which the scoring search relies on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::RandomSource;
use crate::tuning::Tuning;
use crate::wrap_degrees;

/// Discriminant of [`Hazard`], used by events and weighted draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardType {
    Gap,
    Saw,
    BoostPad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapObstacle {
    pub id: u32,
    pub x: f32,
    /// Height of the top section; the opening starts here
    pub gap_top: f32,
    pub scored: bool,
}

impl GapObstacle {
    /// Top and bottom wall sections
    pub fn rects(&self, tuning: &Tuning) -> [Rect; 2] {
        let bottom_y = self.gap_top + tuning.gap_size;
        [
            Rect::new(self.x, 0.0, tuning.obstacle_width, self.gap_top),
            Rect::new(
                self.x,
                bottom_y,
                tuning.obstacle_width,
                tuning.playfield_height - bottom_y,
            ),
        ]
    }

    /// Vertical middle of the opening
    pub fn gap_center(&self, tuning: &Tuning) -> f32 {
        self.gap_top + tuning.gap_size / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saw {
    pub id: u32,
    pub x: f32,
    /// Top edge of the bounding square
    pub y: f32,
    /// Degrees in [0, 360); cosmetic only
    pub rotation: f32,
    pub scored: bool,
}

impl Saw {
    pub fn center(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(self.x, self.y) + Vec2::splat(tuning.saw_radius())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostPad {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Set once the pad has launched the player
    pub triggered: bool,
}

impl BoostPad {
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, self.y, tuning.boost_pad_width, tuning.boost_pad_height)
    }

    /// Where the launch effect is emitted
    pub fn top_center(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(self.x + tuning.boost_pad_width / 2.0, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Hazard {
    Gap(GapObstacle),
    Saw(Saw),
    BoostPad(BoostPad),
}

impl Hazard {
    pub fn id(&self) -> u32 {
        match self {
            Hazard::Gap(h) => h.id,
            Hazard::Saw(h) => h.id,
            Hazard::BoostPad(h) => h.id,
        }
    }

    pub fn x(&self) -> f32 {
        match self {
            Hazard::Gap(h) => h.x,
            Hazard::Saw(h) => h.x,
            Hazard::BoostPad(h) => h.x,
        }
    }

    pub fn width(&self, tuning: &Tuning) -> f32 {
        match self {
            Hazard::Gap(_) => tuning.obstacle_width,
            Hazard::Saw(_) => tuning.saw_size,
            Hazard::BoostPad(_) => tuning.boost_pad_width,
        }
    }

    pub fn hazard_type(&self) -> HazardType {
        match self {
            Hazard::Gap(_) => HazardType::Gap,
            Hazard::Saw(_) => HazardType::Saw,
            Hazard::BoostPad(_) => HazardType::BoostPad,
        }
    }

    /// Right edge; the hazard is passed once this is left of the player
    pub fn trailing_edge(&self, tuning: &Tuning) -> f32 {
        self.x() + self.width(tuning)
    }

    /// Boost pads never count toward score
    pub fn is_score_eligible(&self) -> bool {
        !matches!(self, Hazard::BoostPad(_))
    }

    /// Eligible and not yet counted
    pub fn awaiting_score(&self) -> bool {
        self.is_score_eligible()
            && match self {
                Hazard::Gap(h) => !h.scored,
                Hazard::Saw(h) => !h.scored,
                Hazard::BoostPad(_) => false,
            }
    }

    pub fn mark_scored(&mut self) {
        match self {
            Hazard::Gap(h) => h.scored = true,
            Hazard::Saw(h) => h.scored = true,
            Hazard::BoostPad(_) => {}
        }
    }

    /// Scroll one tick; `None` once fully off the left edge
    pub fn advanced(mut self, tuning: &Tuning) -> Option<Self> {
        match &mut self {
            Hazard::Gap(h) => h.x -= tuning.scroll_speed,
            Hazard::Saw(h) => {
                h.x -= tuning.scroll_speed;
                h.rotation = wrap_degrees(h.rotation + tuning.saw_spin);
            }
            Hazard::BoostPad(h) => h.x -= tuning.scroll_speed,
        }
        (self.trailing_edge(tuning) > 0.0).then_some(self)
    }
}

/// Scroll and cull every hazard, preserving order
pub fn advance(hazards: Vec<Hazard>, tuning: &Tuning) -> Vec<Hazard> {
    hazards
        .into_iter()
        .filter_map(|h| h.advanced(tuning))
        .collect()
}

/// Weighted kind selection from one uniform sample (cumulative thresholds)
pub fn choose_type(sample: f32, tuning: &Tuning) -> HazardType {
    let total = tuning.total_weight();
    let gap_cut = tuning.gap_weight / total;
    let saw_cut = (tuning.gap_weight + tuning.saw_weight) / total;
    if sample < gap_cut {
        HazardType::Gap
    } else if sample < saw_cut {
        HazardType::Saw
    } else {
        HazardType::BoostPad
    }
}

/// Build a new hazard at the right edge of the playfield
pub fn spawn<R: RandomSource + ?Sized>(id: u32, rng: &mut R, tuning: &Tuning) -> Hazard {
    let x = tuning.playfield_width;
    let hazard = match choose_type(rng.next_unit(), tuning) {
        HazardType::Gap => {
            let gap_top = rng.int_inclusive(tuning.obstacle_min_height, tuning.obstacle_max_height());
            Hazard::Gap(GapObstacle {
                id,
                x,
                gap_top: gap_top.clamp(tuning.obstacle_min_height, tuning.obstacle_max_height()),
                scored: false,
            })
        }
        HazardType::Saw => {
            let max_y = tuning.playfield_height - tuning.saw_size;
            Hazard::Saw(Saw {
                id,
                x,
                y: rng.range(0.0, max_y).clamp(0.0, max_y),
                rotation: 0.0,
                scored: false,
            })
        }
        HazardType::BoostPad => {
            let (lo, hi) = (tuning.boost_pad_inset, tuning.boost_pad_max_y());
            Hazard::BoostPad(BoostPad {
                id,
                x,
                y: rng.range(lo, hi).clamp(lo, hi),
                triggered: false,
            })
        }
    };
    debug_assert!(in_playfield(&hazard, tuning), "spawned outside playfield: {hazard:?}");
    hazard
}

/// Vertical extent check used by spawn assertions and tests
pub fn in_playfield(hazard: &Hazard, tuning: &Tuning) -> bool {
    match hazard {
        Hazard::Gap(h) => {
            h.gap_top >= tuning.obstacle_min_height && h.gap_top <= tuning.obstacle_max_height()
        }
        Hazard::Saw(h) => h.y >= 0.0 && h.y + tuning.saw_size <= tuning.playfield_height,
        Hazard::BoostPad(h) => h.y >= 0.0 && h.y + tuning.boost_pad_height <= tuning.playfield_height,
    }
}

/// Index of the leftmost unscored, score-eligible hazard whose trailing edge
/// has crossed `line_x`.
///
/// Only the first such hazard is reported, so at most one point is awarded
/// per tick even if several hazards cross together.
pub fn first_crossing(hazards: &[Hazard], line_x: f32, tuning: &Tuning) -> Option<usize> {
    hazards
        .iter()
        .position(|h| h.awaiting_score() && h.trailing_edge(tuning) < line_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgSource, ScriptedSource};
    use proptest::prelude::*;

    fn gap(id: u32, x: f32) -> Hazard {
        Hazard::Gap(GapObstacle {
            id,
            x,
            gap_top: 100.0,
            scored: false,
        })
    }

    #[test]
    fn test_choose_type_thresholds() {
        let tuning = Tuning::default();
        assert_eq!(choose_type(0.0, &tuning), HazardType::Gap);
        assert_eq!(choose_type(0.59, &tuning), HazardType::Gap);
        assert_eq!(choose_type(0.61, &tuning), HazardType::Saw);
        assert_eq!(choose_type(0.79, &tuning), HazardType::Saw);
        assert_eq!(choose_type(0.81, &tuning), HazardType::BoostPad);
        assert_eq!(choose_type(0.999, &tuning), HazardType::BoostPad);
    }

    #[test]
    fn test_spawn_enters_at_right_edge() {
        let tuning = Tuning::default();
        let mut rng = ScriptedSource::new(&[0.1, 0.5]);
        let hazard = spawn(9, &mut rng, &tuning);
        assert_eq!(hazard.id(), 9);
        assert_eq!(hazard.x(), tuning.playfield_width);
        match hazard {
            Hazard::Gap(h) => {
                // floor(0.5 * 271) + 40
                assert_eq!(h.gap_top, 175.0);
                assert!(!h.scored);
            }
            other => panic!("expected gap, got {other:?}"),
        }
    }

    #[test]
    fn test_saw_spins_and_wraps() {
        let tuning = Tuning::default();
        let saw = Hazard::Saw(Saw {
            id: 1,
            x: 400.0,
            y: 100.0,
            rotation: 357.0,
            scored: false,
        });
        match saw.advanced(&tuning) {
            Some(Hazard::Saw(s)) => {
                assert_eq!(s.x, 396.0);
                assert_eq!(s.rotation, 3.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_culled_once_off_screen() {
        let tuning = Tuning::default();
        // trailing edge 4 -> 0 after one tick
        let hazards = vec![gap(1, -36.0), gap(2, -35.0), gap(3, 300.0)];
        let next = advance(hazards, &tuning);
        let ids: Vec<u32> = next.iter().map(Hazard::id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_hazard_past_left_edge_is_absent() {
        let tuning = Tuning::default();
        let hazards = vec![gap(1, -tuning.obstacle_width - 1.0 + tuning.scroll_speed)];
        assert!(advance(hazards, &tuning).is_empty());
    }

    #[test]
    fn test_first_crossing_takes_only_leftmost() {
        let tuning = Tuning::default();
        let hazards = vec![gap(1, 50.0), gap(2, 60.0), gap(3, 500.0)];
        assert_eq!(first_crossing(&hazards, tuning.player_x, &tuning), Some(0));
    }

    #[test]
    fn test_first_crossing_skips_scored_and_pads() {
        let tuning = Tuning::default();
        let mut first = gap(1, 20.0);
        first.mark_scored();
        let pad = Hazard::BoostPad(BoostPad {
            id: 2,
            x: 30.0,
            y: 200.0,
            triggered: false,
        });
        let hazards = vec![first, pad, gap(3, 60.0)];
        assert!(!hazards[1].is_score_eligible());
        assert!(!hazards[1].awaiting_score());
        assert!(hazards[2].is_score_eligible() && hazards[2].awaiting_score());
        assert_eq!(first_crossing(&hazards, tuning.player_x, &tuning), Some(2));
    }

    #[test]
    fn test_gap_rects() {
        let tuning = Tuning::default();
        let Hazard::Gap(g) = gap(1, 300.0) else { unreachable!() };
        let [top, bottom] = g.rects(&tuning);
        assert_eq!(top, Rect::new(300.0, 0.0, 40.0, 100.0));
        assert_eq!(bottom, Rect::new(300.0, 250.0, 40.0, 250.0));
        assert_eq!(g.gap_center(&tuning), 175.0);
    }

    proptest! {
        #[test]
        fn prop_spawned_hazards_fit_playfield(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = PcgSource::new(seed);
            for id in 0..64 {
                let hazard = spawn(id, &mut rng, &tuning);
                prop_assert!(in_playfield(&hazard, &tuning));
                prop_assert_eq!(hazard.x(), tuning.playfield_width);
            }
        }

        #[test]
        fn prop_scripted_extremes_fit_playfield(kind in 0.0f32..1.0, pos in 0.0f32..=1.0) {
            let tuning = Tuning::default();
            let mut rng = ScriptedSource::new(&[kind, pos]);
            let hazard = spawn(1, &mut rng, &tuning);
            prop_assert!(in_playfield(&hazard, &tuning));
        }
    }
}
