//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ParticleKind;

/// Errors from loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Per-kind particle parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleStyle {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Hue band in degrees
    pub min_hue: f32,
    pub max_hue: f32,
}

impl ParticleStyle {
    pub fn sparkle() -> Self {
        Self {
            count: SPARKLE_COUNT,
            min_speed: 0.5,
            max_speed: 2.0,
            min_size: 2.0,
            max_size: 5.0,
            min_hue: 180.0,
            max_hue: 240.0,
        }
    }

    pub fn burst() -> Self {
        Self {
            count: BURST_COUNT,
            min_speed: 2.0,
            max_speed: 6.0,
            min_size: 3.0,
            max_size: 8.0,
            min_hue: 0.0,
            max_hue: 50.0,
        }
    }
}

/// Simulation tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub player_size: f32,
    pub player_x: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub boost_strength: f32,
    pub scroll_speed: f32,
    pub obstacle_width: f32,
    pub gap_size: f32,
    pub obstacle_min_height: f32,
    pub saw_size: f32,
    pub saw_spin: f32,
    pub boost_pad_width: f32,
    pub boost_pad_height: f32,
    pub boost_pad_inset: f32,
    pub gap_weight: f32,
    pub saw_weight: f32,
    pub boost_weight: f32,
    pub spawn_interval_ms: f64,
    pub particle_decay: f32,
    pub sparkle: ParticleStyle,
    pub burst: ParticleStyle,
    pub frame_ms: f64,
    pub max_elapsed_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            player_size: PLAYER_SIZE,
            player_x: PLAYER_X,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            boost_strength: BOOST_STRENGTH,
            scroll_speed: SCROLL_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            saw_size: SAW_SIZE,
            saw_spin: SAW_SPIN,
            boost_pad_width: BOOST_PAD_WIDTH,
            boost_pad_height: BOOST_PAD_HEIGHT,
            boost_pad_inset: BOOST_PAD_INSET,
            gap_weight: GAP_WEIGHT,
            saw_weight: SAW_WEIGHT,
            boost_weight: BOOST_WEIGHT,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            particle_decay: PARTICLE_DECAY,
            sparkle: ParticleStyle::sparkle(),
            burst: ParticleStyle::burst(),
            frame_ms: FRAME_MS,
            max_elapsed_ms: MAX_ELAPSED_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from JSON, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(err) => {
                log::warn!("Rejected tuning ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Check that every hazard and the player fit the playfield
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_size", self.player_size),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("saw_size", self.saw_size),
            ("boost_pad_width", self.boost_pad_width),
            ("boost_pad_height", self.boost_pad_height),
            ("scroll_speed", self.scroll_speed),
            ("particle_decay", self.particle_decay),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        if self.obstacle_min_height < 0.0 {
            return Err(invalid("obstacle_min_height", "must not be negative"));
        }
        if self.obstacle_max_height() < self.obstacle_min_height {
            return Err(invalid(
                "gap_size",
                format!(
                    "gap {} leaves no room for {}px obstacles in a {}px playfield",
                    self.gap_size, self.obstacle_min_height, self.playfield_height
                ),
            ));
        }
        if self.saw_size > self.playfield_height {
            return Err(invalid("saw_size", "taller than the playfield"));
        }
        if self.boost_pad_inset < 0.0 || self.boost_pad_max_y() < self.boost_pad_inset {
            return Err(invalid("boost_pad_inset", "leaves no room for boost pads"));
        }
        if self.player_size >= self.playfield_height {
            return Err(invalid("player_size", "taller than the playfield"));
        }
        let weights = [self.gap_weight, self.saw_weight, self.boost_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("gap_weight", "hazard weights must be non-negative"));
        }
        if self.total_weight() <= 0.0 {
            return Err(invalid("gap_weight", "hazard weights sum to zero"));
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms >= 0.0) {
            return Err(invalid("spawn_interval_ms", "must be non-negative"));
        }
        if !(self.frame_ms > 0.0 && self.max_elapsed_ms >= self.frame_ms) {
            return Err(invalid("max_elapsed_ms", "must be at least one frame"));
        }
        for (field, style) in [("sparkle", &self.sparkle), ("burst", &self.burst)] {
            if style.min_speed > style.max_speed || style.min_size > style.max_size {
                return Err(invalid(field, "min exceeds max"));
            }
        }
        Ok(())
    }

    /// Largest legal height of a gap obstacle's top section
    pub fn obstacle_max_height(&self) -> f32 {
        self.playfield_height - self.gap_size - self.obstacle_min_height
    }

    /// Largest legal top edge for a boost pad
    pub fn boost_pad_max_y(&self) -> f32 {
        self.playfield_height - self.boost_pad_inset - self.boost_pad_height
    }

    /// Largest non-fatal player position (top edge)
    pub fn max_player_y(&self) -> f32 {
        self.playfield_height - self.player_size
    }

    pub fn saw_radius(&self) -> f32 {
        self.saw_size / 2.0
    }

    pub fn total_weight(&self) -> f32 {
        self.gap_weight + self.saw_weight + self.boost_weight
    }

    pub fn particle_style(&self, kind: ParticleKind) -> &ParticleStyle {
        match kind {
            ParticleKind::Sparkle => &self.sparkle,
            ParticleKind::Burst => &self.burst,
        }
    }
}
