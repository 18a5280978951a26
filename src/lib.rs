//! Square Jumper - a side-scrolling one-button reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, hazards, collisions, particles)
//! - `session`: Game lifecycle and the command surface
//! - `tuning`: Data-driven game balance
//! - `input`: Keyboard binding for frame drivers

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Command, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Player square (fixed horizontal position)
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_X: f32 = 150.0;

    /// Vertical kinematics, per tick
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_STRENGTH: f32 = 10.0;
    /// Boost pads launch harder than a jump
    pub const BOOST_STRENGTH: f32 = 14.0;

    /// Horizontal scroll, per tick
    pub const SCROLL_SPEED: f32 = 4.0;

    /// Gap obstacles
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const GAP_SIZE: f32 = 150.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;

    /// Rotating saws (square bounding box, circular hitbox)
    pub const SAW_SIZE: f32 = 40.0;
    /// Degrees per tick
    pub const SAW_SPIN: f32 = 6.0;

    /// Boost pads
    pub const BOOST_PAD_WIDTH: f32 = 60.0;
    pub const BOOST_PAD_HEIGHT: f32 = 12.0;
    /// Band kept clear of pads near floor and ceiling
    pub const BOOST_PAD_INSET: f32 = 80.0;

    /// Hazard kind weights (gap / saw / boost)
    pub const GAP_WEIGHT: f32 = 0.6;
    pub const SAW_WEIGHT: f32 = 0.2;
    pub const BOOST_WEIGHT: f32 = 0.2;

    /// Milliseconds between hazard spawns
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Particle opacity lost per tick
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const SPARKLE_COUNT: usize = 8;
    pub const BURST_COUNT: usize = 24;

    /// Nominal frame length used when the driver supplies no elapsed time
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest elapsed time honored per call (tab switches, debugger stalls)
    pub const MAX_ELAPSED_MS: f64 = 250.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert an HSL color to packed 0xRRGGBB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> u32 {
    let h = wrap_degrees(hue) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let channel = |v: f32| (((v + m) * 255.0).round().clamp(0.0, 255.0)) as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(366.0), 6.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-8) < 360.0);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), 0xFF0000);
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), 0x00FF00);
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), 0x0000FF);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), 0xFFFFFF);
    }
}
