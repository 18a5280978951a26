//! Short-lived visual effect particles
//!
//! Particles never affect gameplay. They are spawned by simulation events,
//! drift in a straight line, fade out and are dropped once invisible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::SimContext;
use crate::hsl_to_rgb;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Slow, cool-colored (jumps, boosts)
    Sparkle,
    /// Fast, warm-colored (deaths)
    Burst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Presentation key only
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every tick
    pub opacity: f32,
    pub kind: ParticleKind,
    pub size: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
    decay: f32,
    ticks_left: u32,
}

impl Particle {
    pub fn new(
        id: u32,
        pos: Vec2,
        vel: Vec2,
        kind: ParticleKind,
        size: f32,
        color: u32,
        decay: f32,
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            opacity: 1.0,
            kind,
            size,
            color,
            decay,
            ticks_left: lifetime_ticks(1.0, decay),
        }
    }

    /// Advance one tick; `None` once fully faded
    pub fn advanced(mut self) -> Option<Self> {
        self.pos += self.vel;
        self.opacity = (self.opacity - self.decay).max(0.0);
        // Removal follows the countdown, not the float opacity
        self.ticks_left = self.ticks_left.saturating_sub(1);
        (self.ticks_left > 0).then_some(self)
    }
}

/// Ticks until `opacity` reaches zero at `decay` per tick
pub fn lifetime_ticks(opacity: f32, decay: f32) -> u32 {
    if decay <= 0.0 || opacity <= 0.0 {
        return 0;
    }
    (opacity / decay).ceil() as u32
}

/// Spawn `count` particles radiating from `origin`
pub fn spawn<R: RandomSource + ?Sized>(
    particles: &mut Vec<Particle>,
    ctx: &mut SimContext,
    rng: &mut R,
    tuning: &Tuning,
    count: usize,
    origin: Vec2,
    kind: ParticleKind,
) {
    let style = tuning.particle_style(kind);
    particles.reserve(count);
    for _ in 0..count {
        let angle = rng.range(0.0, std::f32::consts::TAU);
        let speed = rng.range(style.min_speed, style.max_speed);
        let size = rng.range(style.min_size, style.max_size);
        let hue = rng.range(style.min_hue, style.max_hue);
        particles.push(Particle::new(
            ctx.next_entity_id(),
            origin,
            Vec2::from_angle(angle) * speed,
            kind,
            size,
            hsl_to_rgb(hue, 1.0, 0.6),
            tuning.particle_decay,
        ));
    }
}

/// Move, fade and prune every particle
pub fn advance(particles: Vec<Particle>) -> Vec<Particle> {
    particles.into_iter().filter_map(Particle::advanced).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgSource, ScriptedSource};
    use proptest::prelude::*;

    #[test]
    fn test_spawn_count_and_origin() {
        let tuning = Tuning::default();
        let mut particles = Vec::new();
        let mut ctx = SimContext::default();
        let mut rng = PcgSource::new(7);
        let origin = Vec2::new(165.0, 265.0);
        spawn(&mut particles, &mut ctx, &mut rng, &tuning, 12, origin, ParticleKind::Burst);

        assert_eq!(particles.len(), 12);
        for p in &particles {
            assert_eq!(p.pos, origin);
            assert_eq!(p.opacity, 1.0);
            let speed = p.vel.length();
            assert!(speed >= tuning.burst.min_speed - 1e-4 && speed <= tuning.burst.max_speed + 1e-4);
        }
        let ids: Vec<u32> = particles.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_sparkle_is_slower_than_burst() {
        let tuning = Tuning::default();
        let mut rng = ScriptedSource::new(&[0.5]);
        let mut ctx = SimContext::default();
        let mut sparkles = Vec::new();
        let mut bursts = Vec::new();
        spawn(&mut sparkles, &mut ctx, &mut rng, &tuning, 1, Vec2::ZERO, ParticleKind::Sparkle);
        spawn(&mut bursts, &mut ctx, &mut rng, &tuning, 1, Vec2::ZERO, ParticleKind::Burst);
        assert!(sparkles[0].vel.length() < bursts[0].vel.length());
        assert_ne!(sparkles[0].color, bursts[0].color);
    }

    #[test]
    fn test_particle_moves_and_fades() {
        let p = Particle::new(1, Vec2::ZERO, Vec2::new(1.0, -2.0), ParticleKind::Sparkle, 3.0, 0, 0.25);
        let p = p.advanced().unwrap();
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.opacity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_uneven_decay_fades_by_fixed_step() {
        let mut particles = vec![Particle::new(1, Vec2::ZERO, Vec2::ZERO, ParticleKind::Sparkle, 1.0, 0, 0.3)];
        assert_eq!(particles[0].opacity, 1.0);
        for expected in [0.7, 0.4, 0.1] {
            particles = advance(particles);
            assert_eq!(particles.len(), 1);
            assert!((particles[0].opacity - expected).abs() < 1e-5, "opacity {}", particles[0].opacity);
        }
        particles = advance(particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_default_decay_lifetime() {
        let mut particles = vec![Particle::new(1, Vec2::ZERO, Vec2::ZERO, ParticleKind::Burst, 1.0, 0, 0.02)];
        for _ in 0..49 {
            particles = advance(particles);
        }
        assert_eq!(particles.len(), 1);
        particles = advance(particles);
        assert!(particles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_particle_gone_after_exact_lifetime(decay in 0.005f32..1.0) {
            let expected = lifetime_ticks(1.0, decay);
            let mut particles = vec![Particle::new(1, Vec2::ZERO, Vec2::ONE, ParticleKind::Sparkle, 1.0, 0, decay)];
            for _ in 0..expected - 1 {
                particles = advance(particles);
                prop_assert_eq!(particles.len(), 1);
                prop_assert!(particles[0].opacity >= 0.0 && particles[0].opacity <= 1.0);
            }
            particles = advance(particles);
            prop_assert!(particles.is_empty());
        }
    }
}
