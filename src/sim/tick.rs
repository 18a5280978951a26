//! Per-tick simulation step
//!
//! Turns one snapshot into the next. Kinematics take exactly one fixed step
//! per call regardless of elapsed time; elapsed time only drives the spawn
//! clock. The input snapshot is never modified.

use super::collision;
use super::hazards;
use super::particles::{self, ParticleKind};
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, SimContext, WorldState};
use crate::tuning::Tuning;

/// Clamp a frame driver's elapsed time into something the clock can use
///
/// `None` means one nominal frame. Negative, NaN and infinite values are
/// replaced by one nominal frame; long stalls are capped.
pub fn sanitize_elapsed(elapsed_ms: Option<f64>, tuning: &Tuning) -> f64 {
    match elapsed_ms {
        None => tuning.frame_ms,
        Some(ms) if ms.is_finite() && ms >= 0.0 => {
            if ms > tuning.max_elapsed_ms {
                log::warn!("Elapsed {ms:.1}ms capped to {}ms", tuning.max_elapsed_ms);
                tuning.max_elapsed_ms
            } else {
                ms
            }
        }
        Some(ms) => {
            log::warn!("Rejected elapsed time {ms}, using one frame");
            tuning.frame_ms
        }
    }
}

/// Advance the world by one tick
///
/// Order: player, particles, hazards (scroll, cull, spawn), collisions,
/// then score. A fatal tick keeps the previous score.
pub fn step<R: RandomSource + ?Sized>(
    world: &WorldState,
    ctx: &mut SimContext,
    rng: &mut R,
    tuning: &Tuning,
    elapsed_ms: f64,
) -> WorldState {
    if world.phase != GamePhase::Running {
        return world.clone();
    }

    ctx.clock_ms += elapsed_ms;
    let mut events = Vec::new();

    let mut player = world.player.integrated(tuning.gravity);
    let mut particles = particles::advance(world.particles.clone());
    let mut hazards = hazards::advance(world.hazards.clone(), tuning);

    let crossing = hazards::first_crossing(&hazards, tuning.player_x, tuning);

    if ctx.since_last_spawn() > tuning.spawn_interval_ms {
        let hazard = hazards::spawn(ctx.next_entity_id(), rng, tuning);
        log::debug!("Spawned {:?} #{}", hazard.hazard_type(), hazard.id());
        events.push(GameEvent::Spawned(hazard.hazard_type()));
        hazards.push(hazard);
        ctx.restart_spawn_timer();
    }

    let contact = collision::resolve(&mut player, &mut hazards, tuning);
    for origin in &contact.boosts {
        particles::spawn(
            &mut particles,
            ctx,
            rng,
            tuning,
            tuning.sparkle.count,
            *origin,
            ParticleKind::Sparkle,
        );
        events.push(GameEvent::Boosted);
    }

    let mut score = world.score;
    let phase = match contact.fatal {
        Some(cause) => {
            particles::spawn(
                &mut particles,
                ctx,
                rng,
                tuning,
                tuning.burst.count,
                player.center(tuning),
                ParticleKind::Burst,
            );
            events.push(GameEvent::Died(cause));
            log::info!("Game over ({cause:?}), score {score}");
            GamePhase::Over
        }
        None => {
            if let Some(index) = crossing {
                hazards[index].mark_scored();
                score += 1;
                events.push(GameEvent::Scored { total: score });
                log::debug!("Passed hazard #{}, score {score}", hazards[index].id());
            }
            GamePhase::Running
        }
    };

    WorldState {
        player,
        hazards,
        particles,
        score,
        phase,
        tick: world.tick + 1,
        events,
    }
}
