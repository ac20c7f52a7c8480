//! Fixed timestep simulation tick
//!
//! Advances the lander and particles deterministically. Order matters and is
//! kept stable for reproducible trajectories:
//! 1. Integrate the lander (position first, then velocity, then rotation)
//! 2. Wrap horizontally and catch tunnelling below the ground datum
//! 3. Reset acceleration to gravity and run collision detection
//! 4. Step particles
//! 5. Apply controls, which set the acceleration used by the *next* tick

use glam::Vec2;
use rand::Rng;

use super::collision::{detect_and_resolve, explode_lander};
use super::geometry::heading_vector;
use super::state::{FuelParticle, GameState, Outcome};
use crate::normalize_degrees;

/// Control intents held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Main engine
    pub thrust: bool,
    /// Rotate counter-clockwise
    pub rotate_left: bool,
    /// Rotate clockwise
    pub rotate_right: bool,
}

/// Advance the game state by one fixed timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if !state.lander.hit_ground {
        integrate_lander(state, dt);

        if state.lander.pos.y < 0.0 {
            log::debug!(
                "Lander fell through the ground datum at x={:.1}",
                state.lander.pos.x
            );
            state.outcome = Outcome::MissedPad;
            explode_lander(state);
        }

        state.lander.accel = Vec2::new(0.0, state.settings.gravity);
        state.lander.rotation_vel = 0.0;

        if !state.lander.hit_ground {
            detect_and_resolve(state);
        }
    }

    step_particles(&mut state.particles, dt);
    apply_controls(state, input, dt);
}

/// Velocity-Verlet position update followed by an explicit Euler velocity update
fn integrate_lander(state: &mut GameState, dt: f32) {
    let width = state.settings.playfield.width;
    // Horizontal space is toroidal once the hull is fully off-screen
    let edge = state.settings.lander.half_diagonal();
    let lander = &mut state.lander;

    lander.pos += dt * (lander.vel + dt * lander.accel / 2.0);
    lander.vel += dt * lander.accel;
    lander.rotation = normalize_degrees(lander.rotation + lander.rotation_vel);

    if lander.pos.x > width + edge {
        lander.pos.x -= width + 2.0 * edge;
    } else if lander.pos.x < -edge {
        lander.pos.x += width + 2.0 * edge;
    }
}

/// Move, spin and age particles; drop the expired ones
pub fn step_particles(particles: &mut Vec<FuelParticle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.rotation += particle.rotation_vel;
        particle.age += dt;
    }
    particles.retain(|p| !p.is_expired());
}

/// Turn held controls into next-tick acceleration, spin and fuel burn
fn apply_controls(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.lander.fuel <= 0.0 {
        state.lander.fuel = 0.0;
    }
    if !state.lander.can_fire() {
        return;
    }

    let tuning = state.settings.lander;

    if input.thrust {
        let heading = heading_vector(state.lander.rotation);
        state.lander.accel = Vec2::new(0.0, state.settings.gravity) + heading * tuning.thruster_strength;
        state.lander.burn(tuning.fuel_consumption_rate * dt);
        emit_exhaust(state);
    }

    if input.rotate_left {
        state.lander.rotation_vel = -tuning.side_thruster_strength;
        state.lander.burn(tuning.fuel_consumption_rate * dt * 0.5);
    } else if input.rotate_right {
        state.lander.rotation_vel = tuning.side_thruster_strength;
        state.lander.burn(tuning.fuel_consumption_rate * dt * 0.5);
    }
}

/// Puff an exhaust particle if enough sim time has passed since the last one
fn emit_exhaust(state: &mut GameState) {
    let tuning = state.settings.particles;
    let now = state.time_ticks;
    let step_ms = state.settings.step_ms;
    let due = state
        .last_exhaust_tick
        .is_none_or(|last| now.saturating_sub(last) as f32 * step_ms > tuning.exhaust_interval_ms);
    if !due {
        return;
    }

    let lifetime = state
        .rng
        .random_range(tuning.lifetime..=tuning.lifetime + tuning.lifetime_spread);
    let particle = FuelParticle::emit(
        &mut state.rng,
        state.lander.pos,
        state.lander.rotation,
        lifetime,
        &tuning,
    );
    state.particles.push(particle);
    state.last_exhaust_tick = Some(now);
}
