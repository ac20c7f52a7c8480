//! Demo pilot
//!
//! Flies the lander toward the pad and tries to set it down gently. Used by
//! the headless runner and for attract-mode style demos. It only produces
//! control intents; the simulation applies them like any player input.

use crate::sim::{GameState, TickInput};

/// Simple proportional pilot: steer over the pad, then descend upright
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Largest tilt used for horizontal correction (degrees)
    pub max_tilt: f32,
    /// Horizontal speed cap while traversing (units/s)
    pub cruise_speed: f32,
    /// Clearance kept above the terrain between the lander and the pad
    pub cruise_clearance: f32,
    /// Descent speed targeted on final approach, as a fraction of the landing limit
    pub approach_fraction: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            max_tilt: 25.0,
            cruise_speed: 30.0,
            cruise_clearance: 40.0,
            approach_fraction: 0.4,
        }
    }
}

impl Autopilot {
    /// Controls to hold for the next tick
    pub fn controls(&self, state: &GameState) -> TickInput {
        let lander = &state.lander;
        if lander.hit_ground || state.outcome.is_terminal() || lander.fuel <= 0.0 {
            return TickInput::default();
        }

        let tuning = &state.settings.lander;
        let pad = state.landing_pad();
        // Keep the whole hull inside the pad, not just its center
        let slack = ((pad.width - lander.size.x) / 2.0).max(1.0);
        let dx = pad.center().x - lander.pos.x;
        let over_pad = dx.abs() < slack * 0.5;

        let ground = self.highest_ground(state, lander.pos.x, pad.center().x);
        let altitude = lander.altitude_above(ground);
        let descent = -lander.vel.y;

        // Horizontal: pick a tilt that drives vx toward the desired speed
        let desired_vx = (dx * 0.5).clamp(-self.cruise_speed, self.cruise_speed);
        let near_ground = altitude < self.cruise_clearance * 0.5 && over_pad;
        let desired_tilt = if near_ground {
            0.0
        } else {
            ((desired_vx - lander.vel.x) * 1.5).clamp(-self.max_tilt, self.max_tilt)
        };

        let tolerance = tuning.side_thruster_strength;
        let rotate_right = lander.rotation < desired_tilt - tolerance;
        let rotate_left = lander.rotation > desired_tilt + tolerance;

        // Vertical: hold altitude until over the pad, then sink at a safe rate
        let approach = tuning.max_landing_velocity * self.approach_fraction;
        let target_descent = if over_pad {
            (altitude * 0.5).clamp(approach * 0.25, approach)
        } else if altitude > self.cruise_clearance {
            approach * 0.5
        } else {
            -approach * 0.5
        };
        let upright_enough = lander.rotation.abs() < 90.0;
        let thrust = upright_enough && descent > target_descent;

        TickInput {
            thrust,
            rotate_left,
            rotate_right,
        }
    }

    /// Highest terrain point between two x positions (inclusive)
    fn highest_ground(&self, state: &GameState, a: f32, b: f32) -> f32 {
        let half = state.lander.size.x / 2.0;
        let (lo, hi) = if a <= b { (a - half, b + half) } else { (b - half, a + half) };
        state
            .terrain
            .points()
            .iter()
            .filter(|p| p.x >= lo && p.x <= hi)
            .map(|p| p.y)
            .fold(state.terrain.height_at(a).unwrap_or(0.0), f32::max)
    }
}
