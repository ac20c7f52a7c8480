//! Collision detection and touchdown classification
//!
//! The lander hull is a rotated rectangle; the ground is a polyline. Each tick
//! the hull edges are tested against the few terrain segments near the
//! lander, and the first crossing decides how the flight ends.

use glam::Vec2;

use super::geometry::{Segment, rotate_around};
use super::state::{FuelParticle, GameState, Lander, Outcome};
use super::terrain::{LandingPad, Terrain};
use crate::settings::{LanderTuning, TerrainTuning};

/// Where and how the hull met the ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Terrain segment that was crossed
    pub ground: Segment,
    /// Hull edge that crossed it
    pub edge: Segment,
}

/// Hull corners in world space: top-left, top-right, bottom-right, bottom-left
///
/// Rotation is clockwise-positive on screen, hence the negated angle.
pub fn hull_corners(lander: &Lander) -> [Vec2; 4] {
    let half = lander.size / 2.0;
    let center = lander.pos;
    [
        Vec2::new(center.x - half.x, center.y + half.y),
        Vec2::new(center.x + half.x, center.y + half.y),
        Vec2::new(center.x + half.x, center.y - half.y),
        Vec2::new(center.x - half.x, center.y - half.y),
    ]
    .map(|corner| rotate_around(corner, center, -lander.rotation))
}

/// Hull edges in corner order, closing back to the first corner
pub fn hull_edges(lander: &Lander) -> [Segment; 4] {
    let c = hull_corners(lander);
    [
        Segment::new(c[0], c[1]),
        Segment::new(c[1], c[2]),
        Segment::new(c[2], c[3]),
        Segment::new(c[3], c[0]),
    ]
}

/// Horizontal reach used to narrow the terrain search around the lander
///
/// Wide enough that any segment the hull can touch has both endpoints inside.
pub fn search_margin(lander: &LanderTuning, terrain: &TerrainTuning, pad: &LandingPad) -> f32 {
    lander.max_half_extent() + terrain.max_spacing.max(pad.width)
}

/// Terrain points with x inside `[center - margin, center + margin]`
///
/// Terrain is sorted by x, so the scan stops at the first point past the
/// upper bound.
pub fn candidate_points(terrain: &Terrain, center_x: f32, margin: f32) -> &[Vec2] {
    let points = terrain.points();
    let min_x = center_x - margin;
    let max_x = center_x + margin;

    let start = points
        .iter()
        .position(|p| p.x >= min_x)
        .unwrap_or(points.len());
    let len = points[start..]
        .iter()
        .take_while(|p| p.x <= max_x)
        .count();
    &points[start..start + len]
}

/// First hull/terrain crossing, scanning terrain left to right then hull edges
pub fn find_contact(lander: &Lander, terrain: &Terrain, margin: f32) -> Option<Contact> {
    let edges = hull_edges(lander);
    candidate_points(terrain, lander.pos.x, margin)
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .find_map(|ground| {
            edges
                .iter()
                .find(|edge| ground.intersects(edge))
                .map(|&edge| Contact { ground, edge })
        })
}

/// Decide the outcome of a touchdown
///
/// Checks run in a fixed order: vertical speed, then pad identity, then
/// attitude. A gentle, upright touch off the pad is still a miss. The pad is
/// identified by the touched segment's left x matching the pad's left x.
pub fn classify_touchdown(
    lander: &Lander,
    ground: &Segment,
    pad: &LandingPad,
    tuning: &LanderTuning,
) -> Outcome {
    if lander.vel.y.abs() > tuning.max_landing_velocity {
        Outcome::CrashedTooFast
    } else if ground.start.x != pad.position.x {
        Outcome::MissedPad
    } else if lander.rotation.abs() > tuning.max_landing_rotation {
        Outcome::CrashedSideways
    } else {
        Outcome::Success
    }
}

/// Check the airborne lander against the ground and settle the flight on contact
///
/// Returns the outcome if this call ended the flight. Grounded landers are
/// ignored, so at most one outcome is ever produced per lander.
pub fn detect_and_resolve(state: &mut GameState) -> Option<Outcome> {
    if state.lander.hit_ground {
        return None;
    }

    let pad = state.landing_pad();
    let margin = search_margin(&state.settings.lander, &state.settings.terrain, &pad);
    let contact = find_contact(&state.lander, &state.terrain, margin)?;

    let outcome = classify_touchdown(&state.lander, &contact.ground, &pad, &state.settings.lander);
    log::info!(
        "Touchdown: {:?} (vy={:.1}, rotation={:.1}, ground x={:.1})",
        outcome,
        state.lander.vel.y,
        state.lander.rotation,
        contact.ground.start.x
    );

    state.outcome = outcome;
    match outcome {
        Outcome::Success => settle_on_pad(&mut state.lander, &pad),
        _ => explode_lander(state),
    }
    state.lander.hit_ground = true;

    Some(outcome)
}

/// Lock the lander upright onto the pad surface
fn settle_on_pad(lander: &mut Lander, pad: &LandingPad) {
    lander.rotation = 0.0;
    lander.pos.y = pad.height() + lander.size.y / 2.0;
}

/// Hide the lander and burst it into debris particles
pub fn explode_lander(state: &mut GameState) {
    let tuning = state.settings.particles;
    let origin = state.lander.pos;
    let count = tuning.explosion_count;
    let lifetime = tuning.lifetime * tuning.explosion_lifetime_factor;

    state.lander.visible = false;
    state.lander.hit_ground = true;

    state.particles.reserve(count);
    for i in 0..count {
        // Evenly spaced directions around the full circle
        let heading = i as f32 / count as f32 * 360.0;
        let particle = FuelParticle::emit(&mut state.rng, origin, heading, lifetime, &tuning);
        state.particles.push(particle);
    }

    log::debug!(
        "Lander exploded at ({:.1}, {:.1}) into {} particles",
        origin.x,
        origin.y,
        count
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    /// Hand-built ground: a slope, a 40-wide pad at y=100, another slope
    ///
    /// All coordinates are exactly representable so resting contacts are exact.
    fn scenario() -> GameState {
        let pad = LandingPad {
            position: Vec2::new(200.0, 100.0),
            width: 40.0,
        };
        let mut points = Vec::new();
        let mut x = 0.0;
        while x < 200.0 {
            points.push(Vec2::new(x, 60.0 + x / 5.0));
            x += 12.5;
        }
        points.push(Vec2::new(200.0, 100.0));
        points.push(Vec2::new(240.0, 100.0));
        let mut x = 252.5;
        while x < 720.0 {
            points.push(Vec2::new(x, 100.0 - (x - 240.0) / 10.0));
            x += 12.5;
        }
        points.push(Vec2::new(720.0, 52.0));

        let mut state = GameState::new(Settings::default(), 2024);
        state.set_terrain(Terrain::from_points(points, pad));
        state.lander.vel = Vec2::ZERO;
        state.lander.accel = Vec2::ZERO;
        state.lander.rotation = 0.0;
        state
    }

    /// Lander resting exactly on the pad center
    fn on_pad_center(state: &mut GameState) {
        let pad = state.landing_pad();
        state.lander.pos = Vec2::new(pad.center().x, pad.height() + state.lander.size.y / 2.0);
    }

    #[test]
    fn test_hull_corners_unrotated() {
        let mut state = scenario();
        state.lander.pos = Vec2::new(100.0, 100.0);
        let c = hull_corners(&state.lander);
        assert_eq!(c[0], Vec2::new(90.0, 112.5));
        assert_eq!(c[1], Vec2::new(110.0, 112.5));
        assert_eq!(c[2], Vec2::new(110.0, 87.5));
        assert_eq!(c[3], Vec2::new(90.0, 87.5));
    }

    #[test]
    fn test_hull_rotates_clockwise() {
        let mut state = scenario();
        state.lander.pos = Vec2::new(0.0, 0.0);
        state.lander.rotation = 90.0;
        let c = hull_corners(&state.lander);
        // Top-left corner swings over to the top-right quadrant
        assert!((c[0] - Vec2::new(12.5, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_candidate_points_window() {
        let state = scenario();
        let points = candidate_points(&state.terrain, 220.0, 50.0);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.x >= 170.0 && p.x <= 270.0));
        assert!(points.windows(2).all(|w| w[0].x < w[1].x));
        assert!(points.contains(&Vec2::new(200.0, 100.0)));
        assert!(points.contains(&Vec2::new(240.0, 100.0)));

        assert!(candidate_points(&state.terrain, 5000.0, 50.0).is_empty());
    }

    #[test]
    fn test_no_contact_in_the_air() {
        let mut state = scenario();
        state.lander.pos = Vec2::new(220.0, 300.0);
        assert_eq!(detect_and_resolve(&mut state), None);
        assert_eq!(state.outcome, Outcome::Pending);
        assert!(!state.lander.hit_ground);
    }

    #[test]
    fn test_resting_on_pad_is_success() {
        let mut state = scenario();
        on_pad_center(&mut state);
        state.lander.rotation = 3.0;
        // Nudge down so the tilted hull definitely crosses the pad
        state.lander.pos.y -= 2.0;

        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::Success));
        assert_eq!(state.outcome, Outcome::Success);
        assert!(state.lander.hit_ground);
        assert!(state.lander.visible);
        assert_eq!(state.lander.rotation, 0.0);
        assert_eq!(state.lander.pos.y, 112.5);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_exact_rest_on_pad_center() {
        let mut state = scenario();
        on_pad_center(&mut state);
        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::Success));
        assert!(state.lander.hit_ground);
        assert_eq!(state.lander.rotation, 0.0);
    }

    #[test]
    fn test_too_fast_explodes() {
        let mut state = scenario();
        on_pad_center(&mut state);
        let max = state.settings.lander.max_landing_velocity;
        state.lander.vel.y = -(max + 1.0);

        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::CrashedTooFast));
        assert!(state.lander.hit_ground);
        assert!(!state.lander.visible);
        assert_eq!(state.particles.len(), 20);
    }

    #[test]
    fn test_too_fast_beats_missed_pad() {
        let mut state = scenario();
        state.lander.pos = Vec2::new(100.0, 80.0 + 12.5 - 1.0);
        state.lander.vel.y = -100.0;
        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::CrashedTooFast));
    }

    #[test]
    fn test_off_pad_is_missed_even_when_gentle() {
        let mut state = scenario();
        // Ground at x=100 is y=80 on the left slope
        state.lander.pos = Vec2::new(100.0, 80.0 + 12.5 - 1.0);
        assert!(state.lander.rotation.abs() <= state.settings.lander.max_landing_rotation);

        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::MissedPad));
        assert!(!state.lander.visible);
        assert_eq!(state.particles.len(), state.settings.particles.explosion_count);
    }

    #[test]
    fn test_tilted_on_pad_is_sideways() {
        let mut state = scenario();
        on_pad_center(&mut state);
        state.lander.pos.y -= 2.0;
        state.lander.rotation = state.settings.lander.max_landing_rotation + 1.0;

        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::CrashedSideways));
        assert!(!state.lander.visible);
    }

    #[test]
    fn test_straddling_pad_left_edge_is_missed() {
        // Known edge case: the segment before the pad is scanned first, so a
        // hull overlapping both the slope and the pad counts as a miss.
        let mut state = scenario();
        state.lander.pos = Vec2::new(200.0, 100.0 + 12.5 - 1.0);
        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::MissedPad));
    }

    #[test]
    fn test_segment_after_pad_is_missed() {
        let mut state = scenario();
        let ground = Segment::new(Vec2::new(240.0, 100.0), Vec2::new(252.5, 98.75));
        let outcome = classify_touchdown(
            &state.lander,
            &ground,
            &state.landing_pad(),
            &state.settings.lander,
        );
        assert_eq!(outcome, Outcome::MissedPad);

        // A real contact just right of the pad resolves the same way
        state.lander.pos = Vec2::new(262.0, 97.8 + 12.5 - 1.0);
        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::MissedPad));
    }

    #[test]
    fn test_grounded_lander_is_not_rechecked() {
        let mut state = scenario();
        on_pad_center(&mut state);
        assert_eq!(detect_and_resolve(&mut state), Some(Outcome::Success));

        state.lander.vel.y = -500.0;
        state.lander.pos.y -= 5.0;
        assert_eq!(detect_and_resolve(&mut state), None);
        assert_eq!(state.outcome, Outcome::Success);
    }

    #[test]
    fn test_explosion_particles_radiate() {
        let mut state = scenario();
        state.lander.pos = Vec2::new(300.0, 300.0);
        explode_lander(&mut state);

        assert!(!state.lander.visible);
        assert!(state.lander.hit_ground);
        assert_eq!(state.particles.len(), 20);
        let expected_life = state.settings.particles.lifetime * state.settings.particles.explosion_lifetime_factor;
        for p in &state.particles {
            assert_eq!(p.pos, Vec2::new(300.0, 300.0));
            assert_eq!(p.lifetime, expected_life);
            assert!(p.rotation_vel == 1.0 || p.rotation_vel == -1.0);
            assert!(p.vel.length() > 0.0);
        }
        // Debris flies in every direction, not just one
        assert!(state.particles.iter().any(|p| p.vel.y > 0.0));
        assert!(state.particles.iter().any(|p| p.vel.y < 0.0));
    }
}
