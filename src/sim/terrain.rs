//! Procedural terrain with a guaranteed landing pad
//!
//! Terrain is a polyline of ground samples sorted by x. A bounded random walk
//! produces the jagged surface; exactly one pair of neighbouring points is
//! forced flat to form the landing pad.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use crate::settings::TerrainTuning;

/// The flat landing pad produced alongside the terrain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingPad {
    /// Left end of the pad (on the surface)
    pub position: Vec2,
    pub width: f32,
}

impl LandingPad {
    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.position.y
    }

    /// Midpoint of the pad surface
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.x + self.width / 2.0, self.position.y)
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }
}

/// Piecewise-linear ground profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    points: Vec<Vec2>,
    pad: LandingPad,
}

impl Terrain {
    /// Build terrain from explicit points
    ///
    /// Points must be sorted by strictly increasing x and `pad` must describe
    /// one of the flat spans. Used for hand-built scenarios.
    pub fn from_points(points: Vec<Vec2>, pad: LandingPad) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].x < w[1].x));
        Self { points, pad }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn landing_pad(&self) -> LandingPad {
        self.pad
    }

    /// Consecutive point pairs, left to right
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Ground height at `x` by linear interpolation (None outside the terrain)
    pub fn height_at(&self, x: f32) -> Option<f32> {
        self.segments()
            .find(|s| x >= s.start.x && x <= s.end.x)
            .map(|s| {
                let span = s.end.x - s.start.x;
                let t = (x - s.start.x) / span;
                s.start.y + (s.end.y - s.start.y) * t
            })
    }
}

/// Generate terrain across `[0, width]` with one flat landing pad
///
/// The pad is `lander_width` plus a random extra and sits at a random x that
/// keeps it fully inside the playfield. Deterministic for a given RNG state.
pub fn generate_terrain<R: Rng>(
    rng: &mut R,
    width: f32,
    lander_width: f32,
    tuning: &TerrainTuning,
) -> Terrain {
    let first_y = rng.random_range(tuning.min_height..=(tuning.min_height + tuning.max_height) / 2.0);
    let pad_width = lander_width + rng.random_range(tuning.pad_min_extra..=tuning.pad_max_extra);
    let pad_x = rng.random_range(0.0..=(width - pad_width).max(0.0));

    let mut points = vec![Vec2::new(0.0, first_y)];
    let mut pad_y = None;

    while let Some(&prev) = points.last() {
        if prev.x >= width {
            break;
        }

        let x = prev.x + rng.random_range(tuning.min_spacing..=tuning.max_spacing);
        let low = tuning.min_height.max(prev.y - tuning.variation);
        let high = tuning.max_height.min(prev.y + tuning.variation);
        let y = rng.random_range(low..=high);

        if pad_y.is_none() && x >= pad_x {
            // Snap the crossing point onto the pad's left edge
            let left = if pad_x > prev.x {
                let left = Vec2::new(pad_x, y);
                points.push(left);
                left
            } else {
                // Pad starts on the current point; flatten from there
                prev
            };
            points.push(Vec2::new(pad_x + pad_width, left.y));
            pad_y = Some(left.y);
        } else {
            points.push(Vec2::new(x, y));
        }
    }

    let pad = LandingPad {
        position: Vec2::new(pad_x, pad_y.unwrap_or(first_y)),
        width: pad_width,
    };

    log::info!(
        "Terrain generated: {} points, pad at ({:.1}, {:.1}) width {:.1}",
        points.len(),
        pad.position.x,
        pad.position.y,
        pad.width
    );

    Terrain { points, pad }
}
