//! Deterministic simulation module
//!
//! All flight logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, windowing or input-device dependencies

pub mod collision;
pub mod geometry;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{
    Contact, candidate_points, classify_touchdown, detect_and_resolve, explode_lander,
    find_contact, hull_corners, hull_edges, search_margin,
};
pub use geometry::{Segment, rotate_around, segments_intersect};
pub use state::{FuelParticle, GameState, Lander, Outcome, Star, generate_stars};
pub use terrain::{LandingPad, Terrain, generate_terrain};
pub use tick::{TickInput, step_particles, tick};
