//! Moon Lander - a 2D lunar descent arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, collisions, outcomes)
//! - `session`: Fixed-timestep session controller and read-only snapshots
//! - `settings`: Data-driven tuning, loaded from JSON
//! - `autopilot`: Demo pilot used by the headless runner
//!
//! Drawing, windowing and keyboard wiring live outside this crate. They feed
//! control events and elapsed time in, and read state back out.

pub mod autopilot;
pub mod session;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use session::{Control, HudReadout, Session};
pub use settings::{Settings, SettingsError};

/// Default tuning constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds
    pub const STEP_MS: f32 = 15.0;
    /// Largest frame delta fed into the accumulator at once
    pub const MAX_FRAME_MS: f32 = 250.0;

    /// Logical playfield dimensions (world units)
    pub const PLAYFIELD_WIDTH: f32 = 720.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Downward acceleration (world units/s²)
    pub const GRAVITY: f32 = -30.0;

    /// Lander defaults
    pub const LANDER_WIDTH: f32 = 20.0;
    pub const LANDER_HEIGHT: f32 = 25.0;
    pub const STARTING_FUEL: f32 = 80.0;
    /// Fuel consumed per second of main thrust
    pub const FUEL_CONSUMPTION_RATE: f32 = 10.0;
    /// Must exceed |GRAVITY| or the lander can never climb
    pub const THRUSTER_STRENGTH: f32 = 55.0;
    /// Degrees per tick while a rotation key is held
    pub const SIDE_THRUSTER_STRENGTH: f32 = 2.0;
    pub const MAX_LANDING_VELOCITY: f32 = 40.0;
    pub const MAX_LANDING_ROTATION: f32 = 10.0;

    /// Terrain defaults
    pub const TERRAIN_MIN_HEIGHT: f32 = 20.0;
    pub const TERRAIN_MAX_HEIGHT: f32 = 250.0;
    /// Higher values make rockier terrain
    pub const TERRAIN_VARIATION: f32 = 10.0;
    pub const TERRAIN_MIN_SPACING: f32 = 12.0;
    pub const TERRAIN_MAX_SPACING: f32 = 15.0;
    /// Landing pad is the lander width plus this much extra
    pub const PAD_MIN_EXTRA_WIDTH: f32 = 10.0;
    pub const PAD_MAX_EXTRA_WIDTH: f32 = 40.0;

    /// Particle defaults
    pub const PARTICLE_SPEED: f32 = 3.0;
    pub const PARTICLE_LIFETIME: f32 = 0.5;
    pub const PARTICLE_SIZE: f32 = 4.0;
    pub const EXHAUST_INTERVAL_MS: f32 = 20.0;
    pub const EXPLOSION_PARTICLES: usize = 20;

    /// Background stars
    pub const STAR_COUNT: usize = 300;
    pub const STAR_EXTENT: f32 = 2000.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}
