//! Simulation tuning
//!
//! Every gameplay constant lives here so a session can be built from a JSON
//! document. Values are fixed once a `Session` is constructed.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while building or loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Logical playfield bounds (world units, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Lander hull, engines and landing tolerances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderTuning {
    /// Hull width (x) and height (y)
    pub size: Vec2,
    pub starting_fuel: f32,
    /// Fuel per second of main thrust (rotation burns half)
    pub fuel_consumption_rate: f32,
    pub thruster_strength: f32,
    /// Degrees per tick while a rotation control is held
    pub side_thruster_strength: f32,
    pub max_landing_velocity: f32,
    /// Degrees either side of upright
    pub max_landing_rotation: f32,
    /// Spawn height below the top of the playfield
    pub spawn_top_margin: f32,
    pub max_spawn_speed: f32,
    pub max_spawn_rotation: f32,
}

impl Default for LanderTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(LANDER_WIDTH, LANDER_HEIGHT),
            starting_fuel: STARTING_FUEL,
            fuel_consumption_rate: FUEL_CONSUMPTION_RATE,
            thruster_strength: THRUSTER_STRENGTH,
            side_thruster_strength: SIDE_THRUSTER_STRENGTH,
            max_landing_velocity: MAX_LANDING_VELOCITY,
            max_landing_rotation: MAX_LANDING_ROTATION,
            spawn_top_margin: 20.0,
            max_spawn_speed: 20.0,
            max_spawn_rotation: 20.0,
        }
    }
}

impl LanderTuning {
    /// Largest half-extent of the unrotated hull
    pub fn max_half_extent(&self) -> f32 {
        self.size.x.max(self.size.y) / 2.0
    }

    /// Half of the hull diagonal (furthest a corner reaches from the center)
    #[inline]
    pub fn half_diagonal(&self) -> f32 {
        self.size.length() / 2.0
    }
}

/// Terrain generator bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    pub min_height: f32,
    pub max_height: f32,
    /// Largest height change between neighbouring points
    pub variation: f32,
    pub min_spacing: f32,
    pub max_spacing: f32,
    pub pad_min_extra: f32,
    pub pad_max_extra: f32,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            min_height: TERRAIN_MIN_HEIGHT,
            max_height: TERRAIN_MAX_HEIGHT,
            variation: TERRAIN_VARIATION,
            min_spacing: TERRAIN_MIN_SPACING,
            max_spacing: TERRAIN_MAX_SPACING,
            pad_min_extra: PAD_MIN_EXTRA_WIDTH,
            pad_max_extra: PAD_MAX_EXTRA_WIDTH,
        }
    }
}

/// Exhaust and explosion particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    /// World units per tick
    pub speed: f32,
    /// Base lifetime in seconds
    pub lifetime: f32,
    /// Exhaust lifetime is uniform in [lifetime, lifetime + spread]
    pub lifetime_spread: f32,
    pub size: f32,
    /// Random angular jitter applied to particle direction (degrees)
    pub jitter_degrees: f32,
    pub max_initial_rotation: f32,
    /// Minimum sim time between exhaust puffs
    pub exhaust_interval_ms: f32,
    pub explosion_count: usize,
    pub explosion_lifetime_factor: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            speed: PARTICLE_SPEED,
            lifetime: PARTICLE_LIFETIME,
            lifetime_spread: 1.0,
            size: PARTICLE_SIZE,
            jitter_degrees: 25.0,
            max_initial_rotation: 90.0,
            exhaust_interval_ms: EXHAUST_INTERVAL_MS,
            explosion_count: EXPLOSION_PARTICLES,
            explosion_lifetime_factor: 2.0,
        }
    }
}

/// Background starfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarTuning {
    pub count: usize,
    /// Stars are scattered over [-extent, extent] on both axes
    pub extent: f32,
}

impl Default for StarTuning {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            extent: STAR_EXTENT,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: Playfield,
    pub gravity: f32,
    /// Fixed simulation step
    pub step_ms: f32,
    /// Frame deltas above this are clamped before accumulation
    pub max_frame_ms: f32,
    pub lander: LanderTuning,
    pub terrain: TerrainTuning,
    pub particles: ParticleTuning,
    pub stars: StarTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            gravity: GRAVITY,
            step_ms: STEP_MS,
            max_frame_ms: MAX_FRAME_MS,
            lander: LanderTuning::default(),
            terrain: TerrainTuning::default(),
            particles: ParticleTuning::default(),
            stars: StarTuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Fixed step in seconds
    #[inline]
    pub fn step_seconds(&self) -> f32 {
        self.step_ms / 1000.0
    }

    /// Check construction-time preconditions
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn require(ok: bool, reason: &str) -> Result<(), SettingsError> {
            if ok {
                Ok(())
            } else {
                Err(SettingsError::Invalid(reason.to_string()))
            }
        }

        let all_finite = [
            self.playfield.width,
            self.playfield.height,
            self.gravity,
            self.step_ms,
            self.max_frame_ms,
            self.lander.size.x,
            self.lander.size.y,
            self.lander.starting_fuel,
            self.lander.fuel_consumption_rate,
            self.lander.thruster_strength,
            self.lander.side_thruster_strength,
            self.lander.max_landing_velocity,
            self.lander.max_landing_rotation,
            self.lander.spawn_top_margin,
            self.lander.max_spawn_speed,
            self.lander.max_spawn_rotation,
            self.terrain.min_height,
            self.terrain.max_height,
            self.terrain.variation,
            self.terrain.min_spacing,
            self.terrain.max_spacing,
            self.terrain.pad_min_extra,
            self.terrain.pad_max_extra,
            self.particles.speed,
            self.particles.lifetime,
            self.particles.lifetime_spread,
            self.particles.size,
            self.particles.jitter_degrees,
            self.particles.max_initial_rotation,
            self.particles.exhaust_interval_ms,
            self.particles.explosion_lifetime_factor,
            self.stars.extent,
        ]
        .iter()
        .all(|v| v.is_finite());
        require(all_finite, "all values must be finite")?;

        require(
            self.playfield.width > 0.0 && self.playfield.height > 0.0,
            "playfield must have positive size",
        )?;
        require(self.step_ms > 0.0, "step_ms must be positive")?;
        require(
            self.max_frame_ms >= self.step_ms,
            "max_frame_ms must be at least one step",
        )?;
        require(
            self.lander.size.x > 0.0 && self.lander.size.y > 0.0,
            "lander size must be positive",
        )?;
        require(self.lander.starting_fuel >= 0.0, "starting_fuel must be non-negative")?;
        require(
            self.lander.fuel_consumption_rate >= 0.0,
            "fuel_consumption_rate must be non-negative",
        )?;
        require(
            self.lander.max_spawn_speed >= 0.0 && self.lander.max_spawn_rotation >= 0.0,
            "spawn ranges must be non-negative",
        )?;

        let t = &self.terrain;
        require(
            0.0 <= t.min_height && t.min_height <= t.max_height,
            "terrain heights must satisfy 0 <= min_height <= max_height",
        )?;
        require(t.variation >= 0.0, "terrain variation must be non-negative")?;
        require(
            0.0 < t.min_spacing && t.min_spacing <= t.max_spacing,
            "terrain spacing must satisfy 0 < min_spacing <= max_spacing",
        )?;
        require(
            0.0 <= t.pad_min_extra && t.pad_min_extra <= t.pad_max_extra,
            "pad extra width must satisfy 0 <= pad_min_extra <= pad_max_extra",
        )?;
        require(
            self.lander.size.x + t.pad_max_extra <= self.playfield.width,
            "widest landing pad must fit in the playfield",
        )?;

        require(
            self.particles.lifetime > 0.0 && self.particles.lifetime_spread >= 0.0,
            "particle lifetime must be positive",
        )?;
        let p = &self.particles;
        require(p.speed >= 0.0, "particle speed must be non-negative")?;
        require(
            p.jitter_degrees >= 0.0 && p.max_initial_rotation >= 0.0,
            "particle jitter and initial rotation must be non-negative",
        )?;
        require(
            p.exhaust_interval_ms >= 0.0,
            "exhaust interval must be non-negative",
        )?;
        require(
            p.explosion_lifetime_factor > 0.0,
            "explosion lifetime factor must be positive",
        )?;
        require(self.stars.extent >= 0.0, "star extent must be non-negative")?;

        Ok(())
    }
}
