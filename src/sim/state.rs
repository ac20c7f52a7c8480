//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`: terrain, lander,
//! particles, outcome, starfield and the seeded RNG that produced them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::{LandingPad, Terrain, generate_terrain};
use crate::settings::{LanderTuning, ParticleTuning, Settings, StarTuning};

/// How the flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Still flying
    #[default]
    Pending,
    Success,
    CrashedTooFast,
    CrashedSideways,
    MissedPad,
}

impl Outcome {
    /// Any outcome other than `Pending` holds until restart
    #[inline]
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::Pending
    }

    /// Banner text for the end-of-flight screen
    pub fn headline(&self) -> Option<&'static str> {
        match self {
            Outcome::Pending => None,
            Outcome::Success => Some("LANDED SUCCESSFULLY!!"),
            Outcome::CrashedTooFast => Some("CRASHED! Hit the ground too fast!"),
            Outcome::CrashedSideways => Some("CRASHED! Didn't land upright!"),
            Outcome::MissedPad => Some("FAILED! Missed the landing area!"),
        }
    }

    /// Restart hint shown under the headline
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Outcome::Pending => None,
            Outcome::Success => Some("Press R to play again"),
            Outcome::CrashedTooFast | Outcome::CrashedSideways | Outcome::MissedPad => {
                Some("Press R to try again")
            }
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lander {
    /// Hull center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Acceleration applied on the next integration step
    pub accel: Vec2,
    /// Degrees clockwise from upright, kept in [-180, 180)
    pub rotation: f32,
    /// Degrees per tick
    pub rotation_vel: f32,
    pub fuel: f32,
    /// Set once on touchdown (or explosion); stops physics and collision checks
    pub hit_ground: bool,
    /// Cleared when the lander explodes
    pub visible: bool,
    /// Hull width (x) and height (y)
    pub size: Vec2,
}

impl Lander {
    /// Spawn near the top of the playfield with random drift and attitude
    pub fn spawn<R: Rng>(rng: &mut R, playfield_width: f32, playfield_height: f32, tuning: &LanderTuning) -> Self {
        let x = rng.random_range(0.0..=playfield_width);
        let drift = rng.random_range(-tuning.max_spawn_speed..=tuning.max_spawn_speed);
        let rotation = rng.random_range(-tuning.max_spawn_rotation..=tuning.max_spawn_rotation);

        Self {
            pos: Vec2::new(x, playfield_height - tuning.spawn_top_margin),
            vel: Vec2::new(drift, 0.0),
            accel: Vec2::ZERO,
            rotation: crate::normalize_degrees(rotation),
            rotation_vel: 0.0,
            fuel: tuning.starting_fuel,
            hit_ground: false,
            visible: true,
            size: tuning.size,
        }
    }

    /// A grounded lander or an empty tank ignores the controls
    #[inline]
    pub fn can_fire(&self) -> bool {
        !self.hit_ground && self.fuel > 0.0
    }

    /// Burn fuel, never dropping below zero
    #[inline]
    pub fn burn(&mut self, amount: f32) {
        self.fuel = (self.fuel - amount).max(0.0);
    }

    /// Height of the hull bottom above `ground_y` when upright
    #[inline]
    pub fn altitude_above(&self, ground_y: f32) -> f32 {
        self.pos.y - self.size.y / 2.0 - ground_y
    }
}

/// Exhaust or debris particle (visual only, never collides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelParticle {
    pub pos: Vec2,
    /// World units per tick
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    pub rotation_vel: f32,
    /// Seconds this particle lives
    pub lifetime: f32,
    /// Seconds lived so far
    pub age: f32,
    pub size: f32,
}

impl FuelParticle {
    /// Emit a particle at `pos` travelling away from `heading` (degrees)
    ///
    /// Each velocity axis gets its own angular jitter so puffs spread out.
    pub fn emit<R: Rng>(rng: &mut R, pos: Vec2, heading: f32, lifetime: f32, tuning: &ParticleTuning) -> Self {
        let jitter = tuning.jitter_degrees;
        let jitter_x = rng.random_range(-jitter..=jitter);
        let jitter_y = rng.random_range(-jitter..=jitter);
        let vel = Vec2::new(
            -tuning.speed * (heading + jitter_x).to_radians().sin(),
            -tuning.speed * (heading + jitter_y).to_radians().cos(),
        );
        let rotation = rng.random_range(0.0..=tuning.max_initial_rotation);
        let rotation_vel = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        Self {
            pos,
            vel,
            rotation,
            rotation_vel,
            lifetime,
            age: 0.0,
            size: tuning.size,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age > self.lifetime
    }

    /// 0 when spawned, 1 at end of life
    #[inline]
    pub fn age_fraction(&self) -> f32 {
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    /// Fades out over the particle's life
    #[inline]
    pub fn opacity(&self) -> f32 {
        0.7 * (1.0 - self.age_fraction())
    }
}

/// Background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// 0-1
    pub opacity: f32,
}

/// Scatter a fresh starfield
pub fn generate_stars<R: Rng>(rng: &mut R, tuning: &StarTuning) -> Vec<Star> {
    let extent = tuning.extent;
    (0..tuning.count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random_range(-extent..=extent),
                rng.random_range(-extent..=extent),
            ),
            opacity: rng.random_range(0.0..=1.0),
        })
        .collect()
}

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub terrain: Terrain,
    pub lander: Lander,
    /// Live particles, in spawn order
    pub particles: Vec<FuelParticle>,
    pub outcome: Outcome,
    pub stars: Vec<Star>,
    /// Fixed steps simulated since the last restart
    pub time_ticks: u64,
    /// Tick of the most recent exhaust puff
    pub last_exhaust_tick: Option<u64>,
    /// Restarts so far in this session
    pub flights: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with fresh terrain and lander
    ///
    /// `settings` are assumed to have passed `Settings::validate`.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = generate_terrain(
            &mut rng,
            settings.playfield.width,
            settings.lander.size.x,
            &settings.terrain,
        );
        let lander = Lander::spawn(
            &mut rng,
            settings.playfield.width,
            settings.playfield.height,
            &settings.lander,
        );
        let stars = generate_stars(&mut rng, &settings.stars);

        Self {
            seed,
            settings,
            terrain,
            lander,
            particles: Vec::new(),
            outcome: Outcome::Pending,
            stars,
            time_ticks: 0,
            last_exhaust_tick: None,
            flights: 0,
            rng,
        }
    }

    /// Replace terrain, lander and starfield wholesale and clear the outcome
    ///
    /// The RNG keeps advancing, so each restart yields an independent layout.
    pub fn restart(&mut self) {
        self.outcome = Outcome::Pending;
        self.stars = generate_stars(&mut self.rng, &self.settings.stars);
        self.terrain = generate_terrain(
            &mut self.rng,
            self.settings.playfield.width,
            self.settings.lander.size.x,
            &self.settings.terrain,
        );
        self.lander = Lander::spawn(
            &mut self.rng,
            self.settings.playfield.width,
            self.settings.playfield.height,
            &self.settings.lander,
        );
        self.particles.clear();
        self.time_ticks = 0;
        self.last_exhaust_tick = None;
        self.flights += 1;
    }

    #[inline]
    pub fn landing_pad(&self) -> LandingPad {
        self.terrain.landing_pad()
    }

    /// Swap in hand-built terrain (scenarios and tests)
    pub fn set_terrain(&mut self, terrain: Terrain) {
        self.terrain = terrain;
    }
}
