//! Session controller
//!
//! Owns the game state, the held control intents and the fixed-timestep
//! accumulator. The rendering/input layer talks to the simulation only
//! through this type: it forwards key events and elapsed time, then reads
//! snapshots between steps.

use crate::settings::{Settings, SettingsError};
use crate::sim::{
    FuelParticle, GameState, Lander, LandingPad, Outcome, Star, Terrain, TickInput, tick,
};

/// Player controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Thrust,
    RotateLeft,
    RotateRight,
    /// Fires immediately on press rather than being held
    Restart,
}

/// Flight readout for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout {
    /// Positive when falling
    pub descent_speed: f32,
    pub rotation: f32,
    pub fuel: f32,
    /// 0-1
    pub fuel_fraction: f32,
    /// Descent is within landing tolerance
    pub speed_safe: bool,
    /// Attitude is within landing tolerance
    pub attitude_safe: bool,
}

/// A running game: state plus the fixed-step loop that drives it
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: TickInput,
    /// Unsimulated real time, in milliseconds
    accumulator: f32,
}

impl Session {
    /// Validate `settings` and start the first flight
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::from_valid(settings, seed))
    }

    /// Session with default tuning
    pub fn with_defaults(seed: u64) -> Self {
        Self::from_valid(Settings::default(), seed)
    }

    fn from_valid(settings: Settings, seed: u64) -> Self {
        log::info!("Session starting with seed: {}", seed);
        Self {
            state: GameState::new(settings, seed),
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// A control was pressed
    pub fn on_input_down(&mut self, control: Control) {
        match control {
            Control::Thrust => self.input.thrust = true,
            Control::RotateLeft => self.input.rotate_left = true,
            Control::RotateRight => self.input.rotate_right = true,
            Control::Restart => self.restart(),
        }
    }

    /// A control was released
    pub fn on_input_up(&mut self, control: Control) {
        match control {
            Control::Thrust => self.input.thrust = false,
            Control::RotateLeft => self.input.rotate_left = false,
            Control::RotateRight => self.input.rotate_right = false,
            Control::Restart => {}
        }
    }

    /// Replace the held controls wholesale (autopilot, replays)
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    #[inline]
    pub fn input(&self) -> TickInput {
        self.input
    }

    /// Start a new flight: fresh terrain, fresh lander, no outcome
    ///
    /// Available at any time, including mid-flight.
    pub fn restart(&mut self) {
        self.state.restart();
        self.accumulator = 0.0;
        log::info!("Flight {} started", self.state.flights + 1);
    }

    /// Feed real elapsed time and run as many fixed steps as it covers
    ///
    /// Returns the number of steps simulated (zero, one or many).
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        let max_frame = self.state.settings.max_frame_ms;
        let elapsed = if elapsed_ms > max_frame {
            log::debug!("Clamping frame time {:.1}ms to {:.1}ms", elapsed_ms, max_frame);
            max_frame
        } else {
            elapsed_ms.max(0.0)
        };
        self.accumulator += elapsed;

        let step_ms = self.state.settings.step_ms;
        let dt = self.state.settings.step_seconds();
        let mut steps = 0;
        while self.accumulator >= step_ms {
            let was_pending = !self.state.outcome.is_terminal();
            tick(&mut self.state, &self.input, dt);
            self.accumulator -= step_ms;
            steps += 1;

            if was_pending && self.state.outcome.is_terminal() {
                log::info!(
                    "Flight {} ended: {:?} after {} ticks",
                    self.state.flights + 1,
                    self.state.outcome,
                    self.state.time_ticks
                );
            }
        }
        steps
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state for scripted scenarios
    #[inline]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    #[inline]
    pub fn lander(&self) -> &Lander {
        &self.state.lander
    }

    #[inline]
    pub fn particles(&self) -> &[FuelParticle] {
        &self.state.particles
    }

    #[inline]
    pub fn terrain(&self) -> &Terrain {
        &self.state.terrain
    }

    #[inline]
    pub fn landing_pad(&self) -> LandingPad {
        self.state.landing_pad()
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.state.stars
    }

    /// Current flight readout
    pub fn hud(&self) -> HudReadout {
        let lander = &self.state.lander;
        let tuning = &self.state.settings.lander;
        let fuel_fraction = if tuning.starting_fuel > 0.0 {
            (lander.fuel / tuning.starting_fuel).clamp(0.0, 1.0)
        } else {
            0.0
        };

        HudReadout {
            descent_speed: -lander.vel.y,
            rotation: lander.rotation,
            fuel: lander.fuel,
            fuel_fraction,
            speed_safe: lander.vel.y.abs() <= tuning.max_landing_velocity,
            attitude_safe: lander.rotation.abs() <= tuning.max_landing_rotation,
        }
    }
}
