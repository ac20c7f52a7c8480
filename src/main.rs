//! Moon Lander headless runner
//!
//! Flies one descent under the autopilot and prints how it went.
//! Usage: `moon-lander [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use moon_lander::{Autopilot, Session, Settings};

    /// Simulated display frame
    const FRAME_MS: f32 = 16.0;
    /// Give up after this much flight time
    const MAX_FLIGHT_MS: f32 = 60_000.0;

    env_logger::init();
    log::info!("Moon Lander (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load settings from {}: {}, using defaults", path, e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x4c41_4e44);

    let mut session = match Session::new(settings, seed) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Settings rejected: {}, using defaults", e);
            Session::with_defaults(seed)
        }
    };

    let pilot = Autopilot::default();
    let mut elapsed = 0.0;
    while elapsed < MAX_FLIGHT_MS && !session.outcome().is_terminal() {
        session.set_input(pilot.controls(session.state()));
        session.advance(FRAME_MS);
        elapsed += FRAME_MS;
    }

    let outcome = session.outcome();
    let hud = session.hud();
    println!("seed:     {}", seed);
    println!("outcome:  {:?}", outcome);
    if let Some(headline) = outcome.headline() {
        println!("          {}", headline);
    }
    println!("time:     {:.2}s", elapsed / 1000.0);
    println!(
        "descent:  {:.1}{}",
        hud.descent_speed,
        if hud.speed_safe { "" } else { " (too fast)" }
    );
    println!(
        "attitude: {:.1}°{}",
        hud.rotation,
        if hud.attitude_safe { "" } else { " (tilted)" }
    );
    println!("fuel:     {:.1} ({:.0}%)", hud.fuel, hud.fuel_fraction * 100.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser front ends drive `Session` directly
}
