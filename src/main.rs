//! Jumping Hero entry point
//!
//! The web build starts from `jumping_hero::web`. Natively this runs a
//! headless session with a scripted tilt sweep and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use jumping_hero::feedback::Tally;
    use jumping_hero::platform::ManualScheduler;
    use jumping_hero::{GameDriver, TiltReader};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Jumping Hero (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);
    let seconds: u64 = 60;
    let frame_ms = 1000.0 / 60.0;

    let scheduler = ManualScheduler::new();
    let tilt = TiltReader::default();
    let driver = GameDriver::new(scheduler.clone(), tilt.clone(), Tally::default(), seed);

    driver.start();
    for frame in 1..=seconds * 60 {
        // Lean left, centre, right in slow cycles
        let t = frame as f32 / 60.0;
        tilt.set((t * 0.4).sin() * 60.0);
        scheduler.fire(frame as f64 * frame_ms);
    }
    driver.stop();

    let snapshot = driver.snapshot();
    let feedback = driver.feedback();
    log::info!(
        "Session over after {} ticks: score {}, stars {} ({} manholes, {} stars chimed)",
        snapshot.time_ticks,
        snapshot.score,
        snapshot.stars,
        feedback.manholes,
        feedback.stars
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is jumping_hero::web::wasm_start, this is just to satisfy the compiler
}
