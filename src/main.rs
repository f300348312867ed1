//! Sky Shooter entry point
//!
//! On the web this wires the game into the host page. Natively it plays one
//! autopilot run headless and prints the final state as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Logger init failed: {e}").into());
    }
    log::info!("Sky Shooter starting...");

    if let Err(e) = sky_shooter::platform::web::run() {
        log::error!("Startup failed: {e:?}");
    }
}

/// Ten minutes at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_FRAMES: u64 = 36_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sky_shooter::Settings;
    use sky_shooter::platform::headless::run_demo;

    env_logger::init();
    log::info!("Sky Shooter (native) starting headless demo...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    if let Err(e) = settings.validate() {
        log::error!("{e}");
        std::process::exit(2);
    }

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {seed}");

    let snapshot = run_demo(settings, seed, DEMO_MAX_FRAMES);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Cannot serialize result: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
