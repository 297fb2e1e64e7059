//! Sheepdog entry point
//!
//! Natively this is a headless demo: the autopilot herds the sheep and the run
//! is reported through the log. The browser build is driven from JavaScript via
//! `sheepdog::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sheepdog::consts::*;
    use sheepdog::sim::Bounds;
    use sheepdog::{Game, Settings, format_elapsed};

    /// Simulated frame interval (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    fn load_settings(path: Option<String>) -> Settings {
        let Some(path) = path else {
            return Settings::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Settings::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("{}: {}, using defaults", path, e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path, e);
                Settings::default()
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let settings = load_settings(args.next());
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5eed);

        let bounds = Bounds::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT);
        let mut game = Game::new(settings, bounds, seed, 0.0);
        game.set_autopilot(true);

        for frame in 0..MAX_FRAMES {
            let now = frame as f64 * FRAME_MS;
            let snapshot = game.tick(now);

            if frame % 600 == 0 {
                log::info!(
                    "[{}] sheep ({:.0}, {:.0}) dog ({:.0}, {:.0})",
                    format_elapsed(snapshot.elapsed_ms),
                    snapshot.sheep.pos.x,
                    snapshot.sheep.pos.y,
                    snapshot.dog.pos.x,
                    snapshot.dog.pos.y
                );
            }

            if let Some(notice) = game.poll_completion(now) {
                println!(
                    "Well done! Sheep penned in {}",
                    format_elapsed(notice.elapsed_ms)
                );
                return;
            }
        }

        println!(
            "Sheep still loose after {}",
            format_elapsed(MAX_FRAMES as f64 * FRAME_MS)
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sheepdog (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is sheepdog::web::start, this is just to satisfy the compiler
}
