//! Browser bridge
//!
//! JavaScript owns the canvas, event listeners and the popup; it forwards
//! resize and pointer events here, calls `tick` from `requestAnimationFrame`
//! and draws the JSON snapshot it gets back.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::settings::Settings;
use crate::sim::Bounds;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless, keep the first logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Sheepdog starting...");
}

/// Handle to one game, held by the JavaScript host
#[wasm_bindgen]
pub struct HerdHandle {
    game: Game,
}

#[wasm_bindgen]
impl HerdHandle {
    /// New game for a `width` x `height` arena. `settings_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: u64, settings_json: &str) -> HerdHandle {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("{}, using defaults", e);
                Settings::default()
            })
        };

        HerdHandle {
            game: Game::new(settings, Bounds::new(width, height), seed, js_sys::Date::now()),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.on_resize(width, height);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.game.on_pointer_move(x, y);
    }

    /// Advance one frame; returns the snapshot as JSON
    pub fn tick(&mut self, now_ms: f64) -> String {
        let snapshot = self.game.tick(now_ms);
        serde_json::to_string(&snapshot).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::new()
        })
    }

    /// Final time in ms, once, when the round-over popup should appear
    pub fn poll_completion(&mut self, now_ms: f64) -> Option<f64> {
        self.game.poll_completion(now_ms).map(|notice| notice.elapsed_ms)
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.game.reset(now_ms);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.game.set_autopilot(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.game.is_active()
    }
}

/// `MM:SS` for the timer display and the popup
#[wasm_bindgen]
pub fn format_time(ms: f64) -> String {
    crate::format_elapsed(ms)
}
