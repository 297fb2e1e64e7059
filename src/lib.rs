//! Sheepdog - herd a wandering sheep into a three-sided pen
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fence geometry, dog/sheep step, win check)
//! - `game`: Controller owning the world, the collaborator-facing API
//! - `settings`: Data-driven tuning, loadable from JSON
//! - `web`: WebAssembly bridge (wasm32 only)

pub mod game;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Completion, Game};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Dog radius
    pub const DOG_SIZE: f32 = 20.0;

    /// Sheep radius and wander step (max displacement per tick across an axis)
    pub const SHEEP_SIZE: f32 = 30.0;
    pub const SHEEP_SPEED: f32 = 3.0;

    /// Fence wall thickness and size relative to the arena
    pub const FENCE_THICKNESS: f32 = 15.0;
    pub const FENCE_SCALE: f32 = 0.4;

    /// Peak flee impulse, reached when the dog is on top of the sheep
    pub const REPEL_STRENGTH: f32 = 7.0;
    /// Awareness radius as a multiple of the sheep's personal space (2 * size)
    pub const AWARENESS_FACTOR: f32 = 3.0;

    /// Dog spawns this far beyond the sheep on reset
    pub const DOG_SPAWN_OFFSET: f32 = 100.0;

    /// Delay before the collaborator is told the round is over (ms)
    pub const COMPLETION_DELAY_MS: f64 = 500.0;

    /// Default arena for headless runs
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;
}

/// Format elapsed milliseconds as `MM:SS`
///
/// Minutes are not wrapped into hours. Negative or non-finite input reads as zero.
pub fn format_elapsed(ms: f64) -> String {
    let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
    let total_secs = (ms / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
