//! Game controller
//!
//! The collaborator-facing surface: resize, pointer input, frame ticks and
//! reset. Owns the [`World`] and the one-shot completion notice that fires a
//! short while after the sheep is penned, so the last frame can show it inside.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{self, Bounds, Snapshot, World};

/// Round-over notice for the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    /// Final round time
    pub elapsed_ms: f64,
    /// Host clock time at which the notice becomes due
    pub due_ms: f64,
}

/// One herding session
#[derive(Debug, Clone)]
pub struct Game {
    world: World,
    pending: Option<Completion>,
    autopilot: bool,
}

impl Game {
    pub fn new(settings: Settings, bounds: Bounds, seed: u64, now_ms: f64) -> Self {
        log::info!(
            "New game {}x{} with seed {}",
            bounds.width,
            bounds.height,
            seed
        );
        Self {
            world: World::new(settings, bounds, seed, now_ms),
            pending: None,
            autopilot: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_active(&self) -> bool {
        self.world.is_active()
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    /// Arena changed size; relayout the pen
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if !Bounds::new(width, height).is_valid() {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        if self.world.resize(width, height) {
            log::info!("Resize put the pen over the sheep, moved it back out the gate");
        }
    }

    /// Pointer or touch moved, in arena coordinates
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        sim::move_dog_toward(&mut self.world, Vec2::new(x, y));
    }

    /// Advance one frame and return what to draw
    pub fn tick(&mut self, now_ms: f64) -> Snapshot {
        if self.autopilot && self.world.is_active() {
            let target = sim::herding_target(&self.world);
            sim::move_dog_toward(&mut self.world, target);
        }

        if let Some(event) = sim::tick(&mut self.world, now_ms) {
            self.pending = Some(Completion {
                elapsed_ms: event.elapsed_ms,
                due_ms: now_ms + event.delay_ms,
            });
        }

        self.world.snapshot(now_ms)
    }

    /// Current state without advancing
    pub fn snapshot(&self, now_ms: f64) -> Snapshot {
        self.world.snapshot(now_ms)
    }

    /// Take the completion notice once it is due. Fires at most once per round.
    pub fn poll_completion(&mut self, now_ms: f64) -> Option<Completion> {
        match self.pending {
            Some(notice) if now_ms >= notice.due_ms => self.pending.take(),
            _ => None,
        }
    }

    /// Start a new round. Drops any notice not yet delivered.
    pub fn reset(&mut self, now_ms: f64) {
        self.pending = None;
        self.world.reset(now_ms);
        log::info!("Round reset");
    }
}
