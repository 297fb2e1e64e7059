//! World state and core simulation types
//!
//! Everything a round needs lives in [`World`]; step functions borrow it
//! mutably and nothing is kept in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fence::{Fence, WallRect};
use crate::settings::Settings;

/// Round lifecycle: `Active -> Complete -> (reset) -> Active`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Herding in progress, timer running
    Active,
    /// Sheep reached the pen; frozen until reset
    Complete,
}

/// The pointer-driven dog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub pos: Vec2,
    pub size: f32,
}

/// The wandering sheep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheep {
    pub pos: Vec2,
    pub size: f32,
    /// Wander step; each axis moves up to half of this per tick
    pub speed: f32,
}

/// Playable rectangle, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Usable as an arena: finite and non-empty
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Keep a circle of radius `inset` inside the arena.
    ///
    /// Lower bound first, then upper, so an arena narrower than the circle
    /// pins it to the far edge instead of panicking.
    pub fn clamp(&self, pos: Vec2, inset: f32) -> Vec2 {
        Vec2::new(
            pos.x.max(inset).min(self.width - inset),
            pos.y.max(inset).min(self.height - inset),
        )
    }

    /// Inside `[inset, dim - inset]` on both axes
    pub fn contains(&self, pos: Vec2, inset: f32) -> bool {
        pos.x >= inset
            && pos.x <= self.width - inset
            && pos.y >= inset
            && pos.y <= self.height - inset
    }
}

/// Round clock, driven by timestamps the host passes in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundTimer {
    pub start_ms: f64,
    /// Set once the round completes; elapsed time stops here
    pub frozen_elapsed_ms: Option<f64>,
}

impl RoundTimer {
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            frozen_elapsed_ms: None,
        }
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.frozen_elapsed_ms = None;
    }

    /// Stop the clock. Later calls keep the first frozen value.
    pub fn freeze(&mut self, now_ms: f64) -> f64 {
        let elapsed = self.elapsed_ms(now_ms);
        *self.frozen_elapsed_ms.get_or_insert(elapsed)
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.frozen_elapsed_ms
            .unwrap_or_else(|| (now_ms - self.start_ms).max(0.0))
    }
}

/// What the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub dog: Dog,
    pub sheep: Sheep,
    pub fence: Fence,
    /// Built wall strips, ready to draw
    pub walls: Vec<WallRect>,
    pub game_active: bool,
    pub elapsed_ms: f64,
}

/// Complete simulation state for one arena
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub bounds: Bounds,
    pub fence: Fence,
    pub dog: Dog,
    pub sheep: Sheep,
    pub phase: GamePhase,
    pub timer: RoundTimer,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Wander source, seeded from `seed`
    pub(crate) rng: Pcg32,
}

impl World {
    /// Build a world with the pen laid out for `bounds` and a fresh round started
    pub fn new(settings: Settings, bounds: Bounds, seed: u64, now_ms: f64) -> Self {
        let mut fence = Fence::new(settings.fence_thickness);
        fence.recompute(bounds.width, bounds.height, settings.fence_scale);

        let mut world = Self {
            dog: Dog {
                pos: Vec2::ZERO,
                size: settings.dog_size,
            },
            sheep: Sheep {
                pos: Vec2::ZERO,
                size: settings.sheep_size,
                speed: settings.sheep_speed,
            },
            fence,
            bounds,
            phase: GamePhase::Active,
            timer: RoundTimer::new(now_ms),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        };
        world.reset(now_ms);
        world
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Start a new round: sheep just outside the gate, dog beyond it
    pub fn reset(&mut self, now_ms: f64) {
        self.phase = GamePhase::Active;
        self.timer.restart(now_ms);

        let sheep_pos = self.fence.spawn_outside_gate(self.sheep.size);
        self.sheep.pos = self.bounds.clamp(sheep_pos, self.sheep.size);
        self.place_dog();
    }

    /// Relayout the pen for new arena bounds.
    ///
    /// Both entities are pulled into the new arena. A sheep the pen now covers
    /// goes back out through the gate; a dog left on a wall or on the sheep is
    /// placed again as on reset. Returns true if the sheep had to be moved.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.bounds = Bounds::new(width, height);
        self.fence.recompute(width, height, self.settings.fence_scale);

        let sheep = self.sheep.pos;
        let relocated = self.fence.is_inside(sheep.x, sheep.y)
            || self.fence.collides_at(sheep.x, sheep.y, self.sheep.size);
        if relocated {
            self.sheep.pos = self.fence.spawn_outside_gate(self.sheep.size);
        }
        self.sheep.pos = self.bounds.clamp(self.sheep.pos, self.sheep.size);

        self.dog.pos = self.bounds.clamp(self.dog.pos, self.dog.size);
        if !self.dog_spot_is_clear(self.dog.pos) {
            self.place_dog();
        }

        relocated
    }

    /// Dog may stand here: clear of every wall and outside the sheep's reach
    fn dog_spot_is_clear(&self, pos: Vec2) -> bool {
        pos.distance(self.sheep.pos) >= self.settings.separation_distance()
            && !self.fence.touches_wall(pos.x, pos.y, self.dog.size)
    }

    /// Put the dog `dog_offset` east of the sheep.
    ///
    /// When the arena edge or a wall is in the way, the other compass and
    /// diagonal directions are tried in turn. If none is clear the clamped east
    /// spot is used.
    fn place_dog(&mut self) {
        const D: f32 = std::f32::consts::FRAC_1_SQRT_2;
        const DIRECTIONS: [Vec2; 8] = [
            Vec2::X,
            Vec2::NEG_Y,
            Vec2::Y,
            Vec2::NEG_X,
            Vec2::new(D, -D),
            Vec2::new(D, D),
            Vec2::new(-D, -D),
            Vec2::new(-D, D),
        ];

        let sheep = self.sheep.pos;
        let reach = self
            .settings
            .dog_offset
            .max(self.settings.separation_distance());

        let spot = DIRECTIONS
            .iter()
            .map(|dir| self.bounds.clamp(sheep + *dir * reach, self.dog.size))
            .find(|pos| self.dog_spot_is_clear(*pos));

        self.dog.pos = match spot {
            Some(pos) => pos,
            None => {
                log::warn!("No clear spot for the dog around {:?}", sheep);
                self.bounds.clamp(sheep + Vec2::X * reach, self.dog.size)
            }
        };
    }

    pub fn snapshot(&self, now_ms: f64) -> Snapshot {
        Snapshot {
            dog: self.dog,
            sheep: self.sheep,
            fence: self.fence.clone(),
            walls: self.fence.walls(),
            game_active: self.is_active(),
            elapsed_ms: self.timer.elapsed_ms(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        World::new(Settings::default(), Bounds::new(1000.0, 500.0), 42, 0.0)
    }

    #[test]
    fn test_reset_positions() {
        let world = test_world();
        // Fence: x=300, y=150, w=400, h=200
        assert_eq!(world.sheep.pos, Vec2::new(760.0, 250.0));
        assert_eq!(world.dog.pos, Vec2::new(860.0, 250.0));
        assert!(world.is_active());
    }

    #[test]
    fn test_reset_twice_is_identical() {
        let mut world = test_world();
        world.sheep.pos = Vec2::new(10.0, 10.0);
        world.dog.pos = Vec2::new(900.0, 20.0);
        world.phase = GamePhase::Complete;

        world.reset(1000.0);
        let first = world.snapshot(1000.0);
        world.reset(1000.0);
        let second = world.snapshot(1000.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_timer_freezes() {
        let mut timer = RoundTimer::new(1000.0);
        assert_eq!(timer.elapsed_ms(1500.0), 500.0);
        assert_eq!(timer.freeze(2000.0), 1000.0);
        assert_eq!(timer.elapsed_ms(9000.0), 1000.0);
        // Second freeze keeps the first value
        assert_eq!(timer.freeze(5000.0), 1000.0);
        timer.restart(9000.0);
        assert_eq!(timer.elapsed_ms(9250.0), 250.0);
    }

    #[test]
    fn test_timer_never_negative() {
        let timer = RoundTimer::new(1000.0);
        assert_eq!(timer.elapsed_ms(500.0), 0.0);
    }

    #[test]
    fn test_resize_moves_sheep_out_of_pen() {
        let mut world = test_world();
        world.sheep.pos = Vec2::new(200.0, 200.0);
        // New pen: x=120, y=120, w=160, h=160 swallows the sheep
        assert!(world.resize(400.0, 400.0));
        assert_eq!(world.sheep.pos, Vec2::new(340.0, 200.0));
        assert!(!world.fence.is_inside(world.sheep.pos.x, world.sheep.pos.y));
    }

    #[test]
    fn test_resize_leaves_outside_sheep() {
        let mut world = test_world();
        let before = world.sheep.pos;
        // New pen spans x 240..560, sheep stays at x=760
        assert!(!world.resize(800.0, 500.0));
        assert_eq!(world.sheep.pos, before);
        assert_eq!(world.fence.width, 320.0);
        assert_eq!(world.fence.x, 240.0);
    }

    #[test]
    fn test_reset_on_narrow_arena_keeps_dog_off_sheep() {
        // Phone-sized arena: no room east of the sheep for the dog
        let world = World::new(Settings::default(), Bounds::new(375.0, 667.0), 1, 0.0);
        let min_distance = world.settings.separation_distance();

        assert!(world.dog.pos.distance(world.sheep.pos) >= min_distance);
        assert!(world.bounds.contains(world.dog.pos, world.dog.size));
        assert!(world.bounds.contains(world.sheep.pos, world.sheep.size));
        assert!(!world.fence.touches_wall(world.dog.pos.x, world.dog.pos.y, world.dog.size));
        // First fallback is straight north of the sheep
        assert_eq!(world.dog.pos.x, world.sheep.pos.x);
        assert!(world.dog.pos.y < world.sheep.pos.y);
    }

    #[test]
    fn test_resize_pulls_dog_into_arena() {
        let mut world = test_world();
        world.dog.pos = Vec2::new(950.0, 450.0);
        world.resize(600.0, 400.0);

        assert!(world.bounds.contains(world.dog.pos, world.dog.size));
        assert!(world.bounds.contains(world.sheep.pos, world.sheep.size));
        assert!(world.dog.pos.distance(world.sheep.pos) >= world.settings.separation_distance());
    }

    #[test]
    fn test_resize_replaces_dog_left_on_wall() {
        let mut world = test_world();
        // Clear of the 1000x500 pen, but on the left wall of the 600x400 one (x 180..195)
        world.dog.pos = Vec2::new(185.0, 200.0);
        assert!(!world.fence.touches_wall(185.0, 200.0, world.dog.size));
        world.resize(600.0, 400.0);

        let dog = world.dog.pos;
        assert!(!world.fence.touches_wall(dog.x, dog.y, world.dog.size));
        assert!(dog.distance(world.sheep.pos) >= world.settings.separation_distance());
    }

    #[test]
    fn test_resize_moves_sheep_off_new_wall() {
        let mut world = test_world();
        // Outside the 600x400 pen (y 120..280) but within reach of its top wall
        world.sheep.pos = Vec2::new(300.0, 100.0);
        assert!(world.resize(600.0, 400.0));
        let sheep = world.sheep.pos;
        assert!(!world.fence.collides_at(sheep.x, sheep.y, world.sheep.size));
        assert!(!world.fence.is_inside(sheep.x, sheep.y));
    }

    #[test]
    fn test_bounds_clamp_handles_tiny_arena() {
        let bounds = Bounds::new(20.0, 20.0);
        let pos = bounds.clamp(Vec2::new(5.0, 50.0), 30.0);
        assert_eq!(pos, Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = test_world();
        let json = serde_json::to_string(&world.snapshot(250.0)).unwrap();
        assert!(json.contains("\"game_active\":true"));
        assert!(json.contains("\"elapsed_ms\":250.0"));
        assert!(json.contains("\"walls\""));
    }
}
