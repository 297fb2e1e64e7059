//! Per-frame simulation step
//!
//! Motion is a fixed amount per tick, not scaled by frame time. Pointer input
//! reaches the dog through [`move_dog_toward`] whenever the host gets it; the
//! sheep moves once per [`tick`].

use glam::Vec2;
use rand::Rng;

use super::state::{GamePhase, World};

/// Emitted by the tick that sees the sheep inside the pen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundComplete {
    /// Frozen round time
    pub elapsed_ms: f64,
    /// How long the host should wait before announcing it
    pub delay_ms: f64,
}

/// Flee impulse for a sheep `distance` away from the dog.
///
/// Quadratic falloff: `strength` at zero distance, zero at and beyond
/// `awareness`. Never increases with distance.
#[inline]
pub fn repulsion_magnitude(distance: f32, awareness: f32, strength: f32) -> f32 {
    if distance >= awareness || awareness <= 0.0 {
        return 0.0;
    }
    let ratio = (awareness - distance.max(0.0)) / awareness;
    strength * ratio * ratio
}

/// Move the dog to the pointer, respecting the sheep and the fence.
///
/// A target too close to the sheep is pushed out to the separation radius. A
/// target that would put the dog in a wall is dropped for this update, as is one
/// the arena clamp would drag back inside the separation radius.
///
/// The dog gets no pass for standing inside the pen: any wall strip it overlaps blocks it.
pub fn move_dog_toward(world: &mut World, target: Vec2) {
    if world.phase != GamePhase::Active {
        return;
    }
    if !target.is_finite() {
        log::debug!("Ignoring non-finite dog target {:?}", target);
        return;
    }

    let sheep_pos = world.sheep.pos;
    let min_distance = world.settings.separation_distance();
    let mut new_pos = target;

    if new_pos.distance(sheep_pos) < min_distance {
        // Pointer exactly on the sheep's centre pushes out on the side the dog came from
        let fallback = (world.dog.pos - sheep_pos).normalize_or(Vec2::X);
        let dir = (new_pos - sheep_pos).normalize_or(fallback);
        new_pos = sheep_pos + dir * min_distance;
    }

    if world.fence.touches_wall(new_pos.x, new_pos.y, world.dog.size) {
        return;
    }

    let new_pos = world.bounds.clamp(new_pos, world.dog.size);
    // Clamp pulled the dog back onto the sheep (sheep against the arena edge)
    if new_pos.distance(sheep_pos) < min_distance - 1e-3 {
        log::debug!("Dog move blocked at arena edge next to the sheep");
        return;
    }

    world.dog.pos = new_pos;
}

/// Wander, flee, collide and clamp the sheep, then check for the win.
///
/// Does nothing once the round is over. A step that would end closer to the
/// dog than the separation radius, and closer than it started, is dropped.
/// Returns the completion event on the tick the sheep is first seen inside the
/// pen.
pub fn advance_sheep(world: &mut World, now_ms: f64) -> Option<RoundComplete> {
    if world.phase != GamePhase::Active {
        return None;
    }

    let prev = world.sheep.pos;
    let mut pos = prev;

    // Wander: independent uniform step per axis in [-speed/2, speed/2)
    let speed = world.sheep.speed;
    pos.x += (world.rng.random::<f32>() - 0.5) * speed;
    pos.y += (world.rng.random::<f32>() - 0.5) * speed;

    // Flee, layered on top of the wander
    let distance = pos.distance(world.dog.pos);
    let awareness = world.settings.awareness_distance();
    if distance < awareness {
        let away = (pos - world.dog.pos).normalize_or_zero();
        pos += away * repulsion_magnitude(distance, awareness, world.settings.repel_strength);
    }

    // Rejection: any wall contact discards the whole step
    if world.fence.collides_at(pos.x, pos.y, world.sheep.size) {
        pos = prev;
    }

    let pos = world.bounds.clamp(pos, world.sheep.size);

    // Wander or the arena edge can carry the sheep into the dog
    let min_distance = world.settings.separation_distance();
    let new_distance = pos.distance(world.dog.pos);
    if new_distance >= min_distance || new_distance >= prev.distance(world.dog.pos) {
        world.sheep.pos = pos;
    }

    if world.fence.is_inside(world.sheep.pos.x, world.sheep.pos.y) {
        world.phase = GamePhase::Complete;
        let elapsed_ms = world.timer.freeze(now_ms);
        log::info!(
            "Sheep penned in {} ({:.0} ms)",
            crate::format_elapsed(elapsed_ms),
            elapsed_ms
        );
        return Some(RoundComplete {
            elapsed_ms,
            delay_ms: world.settings.completion_delay_ms,
        });
    }

    None
}

/// Advance the world by one frame
pub fn tick(world: &mut World, now_ms: f64) -> Option<RoundComplete> {
    advance_sheep(world, now_ms)
}
