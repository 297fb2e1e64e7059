//! Demo mode - steer the dog without a pointer
//!
//! The dog parks on the far side of the sheep from where the sheep should go,
//! close enough that the flee impulse outweighs the wander. Sheep west of the
//! gate line but not in front of it are first pushed back east, then lined up
//! with the gate, then driven in.

use glam::Vec2;

use super::state::World;

/// Extra gap between dog and sheep beyond touching distance
const STANDOFF_MARGIN: f32 = 10.0;

/// Where the sheep should head next
pub fn herding_goal(world: &World) -> Vec2 {
    let fence = &world.fence;
    let sheep = world.sheep.pos;
    let size = world.sheep.size;
    let gate = fence.gate_center();

    // Vertical span a sheep can pass through without touching top/bottom walls
    let lane_top = fence.y + fence.thickness + size;
    let lane_bottom = fence.y + fence.height - fence.thickness - size;
    let in_lane = sheep.y > lane_top && sheep.y < lane_bottom;

    // Staging point in front of the gate
    let staging = Vec2::new(gate.x + size * 3.0, gate.y);

    if sheep.x >= gate.x {
        if in_lane { fence.center() } else { staging }
    } else if in_lane && sheep.x > fence.x {
        // Already in the gate mouth
        fence.center()
    } else {
        // Behind or beside the pen: push east past the gate line at current height
        Vec2::new(staging.x, sheep.y)
    }
}

/// Pointer position the dog should move to this tick
pub fn herding_target(world: &World) -> Vec2 {
    let sheep = world.sheep.pos;
    let goal = herding_goal(world);
    let dir = (goal - sheep).normalize_or(Vec2::NEG_X);
    let standoff = world.sheep.size + world.dog.size + STANDOFF_MARGIN;
    sheep - dir * standoff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Bounds;

    fn test_world() -> World {
        // Pen: x=300, y=150, w=400, h=200, gate centre (700, 250)
        World::new(Settings::default(), Bounds::new(1000.0, 500.0), 3, 0.0)
    }

    #[test]
    fn test_lined_up_sheep_is_driven_into_pen() {
        let world = test_world();
        assert_eq!(herding_goal(&world), world.fence.center());
        let target = herding_target(&world);
        // Dog sits east of the sheep, on the far side from the pen
        assert!(target.x > world.sheep.pos.x);
        assert!((target.y - world.sheep.pos.y).abs() < 1e-3);
    }

    #[test]
    fn test_off_lane_sheep_goes_to_staging() {
        let mut world = test_world();
        world.sheep.pos = Vec2::new(850.0, 60.0);
        let goal = herding_goal(&world);
        assert_eq!(goal, Vec2::new(790.0, 250.0));
    }

    #[test]
    fn test_sheep_behind_pen_pushed_east() {
        let mut world = test_world();
        world.sheep.pos = Vec2::new(150.0, 250.0);
        let goal = herding_goal(&world);
        assert!(goal.x > world.fence.gate_center().x);
        assert_eq!(goal.y, 250.0);
    }

    #[test]
    fn test_target_opposes_goal() {
        let mut world = test_world();
        for pos in [
            Vec2::new(850.0, 60.0),
            Vec2::new(150.0, 250.0),
            Vec2::new(500.0, 450.0),
            Vec2::new(760.0, 250.0),
        ] {
            world.sheep.pos = pos;
            let goal = herding_goal(&world);
            let target = herding_target(&world);
            assert!((target - pos).dot(goal - pos) < 0.0);
        }
    }
}
