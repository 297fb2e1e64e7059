//! Deterministic herding simulation
//!
//! All state is owned by [`World`]; randomness comes from a seeded PCG so a run
//! replays exactly given the same seed and input sequence.

pub mod autopilot;
pub mod fence;
pub mod state;
pub mod tick;

pub use autopilot::{herding_goal, herding_target};
pub use fence::{Fence, Side, Sides, WallRect};
pub use state::{Bounds, Dog, GamePhase, RoundTimer, Sheep, Snapshot, World};
pub use tick::{RoundComplete, advance_sheep, move_dog_toward, repulsion_magnitude, tick};
