//! Pen geometry and collision
//!
//! The pen is an axis-aligned rectangle built from up to four wall strips of
//! equal thickness, laid along the inside of its edges. One side is left out to
//! form the gate. Circles are tested against each present strip expanded by the
//! circle's radius; bounds are inclusive so a centre sitting exactly on an
//! expanded edge counts as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which walls of the pen are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Sides {
    /// Gate on the right, the other three walls solid
    fn default() -> Self {
        Self {
            top: true,
            right: false,
            bottom: true,
            left: true,
        }
    }
}

/// Which wall a [`WallRect`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// A solid wall strip, in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRect {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WallRect {
    /// Does a circle overlap this strip? Tested as the strip padded by `radius`.
    #[inline]
    pub fn touches(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= self.x - radius
            && pos.x <= self.x + self.width + radius
            && pos.y >= self.y - radius
            && pos.y <= self.y + self.height + radius
    }
}

/// The pen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    pub sides: Sides,
}

impl Fence {
    /// A pen with no area yet; call [`Fence::recompute`] once bounds are known
    pub fn new(thickness: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            thickness,
            sides: Sides::default(),
        }
    }

    /// Resize to `scale` of the arena and center it. Thickness and sides are kept.
    pub fn recompute(&mut self, bounds_width: f32, bounds_height: f32, scale: f32) {
        self.width = bounds_width * scale;
        self.height = bounds_height * scale;
        self.x = (bounds_width - self.width) / 2.0;
        self.y = (bounds_height - self.height) / 2.0;
    }

    /// Strictly inside the pen rectangle (edges excluded)
    #[inline]
    pub fn is_inside(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.x + self.width && y > self.y && y < self.y + self.height
    }

    /// Does a circle hit any built wall?
    ///
    /// Never reports a hit for a centre inside the pen, so the sheep can walk in
    /// through the gate and the win check can see it there.
    pub fn collides_at(&self, x: f32, y: f32, radius: f32) -> bool {
        !self.is_inside(x, y) && self.touches_wall(x, y, radius)
    }

    /// Does a circle overlap any built wall strip, wherever its centre is?
    ///
    /// Used for the dog, which may stand in the pen but never on a wall.
    pub fn touches_wall(&self, x: f32, y: f32, radius: f32) -> bool {
        let pos = Vec2::new(x, y);
        self.walls().iter().any(|wall| wall.touches(pos, radius))
    }

    /// Built wall strips, in top/right/bottom/left order
    pub fn walls(&self) -> Vec<WallRect> {
        let t = self.thickness;
        let candidates = [
            (
                self.sides.top,
                WallRect {
                    side: Side::Top,
                    x: self.x,
                    y: self.y,
                    width: self.width,
                    height: t,
                },
            ),
            (
                self.sides.right,
                WallRect {
                    side: Side::Right,
                    x: self.x + self.width - t,
                    y: self.y,
                    width: t,
                    height: self.height,
                },
            ),
            (
                self.sides.bottom,
                WallRect {
                    side: Side::Bottom,
                    x: self.x,
                    y: self.y + self.height - t,
                    width: self.width,
                    height: t,
                },
            ),
            (
                self.sides.left,
                WallRect {
                    side: Side::Left,
                    x: self.x,
                    y: self.y,
                    width: t,
                    height: self.height,
                },
            ),
        ];

        candidates
            .into_iter()
            .filter_map(|(present, wall)| present.then_some(wall))
            .collect()
    }

    /// Center of the pen
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint of the gate (right edge)
    pub fn gate_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Where a sheep of the given radius waits outside the gate
    pub fn spawn_outside_gate(&self, sheep_size: f32) -> Vec2 {
        Vec2::new(
            self.x + self.width + sheep_size * 2.0,
            self.y + self.height / 2.0,
        )
    }
}
