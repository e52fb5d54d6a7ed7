//! Collision and bounds tests
//!
//! Circle-circle overlap works on squared distances: no square root, and
//! exactly touching circles count as colliding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Body;

/// Check whether two circular bodies overlap (touching included).
///
/// Symmetric: `intersects(a, b) == intersects(b, a)`.
#[inline]
pub fn intersects(a: &Body, b: &Body) -> bool {
    circles_overlap(a.pos, a.radius_f32(), b.pos, b.radius_f32())
}

/// `dx² + dy² <= (ra + rb)²`
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let radius_sum = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= radius_sum * radius_sum
}

/// Axis-aligned playfield `[0, width] × [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Inclusive containment; points on an edge are still inside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// True once a point has left the field
    #[inline]
    pub fn is_outside(&self, p: Vec2) -> bool {
        !self.contains(p)
    }
}
